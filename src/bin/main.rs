//! STL Import CLI
//!
//! Inspect, import and convert STL files.

use clap::{Parser, Subcommand, ValueEnum};
use stl_import::{
    decode_ascii, decode_binary, encode_ascii, encode_binary, ImportConfig, Importer, StlFormat,
    TracingDiagnostics,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stl-import")]
#[command(author, version, about = "Decode STL files into mesh buffers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show format, facet count and content hash of an STL file
    Info {
        /// Input STL file
        input: PathBuf,
    },

    /// Run the full import pipeline and report the result
    Mesh {
        /// Input STL file
        input: PathBuf,

        /// JSON file with import configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep original placement instead of centering the mesh
        #[arg(long)]
        no_center: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-encode an STL file as binary or ASCII
    Convert {
        /// Input STL file
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Target encoding
        #[arg(short, long, value_enum, default_value = "binary")]
        to: TargetFormat,

        /// Solid name for ASCII output (defaults to the input's name or file stem)
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TargetFormat {
    /// Binary STL
    Binary,
    /// ASCII STL
    Ascii,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => {
            show_info(&input)?;
        }
        Commands::Mesh {
            input,
            config,
            no_center,
            json,
        } => {
            mesh_file(&input, config.as_ref(), no_center, json)?;
        }
        Commands::Convert {
            input,
            output,
            to,
            name,
        } => {
            convert_file(&input, &output, to, name)?;
        }
    }

    Ok(())
}

fn show_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let model = Importer::with_config(ImportConfig::default().with_centering(false)).import(&bytes)?;

    println!("File: {:?}", input);
    println!("  Size: {} bytes", bytes.len());
    println!("  Format: {}", model.format);
    if let Some(name) = &model.solid_name {
        println!("  Solid name: {:?}", name);
    }
    println!("  Facets: {}", model.facet_count);
    println!("  Content hash: {}", model.hash);
    let [dx, dy, dz] = model.mesh.bounds.dimensions();
    println!("  Dimensions: {} x {} x {}", dx, dy, dz);

    Ok(())
}

fn mesh_file(
    input: &PathBuf,
    config_path: Option<&PathBuf>,
    no_center: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => ImportConfig::from_json(&fs::read_to_string(path)?)?,
        None => ImportConfig::default(),
    };
    if no_center {
        config.center_vertices = false;
    }

    let bytes = fs::read(input)?;
    let model = Importer::with_config(config).import(&bytes)?;
    let summary = model.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Imported {:?} ({})", input, summary.format);
    println!(
        "  Generated {} vertices, {} triangles",
        summary.vertex_count,
        model.mesh.triangle_count()
    );
    println!("  Bounds: {:?} .. {:?}", summary.bounds.min, summary.bounds.max);
    println!("  Center offset: {:?}", summary.center);
    println!("  Content hash: {}", summary.hash);

    Ok(())
}

fn convert_file(
    input: &PathBuf,
    output: &PathBuf,
    to: TargetFormat,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;

    let (facets, solid_name) = match StlFormat::detect(&bytes) {
        StlFormat::Binary => (decode_binary(&bytes, &TracingDiagnostics)?, None),
        StlFormat::Ascii => {
            let solid = decode_ascii(&bytes, &TracingDiagnostics)?;
            (solid.facets, Some(solid.name))
        }
    };

    match to {
        TargetFormat::Binary => {
            let data = encode_binary(&facets);
            fs::write(output, &data)?;
            println!("Exported binary STL ({} bytes, {} facets) to {:?}", data.len(), facets.len(), output);
        }
        TargetFormat::Ascii => {
            let name = name
                .or(solid_name.filter(|n| !n.is_empty()))
                .or_else(|| input.file_stem().map(|s| s.to_string_lossy().into_owned()))
                .unwrap_or_default();
            let text = encode_ascii(&name, &facets);
            fs::write(output, &text)?;
            println!("Exported ASCII STL ({} facets) to {:?}", facets.len(), output);
        }
    }

    Ok(())
}
