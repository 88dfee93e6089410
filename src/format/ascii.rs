//! ASCII STL decoding and encoding.
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! The decoder is a byte scanner: every byte `<= 0x20` separates tokens,
//! keywords are case sensitive, and the first unexpected token ends the facet
//! list without failing the decode.

use std::fmt;

use crate::diagnostics::{Diagnostics, ImportWarning};
use crate::error::{Result, StlError};
use crate::types::Facet;

/// Whole-part digits that always fit an `i64` accumulator.
const MAX_INTEGER_DIGITS: usize = 18;

/// Rough size of one facet in ASCII form, used to pre-size the facet list.
const ASCII_BYTES_PER_FACET: usize = 250;

/// A decoded ASCII solid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AsciiSolid {
    /// Text after `solid` on the header line. Empty if the file has none.
    pub name: String,
    pub facets: Vec<Facet>,
}

/// Decode an ASCII STL buffer.
///
/// Only a missing `solid` keyword is an error. Anything else that does not fit
/// the grammar stops the facet list and is reported through `diagnostics`;
/// the facets read up to that point are returned.
pub fn decode_ascii(bytes: &[u8], diagnostics: &dyn Diagnostics) -> Result<AsciiSolid> {
    let mut cursor = Cursor::new(bytes);

    if cursor.keyword(b"solid").is_none() {
        return Err(StlError::MissingSolidHeader);
    }
    let name = cursor.read_name();

    let mut facets = Vec::with_capacity(bytes.len() / ASCII_BYTES_PER_FACET);

    loop {
        match cursor.next_token() {
            Some(b"facet") => match cursor.read_facet() {
                Some(facet) => facets.push(facet),
                None => {
                    diagnostics.warn(cursor.stopped(facets.len()));
                    break;
                }
            },
            Some(b"endsolid") => break,
            Some(_) => {
                diagnostics.warn(cursor.stopped(facets.len()));
                break;
            }
            None => {
                diagnostics.warn(ImportWarning::MissingEndSolid {
                    facets_read: facets.len(),
                });
                break;
            }
        }
    }

    tracing::debug!("decoded {} ascii facets from solid '{}'", facets.len(), name);

    Ok(AsciiSolid { name, facets })
}

/// Encode facets as ASCII STL.
pub fn encode_ascii(name: &str, facets: &[Facet]) -> String {
    AsciiWriter { name, facets }.to_string()
}

struct AsciiWriter<'a> {
    name: &'a str,
    facets: &'a [Facet],
}

impl fmt::Display for AsciiWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "solid {}", self.name)?;
        for facet in self.facets {
            let [nx, ny, nz] = facet.normal;
            writeln!(f, "  facet normal {:e} {:e} {:e}", nx, ny, nz)?;
            writeln!(f, "    outer loop")?;
            for [x, y, z] in facet.vertices {
                writeln!(f, "      vertex {:e} {:e} {:e}", x, y, z)?;
            }
            writeln!(f, "    endloop")?;
            writeln!(f, "  endfacet")?;
        }
        writeln!(f, "endsolid {}", self.name)
    }
}

/// Parse one numeric token.
///
/// Accepts an optional sign, whole digits, an optional fraction and an
/// optional `e`/`E` exponent. The whole part is accumulated as an integer,
/// continuing in `f64` once it has more than 18 digits. Fraction digits are
/// added as `digit * 10^-k`, then the sign and the exponent scale are applied
/// and the result is narrowed to `f32`. A zero mantissa stays zero whatever
/// the exponent. This is not always bit-identical to `str::parse::<f32>`.
pub fn parse_float(token: &[u8]) -> Option<f32> {
    let mut i = 0;
    let mut negative = false;
    match token.first() {
        Some(b'-') => {
            negative = true;
            i += 1;
        }
        Some(b'+') => i += 1,
        _ => {}
    }

    let mut digits = 0;
    let mut whole: i64 = 0;
    let mut wide_whole: Option<f64> = None;
    while let Some(d) = digit_at(token, i) {
        match wide_whole {
            Some(wide) => wide_whole = Some(wide * 10.0 + f64::from(d)),
            None if digits >= MAX_INTEGER_DIGITS => {
                wide_whole = Some(whole as f64 * 10.0 + f64::from(d));
            }
            None => whole = whole * 10 + i64::from(d),
        }
        digits += 1;
        i += 1;
    }

    let mut fraction = 0.0f64;
    if token.get(i) == Some(&b'.') {
        i += 1;
        let mut place = 1;
        while let Some(d) = digit_at(token, i) {
            fraction += f64::from(d) * 10f64.powi(-place);
            place += 1;
            digits += 1;
            i += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    let mut value = wide_whole.unwrap_or(whole as f64) + fraction;
    if negative {
        value = -value;
    }

    if matches!(token.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        let mut exponent_negative = false;
        match token.get(i) {
            Some(b'-') => {
                exponent_negative = true;
                i += 1;
            }
            Some(b'+') => i += 1,
            _ => {}
        }

        let mut exponent: i32 = 0;
        let mut exponent_digits = 0;
        while let Some(d) = digit_at(token, i) {
            exponent = exponent.saturating_mul(10).saturating_add(i32::from(d));
            exponent_digits += 1;
            i += 1;
        }
        if exponent_digits == 0 {
            return None;
        }

        if exponent_negative {
            exponent = -exponent;
        }
        // 0 * 10^400 would be 0 * inf
        if value != 0.0 {
            value *= 10f64.powi(exponent);
        }
    }

    if i != token.len() {
        return None;
    }

    Some(value as f32)
}

fn digit_at(token: &[u8], i: usize) -> Option<u8> {
    token.get(i).filter(|b| b.is_ascii_digit()).map(|b| b - b'0')
}

/// Position state over the input bytes.
#[derive(Clone, Copy)]
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// Start of the most recently read token.
    token_start: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            token_start: 0,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] <= b' ' {
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();
        self.token_start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos] > b' ' {
            self.pos += 1;
        }
        if self.pos == self.token_start {
            None
        } else {
            Some(&self.bytes[self.token_start..self.pos])
        }
    }

    fn peek_token(&self) -> Option<&'a [u8]> {
        let mut ahead = *self;
        ahead.next_token()
    }

    fn keyword(&mut self, keyword: &[u8]) -> Option<()> {
        (self.next_token()? == keyword).then_some(())
    }

    fn read_f32(&mut self) -> Option<f32> {
        parse_float(self.next_token()?)
    }

    fn read_vector(&mut self) -> Option<[f32; 3]> {
        Some([self.read_f32()?, self.read_f32()?, self.read_f32()?])
    }

    /// True if the whitespace before the next token contains a line break.
    fn at_line_end(&self) -> bool {
        self.bytes[self.pos..]
            .iter()
            .take_while(|&&b| b <= b' ')
            .any(|&b| b == b'\n' || b == b'\r')
    }

    /// Tokens after `solid` on the same line, stopping early at `facet` or
    /// `endsolid`.
    fn read_name(&mut self) -> String {
        let mut parts = Vec::new();
        while let Some(token) = self.peek_token() {
            if self.at_line_end() {
                break;
            }
            if token == b"facet" || token == b"endsolid" {
                break;
            }
            parts.push(String::from_utf8_lossy(token).into_owned());
            self.next_token();
        }
        parts.join(" ")
    }

    /// Body of a facet, after the `facet` keyword.
    fn read_facet(&mut self) -> Option<Facet> {
        self.keyword(b"normal")?;
        let normal = self.read_vector()?;
        self.keyword(b"outer")?;
        self.keyword(b"loop")?;

        let mut vertices = [[0.0f32; 3]; 3];
        for vertex in &mut vertices {
            self.keyword(b"vertex")?;
            *vertex = self.read_vector()?;
        }

        self.keyword(b"endloop")?;
        self.keyword(b"endfacet")?;

        Some(Facet::new(normal, vertices))
    }

    fn stopped(&self, facets_read: usize) -> ImportWarning {
        let token = &self.bytes[self.token_start..self.pos];
        let found = if token.is_empty() {
            "end of input".to_string()
        } else {
            String::from_utf8_lossy(token).into_owned()
        };
        ImportWarning::AsciiParseStopped {
            offset: self.token_start,
            facets_read,
            found,
        }
    }
}
