//! Reporting of non-fatal import conditions.
//!
//! Decoders never log through a global. Every entry point takes a
//! `&dyn Diagnostics`, so callers decide where warnings end up.

use std::fmt;
use std::sync::Mutex;

/// A recoverable problem found while decoding an STL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    /// Binary header declares fewer facets than the file length allows.
    /// Decoding continues with the declared count.
    FacetCountMismatch { declared: u32, calculated: u32 },
    /// The ASCII parser hit an unexpected token and stopped early.
    AsciiParseStopped {
        /// Byte offset where the offending token starts.
        offset: usize,
        facets_read: usize,
        /// The token that was found, lossily decoded.
        found: String,
    },
    /// The ASCII input ended without an `endsolid` line.
    MissingEndSolid { facets_read: usize },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::FacetCountMismatch { declared, calculated } => write!(
                f,
                "binary STL header declares {} facets but the file holds {}; using {}",
                declared, calculated, declared
            ),
            ImportWarning::AsciiParseStopped { offset, facets_read, found } => write!(
                f,
                "ASCII STL parse stopped at byte {} after {} facets (unexpected '{}')",
                offset, facets_read, found
            ),
            ImportWarning::MissingEndSolid { facets_read } => write!(
                f,
                "ASCII STL ended without 'endsolid' after {} facets",
                facets_read
            ),
        }
    }
}

/// Sink for non-fatal import conditions.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, warning: ImportWarning);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, warning: ImportWarning) {
        tracing::warn!("{}", warning);
    }
}

/// Keeps every warning in memory so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    warnings: Mutex<Vec<ImportWarning>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings collected so far.
    pub fn warnings(&self) -> Vec<ImportWarning> {
        match self.warnings.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Remove and return all collected warnings.
    pub fn take(&self) -> Vec<ImportWarning> {
        match self.warnings.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.warnings().is_empty()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, warning: ImportWarning) {
        tracing::debug!("collected warning: {}", warning);
        match self.warnings.lock() {
            Ok(mut guard) => guard.push(warning),
            Err(poisoned) => poisoned.into_inner().push(warning),
        }
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn warn(&self, warning: ImportWarning) {
        (**self).warn(warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_diagnostics() {
        let diagnostics = CollectingDiagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.warn(ImportWarning::MissingEndSolid { facets_read: 2 });
        assert_eq!(
            diagnostics.warnings(),
            vec![ImportWarning::MissingEndSolid { facets_read: 2 }]
        );

        let taken = diagnostics.take();
        assert_eq!(taken.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_warning_display() {
        let warning = ImportWarning::FacetCountMismatch { declared: 2, calculated: 5 };
        assert_eq!(
            warning.to_string(),
            "binary STL header declares 2 facets but the file holds 5; using 2"
        );
    }
}
