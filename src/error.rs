//! Error types for the pdfsift library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`SiftError`] — **Fatal**: the batch cannot run at all (target is not a
//!   PDF or directory, output directory cannot be created, bad
//!   configuration). Returned as `Err(SiftError)` from
//!   [`crate::batch::run_batch`].
//!
//! * [`UnitError`] — **Non-fatal**: a single unit (whole PDF or page
//!   fragment) failed. Stored inside [`crate::report::Outcome::Error`] so the
//!   batch keeps going and callers can inspect partial success afterwards.
//!
//! The separation lets callers decide their own tolerance: abort on the first
//! unit failure, log and continue, or collect everything for the final report.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdfsift library.
///
/// Unit-level failures use [`UnitError`] and are recorded in
/// [`crate::report::UnitReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum SiftError {
    /// The target is neither a `.pdf` file nor a readable directory.
    #[error("'{path}' is not a PDF file or a directory\nCheck the path exists and ends with .pdf, or point at a folder of PDFs.")]
    InvalidTarget { path: PathBuf },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The output directory could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A non-fatal error for a single processed unit.
///
/// Every variant is terminal for that unit only; the batch loop records it
/// and moves on to the next file or page fragment.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum UnitError {
    /// The converter collaborator returned nothing usable.
    #[error("conversion failed: {detail}")]
    ConversionFailed { detail: String },

    /// Conversion succeeded but the extracted text was empty after trimming.
    #[error("converted text is empty")]
    EmptyText,

    /// The output Markdown file could not be written.
    #[error("failed to save '{path}': {detail}")]
    WriteFailed { path: PathBuf, detail: String },

    /// The page splitter could not produce per-page fragments for this file.
    #[error("failed to split '{path}' into pages")]
    SplitFailed { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_target_display() {
        let e = SiftError::InvalidTarget {
            path: PathBuf::from("/tmp/notes.txt"),
        };
        assert!(e.to_string().contains("/tmp/notes.txt"));
    }

    #[test]
    fn conversion_failed_display() {
        let e = UnitError::ConversionFailed {
            detail: "bad xref".into(),
        };
        assert!(e.to_string().contains("bad xref"));
    }

    #[test]
    fn write_failed_display() {
        let e = UnitError::WriteFailed {
            path: PathBuf::from("/out/a.md"),
            detail: "disk full".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("/out/a.md"));
        assert!(msg.contains("disk full"));
    }
}
