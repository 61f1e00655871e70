//! Per-unit processing: convert one PDF (or page fragment), filter, write.
//!
//! This is the decision table at the heart of the tool. Every unit flows
//! through the same steps — convert, check for empty text, compute the output
//! path, filter, write — and every exit produces exactly one [`Outcome`]
//! with an end-to-end elapsed time. Nothing here panics or propagates: the
//! batch loop relies on each unit yielding a report no matter what.

use crate::convert::{text_from_rendered, PdfConverter};
use crate::error::UnitError;
use crate::filter::{FilterCriteria, FilterDecision};
use crate::postprocess;
use crate::report::{Outcome, UnitReport};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Process one unit end to end and report the outcome with its timing.
///
/// `suffix` is appended to the output file's base name unless the base name
/// already ends with it — page fragments carry their page number in the
/// filename, so re-appending would double it up.
pub fn process_unit(
    unit_path: &Path,
    output_dir: &Path,
    criteria: &FilterCriteria,
    converter: &dyn PdfConverter,
    suffix: &str,
) -> UnitReport {
    let start = Instant::now();
    let outcome = run(unit_path, output_dir, criteria, converter, suffix);
    UnitReport {
        path: unit_path.to_path_buf(),
        outcome,
        elapsed: start.elapsed(),
    }
}

fn run(
    unit_path: &Path,
    output_dir: &Path,
    criteria: &FilterCriteria,
    converter: &dyn PdfConverter,
    suffix: &str,
) -> Outcome {
    let rendered = match converter.convert(unit_path) {
        Ok(rendered) => rendered,
        Err(err) => {
            info!("Conversion failed for '{}': {}", unit_path.display(), err);
            return Outcome::Error(err);
        }
    };

    let text = text_from_rendered(&rendered);
    if text.trim().is_empty() {
        info!("Converted text is empty: {}", unit_path.display());
        return Outcome::Error(UnitError::EmptyText);
    }
    // Filter and write see the same cleaned text; invisible characters in
    // the raw extraction would otherwise defeat substring matching.
    let text = postprocess::clean_text(text);

    let out_path = output_path_for(unit_path, output_dir, suffix);

    match criteria.evaluate(&text) {
        FilterDecision::Pass { evidence } => {
            if let Some(hit) = evidence {
                info!(
                    "Matched filter text '{}' on line: {}",
                    hit.needle, hit.line
                );
            }
            debug!("Saving to: {}", out_path.display());
            match std::fs::write(&out_path, &text) {
                Ok(()) => {
                    info!("Converted and saved: {}", out_path.display());
                    Outcome::Kept
                }
                Err(err) => Outcome::Error(UnitError::WriteFailed {
                    path: out_path,
                    detail: err.to_string(),
                }),
            }
        }
        FilterDecision::Reject(reason) => {
            info!("Skipping '{}': {}", unit_path.display(), reason);
            Outcome::Skipped(reason)
        }
    }
}

/// Compute the output Markdown path: input stem + `suffix` + `.md` under
/// `output_dir`. Suffixing is idempotent — a stem that already ends with
/// `suffix` is left alone.
fn output_path_for(unit_path: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = unit_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = if !suffix.is_empty() && stem.ends_with(suffix) {
        stem
    } else {
        format!("{stem}{suffix}")
    };
    output_dir.join(format!("{base}.md"))
}
