//! Batch orchestration: enumerate targets, process each, aggregate a report.
//!
//! ## Failure isolation
//!
//! The loop's invariant is that no single file can abort the batch. Missing
//! or unreadable files are counted as skipped; a split failure is one error
//! for that file; a unit failure is one error for that unit. Everything else
//! keeps running, and the final report is produced even when every unit
//! failed.
//!
//! Processing is fully sequential: one file (and in split mode, one page
//! fragment) at a time, synchronously. The output directory has a single
//! writer and temp fragments have per-file unique names, so no locking is
//! needed anywhere.

use crate::config::BatchConfig;
use crate::convert::PdfConverter;
use crate::error::{SiftError, UnitError};
use crate::process::process_unit;
use crate::report::{BatchReport, Outcome, SkipReason, UnitReport};
use crate::split::split_pdf_by_pages;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Run one batch over `target` (a `.pdf` file or a directory of PDFs).
///
/// Returns the full report on success. Only setup problems are fatal: an
/// invalid target or an output directory that cannot be created. An empty
/// target directory is not an error — it yields an empty report.
pub fn run_batch(
    target: impl AsRef<Path>,
    config: &BatchConfig,
) -> Result<BatchReport, SiftError> {
    let target = target.as_ref();
    let batch_start = Instant::now();

    let pdf_files = collect_targets(target)?;
    if pdf_files.is_empty() {
        warn!("No PDF files found in '{}'", target.display());
        return Ok(BatchReport::default());
    }
    info!("Processing {} PDF file(s) from '{}'", pdf_files.len(), target.display());

    std::fs::create_dir_all(&config.output_dir).map_err(|source| {
        SiftError::OutputDirFailed {
            path: config.output_dir.clone(),
            source,
        }
    })?;

    let converter = config.converter_or_default();

    if let Some(cb) = &config.progress_callback {
        cb.on_batch_start(pdf_files.len());
    }

    let mut report = BatchReport::default();
    for (index, pdf_path) in pdf_files.iter().enumerate() {
        let file_name = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| pdf_path.display().to_string());
        if let Some(cb) = &config.progress_callback {
            cb.on_file_start(&file_name, index, pdf_files.len());
        }
        info!("Processing: {}", file_name);

        process_file(pdf_path, config, converter.as_ref(), &mut report);
    }

    report.stats.total_duration = batch_start.elapsed();
    if let Some(cb) = &config.progress_callback {
        cb.on_batch_complete(&report.stats);
    }

    info!(
        "Batch complete: {} kept, {} errors, {} skipped in {:?}",
        report.stats.processed, report.stats.errors, report.stats.skipped,
        report.stats.total_duration
    );

    Ok(report)
}

/// Resolve the target into an ordered list of PDF paths.
///
/// A single file must carry a `.pdf` extension (case-insensitive); a
/// directory contributes its directly contained `.pdf` files, sorted by path
/// for deterministic processing order. No recursion.
pub fn collect_targets(target: &Path) -> Result<Vec<PathBuf>, SiftError> {
    if target.is_file() {
        if has_pdf_extension(target) {
            return Ok(vec![target.to_path_buf()]);
        }
        return Err(SiftError::InvalidTarget {
            path: target.to_path_buf(),
        });
    }

    if target.is_dir() {
        let entries = std::fs::read_dir(target).map_err(|_| SiftError::InvalidTarget {
            path: target.to_path_buf(),
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_pdf_extension(path))
            .collect();
        files.sort();
        return Ok(files);
    }

    Err(SiftError::InvalidTarget {
        path: target.to_path_buf(),
    })
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Handle one source file: readability check, optional split, processing.
///
/// Always records at least one outcome for the file. Timing samples are
/// per source file — in split mode the fragment times are summed first.
fn process_file(
    pdf_path: &Path,
    config: &BatchConfig,
    converter: &dyn PdfConverter,
    report: &mut BatchReport,
) {
    // Existence and read permission, checked by opening. The file list may
    // be stale by the time we get here.
    if let Err(err) = std::fs::File::open(pdf_path) {
        let reason = if err.kind() == std::io::ErrorKind::NotFound {
            warn!("File does not exist: {}", pdf_path.display());
            SkipReason::FileMissing
        } else {
            warn!("File is not readable: {}", pdf_path.display());
            SkipReason::FileUnreadable
        };
        record(
            report,
            config,
            UnitReport {
                path: pdf_path.to_path_buf(),
                outcome: Outcome::Skipped(reason),
                elapsed: Duration::ZERO,
            },
        );
        return;
    }

    if !config.split_by_page {
        let unit = process_unit(
            pdf_path,
            &config.output_dir,
            &config.criteria,
            converter,
            &config.suffix,
        );
        report.stats.file_times.push(unit.elapsed);
        record(report, config, unit);
        return;
    }

    debug!("Splitting into pages: {}", pdf_path.display());
    let fragments = split_pdf_by_pages(pdf_path);
    if fragments.is_empty() {
        warn!("Failed to split: {}", pdf_path.display());
        record(
            report,
            config,
            UnitReport {
                path: pdf_path.to_path_buf(),
                outcome: Outcome::Error(UnitError::SplitFailed {
                    path: pdf_path.to_path_buf(),
                }),
                elapsed: Duration::ZERO,
            },
        );
        return;
    }

    let mut pages_elapsed = Duration::ZERO;
    for fragment in &fragments {
        let unit = process_unit(
            fragment,
            &config.output_dir,
            &config.criteria,
            converter,
            &config.suffix,
        );
        // Fragment cleanup is unconditional and best-effort.
        let _ = std::fs::remove_file(fragment);
        pages_elapsed += unit.elapsed;
        record(report, config, unit);
    }
    report.stats.file_times.push(pages_elapsed);
}

fn record(report: &mut BatchReport, config: &BatchConfig, unit: UnitReport) {
    report.stats.record(&unit.outcome);
    if let Some(cb) = &config.progress_callback {
        cb.on_unit_complete(&unit);
    }
    report.units.push(unit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(has_pdf_extension(Path::new("a.pdf")));
        assert!(has_pdf_extension(Path::new("a.PDF")));
        assert!(has_pdf_extension(Path::new("a.Pdf")));
        assert!(!has_pdf_extension(Path::new("a.txt")));
        assert!(!has_pdf_extension(Path::new("pdf")));
    }

    #[test]
    fn collect_rejects_non_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "hi").unwrap();
        assert!(matches!(
            collect_targets(&txt),
            Err(SiftError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn collect_rejects_missing_path() {
        assert!(matches!(
            collect_targets(Path::new("/no/such/place")),
            Err(SiftError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn collect_lists_only_pdfs_sorted_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.pdf"), "x").unwrap();
        std::fs::write(dir.path().join("a.PDF"), "x").unwrap();
        std::fs::write(dir.path().join("c.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/d.pdf"), "x").unwrap();

        let files = collect_targets(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn collect_accepts_single_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("one.pdf");
        std::fs::write(&pdf, "x").unwrap();
        assert_eq!(collect_targets(&pdf).unwrap(), vec![pdf]);
    }
}
