//! Page splitting: one temporary single-page PDF per source page.
//!
//! ## Why the empty-vector sentinel?
//!
//! Splitting is best-effort preprocessing. When it fails the whole source
//! file is counted as one error and the batch moves on — so the caller only
//! needs a single "did it work" signal, not an error chain. A failure
//! mid-split deletes every fragment written so far; partial page sets would
//! otherwise be processed as if they were the whole document.
//!
//! Fragments are written to the system temp directory and named
//! `{original_stem}_{page:02}.pdf` (1-based, two digits), so a batch never
//! collides with itself: each source file has a distinct stem and each page a
//! distinct index. The caller owns deletion of the returned paths.

use lopdf::Document;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Split `pdf_path` into per-page PDFs in the system temp directory.
///
/// Returns the fragment paths in page order, or an empty vector when
/// splitting failed (any partial output has been cleaned up). A zero-page
/// document also yields an empty vector and is treated as a failure upstream.
pub fn split_pdf_by_pages(pdf_path: &Path) -> Vec<PathBuf> {
    let mut created = Vec::new();
    match try_split(pdf_path, &mut created) {
        Ok(()) => created,
        Err(err) => {
            warn!("Failed to split '{}': {}", pdf_path.display(), err);
            for fragment in &created {
                let _ = std::fs::remove_file(fragment);
            }
            Vec::new()
        }
    }
}

fn try_split(pdf_path: &Path, created: &mut Vec<PathBuf>) -> Result<(), lopdf::Error> {
    let source = Document::load(pdf_path)?;
    let page_count = source.get_pages().len() as u32;

    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let temp_dir = std::env::temp_dir();

    for page in 1..=page_count {
        // Clone the whole document and drop every other page. Quadratic in
        // page count, but robust: shared resources (fonts, images) referenced
        // by the kept page survive, and prune_objects discards the rest.
        let mut single = source.clone();
        let others: Vec<u32> = (1..=page_count).filter(|&p| p != page).collect();
        if !others.is_empty() {
            single.delete_pages(&others);
        }
        single.prune_objects();

        let fragment = temp_dir.join(format!("{stem}_{page:02}.pdf"));
        single.save(&fragment)?;
        debug!("Wrote page {} → {}", page, fragment.display());
        created.push(fragment);
    }

    Ok(())
}
