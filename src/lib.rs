//! # pdfsift
//!
//! Batch-convert PDF documents to Markdown, keeping only the files whose
//! converted text matches include/exclude substring filters.
//!
//! ## Why this crate?
//!
//! Converting a folder of PDFs is the easy part; deciding which results are
//! worth keeping is the tedious one. pdfsift runs every PDF through a
//! converter, scans the text line by line against include and exclude lists,
//! and writes a Markdown file only for documents that qualify — with
//! per-file outcomes and timing statistics reported at the end. Multi-page
//! documents can be split into per-page files first, so each page is
//! filtered and kept (or dropped) on its own.
//!
//! ## Pipeline Overview
//!
//! ```text
//! target (file or dir)
//!  │
//!  ├─ 1. Collect  enumerate .pdf files (non-recursive)
//!  ├─ 2. Split    optional: one temp PDF per page (lopdf)
//!  ├─ 3. Convert  PdfConverter collaborator → text (pdf-extract by default)
//!  ├─ 4. Filter   include/exclude line scan, exclude wins
//!  ├─ 5. Write    cleaned UTF-8 Markdown for kept units
//!  └─ 6. Report   kept/error/skipped counts + timing statistics
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfsift::{run_batch, BatchConfig, FilterCriteria};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::builder("out/")
//!         .criteria(FilterCriteria::new(
//!             vec!["invoice".into()],       // keep: any line mentioning an invoice
//!             vec!["draft".into()],         // drop: anything marked draft
//!         ))
//!         .build()?;
//!     let report = run_batch("statements/", &config)?;
//!     println!(
//!         "{} kept, {} skipped, {} errors",
//!         report.stats.processed, report.stats.skipped, report.stats.errors
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfsift` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdfsift = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod postprocess;
pub mod process;
pub mod progress;
pub mod report;
pub mod split;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{collect_targets, run_batch};
pub use config::{BatchConfig, BatchConfigBuilder};
pub use convert::{text_from_rendered, PdfConverter, PdfExtractConverter, RenderedDocument};
pub use error::{SiftError, UnitError};
pub use filter::{find_first_line_with_any, FilterCriteria, FilterDecision, LineMatch};
pub use process::process_unit;
pub use progress::{BatchProgressCallback, ProgressCallback};
pub use report::{BatchReport, BatchStats, Outcome, SkipReason, UnitReport};
pub use split::split_pdf_by_pages;
