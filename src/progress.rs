//! Progress-callback trait for batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::BatchConfigBuilder::progress_callback`] to receive events
//! as the batch processes each unit. The CLI uses this to drive its progress
//! bar; embedders can forward events to whatever channel their host
//! application uses, without the library knowing anything about it.
//!
//! All methods have default no-op implementations so callers only override
//! what they care about. Processing is sequential, so implementations are
//! never called concurrently; the `Send + Sync` bound only exists so a
//! callback can be shared across threads by the host.

use crate::report::{BatchStats, UnitReport};
use std::sync::Arc;

/// Called by the batch orchestrator as it processes files and units.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before any file is processed.
    fn on_batch_start(&self, _total_files: usize) {}

    /// Called when a source file is about to be processed.
    /// `index` is 0-based within `total_files`.
    fn on_file_start(&self, _file_name: &str, _index: usize, _total_files: usize) {}

    /// Called after each unit (whole file, or one page fragment) finishes,
    /// whatever its outcome.
    fn on_unit_complete(&self, _report: &UnitReport) {}

    /// Called once after the last file, with the final statistics.
    fn on_batch_complete(&self, _stats: &BatchStats) {}
}

/// Convenience alias for the shared-callback type stored in the config.
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
