//! Per-unit outcomes and batch-level bookkeeping.
//!
//! The original tool encoded outcomes as a bare `1 / 0 / -1` integer plus a
//! free-text reason. Here the outcome is a tagged [`Outcome`] variant carrying
//! structured reasons: callers can match on *why* a file was skipped instead
//! of parsing a message, and the CLI formats reasons through `Display`.

use crate::error::UnitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Why a unit was skipped rather than kept.
///
/// Skips are expected behaviour (the filter doing its job, or a source file
/// that vanished between listing and processing), not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// A line of the converted text contained an excluded substring.
    ContainsExcluded { needle: String, line: String },
    /// No line of the converted text contained any include substring.
    NoIncludeMatch,
    /// The source file does not exist.
    FileMissing,
    /// The source file exists but cannot be opened for reading.
    FileUnreadable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ContainsExcluded { needle, .. } => {
                write!(f, "contains excluded text: {needle}")
            }
            SkipReason::NoIncludeMatch => write!(f, "no filter text matched"),
            SkipReason::FileMissing => write!(f, "file does not exist"),
            SkipReason::FileUnreadable => write!(f, "file is not readable"),
        }
    }
}

/// The tri-state result of processing one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    /// The text passed the filter and the Markdown file was written.
    Kept,
    /// The text failed the filter (or the file was missing); nothing written.
    Skipped(SkipReason),
    /// Conversion, splitting, or writing failed.
    Error(UnitError),
}

impl Outcome {
    pub fn is_kept(&self) -> bool {
        matches!(self, Outcome::Kept)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// Human-readable reason, `None` for a kept unit.
    pub fn detail(&self) -> Option<String> {
        match self {
            Outcome::Kept => None,
            Outcome::Skipped(reason) => Some(reason.to_string()),
            Outcome::Error(err) => Some(err.to_string()),
        }
    }
}

/// One processed unit: a whole PDF, or a single page fragment in split mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitReport {
    /// Path of the processed unit (the temp fragment path in split mode).
    pub path: PathBuf,
    pub outcome: Outcome,
    /// End-to-end processing time for this unit.
    pub elapsed: Duration,
}

/// Running counters and timing samples for one batch run.
///
/// Created at batch start, mutated once per unit, reported once at the end.
/// In split mode the per-page times of one source file are summed into a
/// single entry of `file_times`, so the min/max/mean statistics stay
/// per-source-file regardless of splitting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Units kept (converted and written).
    pub processed: usize,
    /// Units that failed (conversion, split, or write).
    pub errors: usize,
    /// Units skipped by the filter or missing on disk.
    pub skipped: usize,
    /// One elapsed-time sample per source file, in processing order.
    pub file_times: Vec<Duration>,
    /// Wall-clock time for the whole batch.
    pub total_duration: Duration,
}

impl BatchStats {
    /// Bump the counter matching `outcome`.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Kept => self.processed += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Error(_) => self.errors += 1,
        }
    }

    /// Total number of units that produced an outcome.
    pub fn total_units(&self) -> usize {
        self.processed + self.errors + self.skipped
    }

    /// Mean per-file time, or zero when nothing was timed.
    pub fn mean_time(&self) -> Duration {
        if self.file_times.is_empty() {
            return Duration::ZERO;
        }
        self.file_times.iter().copied().sum::<Duration>() / self.file_times.len() as u32
    }

    /// Shortest per-file time, or zero when nothing was timed.
    pub fn min_time(&self) -> Duration {
        self.file_times.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Longest per-file time, or zero when nothing was timed.
    pub fn max_time(&self) -> Duration {
        self.file_times.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Kept units as a percentage of all units; 0.0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        let total = self.total_units();
        if total == 0 {
            return 0.0;
        }
        self.processed as f64 / total as f64 * 100.0
    }
}

/// Everything [`crate::batch::run_batch`] produces: every unit report in
/// processing order plus the aggregate statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub units: Vec<UnitReport>,
    pub stats: BatchStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_each_state() {
        let mut stats = BatchStats::default();
        stats.record(&Outcome::Kept);
        stats.record(&Outcome::Kept);
        stats.record(&Outcome::Skipped(SkipReason::NoIncludeMatch));
        stats.record(&Outcome::Error(UnitError::EmptyText));
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.total_units(), 4);
    }

    #[test]
    fn success_rate_guards_division_by_zero() {
        let stats = BatchStats::default();
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn success_rate_percentage() {
        let mut stats = BatchStats::default();
        stats.record(&Outcome::Kept);
        stats.record(&Outcome::Skipped(SkipReason::FileMissing));
        assert!((stats.success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn timing_statistics() {
        let mut stats = BatchStats::default();
        stats.file_times.push(Duration::from_millis(100));
        stats.file_times.push(Duration::from_millis(300));
        assert_eq!(stats.mean_time(), Duration::from_millis(200));
        assert_eq!(stats.min_time(), Duration::from_millis(100));
        assert_eq!(stats.max_time(), Duration::from_millis(300));
    }

    #[test]
    fn timing_statistics_empty() {
        let stats = BatchStats::default();
        assert_eq!(stats.mean_time(), Duration::ZERO);
        assert_eq!(stats.min_time(), Duration::ZERO);
        assert_eq!(stats.max_time(), Duration::ZERO);
    }

    #[test]
    fn skip_reason_display() {
        let r = SkipReason::ContainsExcluded {
            needle: "draft".into(),
            line: "DRAFT COPY".into(),
        };
        assert_eq!(r.to_string(), "contains excluded text: draft");
        assert_eq!(SkipReason::NoIncludeMatch.to_string(), "no filter text matched");
    }

    #[test]
    fn outcome_detail() {
        assert_eq!(Outcome::Kept.detail(), None);
        let skipped = Outcome::Skipped(SkipReason::NoIncludeMatch);
        assert_eq!(skipped.detail().as_deref(), Some("no filter text matched"));
    }
}
