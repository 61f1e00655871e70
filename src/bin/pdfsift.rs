//! CLI binary for pdfsift.
//!
//! A thin shim over the library crate that maps CLI flags to `BatchConfig`
//! and prints per-unit outcomes plus the final report.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfsift::{
    run_batch, BatchConfig, BatchProgressCallback, BatchStats, FilterCriteria, Outcome,
    ProgressCallback, UnitReport,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

/// Format a duration like `1m 23.4s` / `12.3s`.
fn fmt_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs >= 60.0 {
        format!("{}m {:.1}s", (secs / 60.0) as u64, secs % 60.0)
    } else {
        format!("{secs:.1}s")
    }
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a per-file progress bar anchored at the
/// bottom, with one log line per processed unit printed above it.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl BatchProgressCallback for CliProgress {
    fn on_batch_start(&self, total_files: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_files as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Sifting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_files} PDF file(s)…"))
        ));
    }

    fn on_file_start(&self, file_name: &str, _index: usize, _total_files: usize) {
        self.bar.set_message(file_name.to_string());
    }

    fn on_unit_complete(&self, report: &UnitReport) {
        let name = report
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.path.display().to_string());
        let line = match &report.outcome {
            Outcome::Kept => format!(
                "  {} {:<40}  {}",
                green("✓"),
                name,
                dim(&fmt_duration(report.elapsed)),
            ),
            Outcome::Skipped(reason) => format!(
                "  {} {:<40}  {}  {}",
                yellow("↷"),
                name,
                yellow(&reason.to_string()),
                dim(&fmt_duration(report.elapsed)),
            ),
            Outcome::Error(err) => format!(
                "  {} {:<40}  {}  {}",
                red("✗"),
                name,
                red(&err.to_string()),
                dim(&fmt_duration(report.elapsed)),
            ),
        };
        self.bar.println(line);
    }

    fn on_batch_complete(&self, stats: &BatchStats) {
        // Advance to full before clearing so the elapsed readout is honest.
        self.bar.set_position(stats.file_times.len() as u64);
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every PDF in a folder
  pdfsift statements/ -o out/

  # Keep only files mentioning an invoice
  pdfsift statements/ -o out/ --filter-texts invoice

  # Keep invoices, drop drafts (exclusion wins)
  pdfsift statements/ -o out/ --filter-texts invoice --filter-without-texts draft

  # Several include terms: any match keeps the file
  pdfsift in.pdf -o out/ --filter-texts invoice --filter-texts receipt

  # One Markdown file per page
  pdfsift book.pdf -o out/ --split-by-page

  # Machine-readable report
  pdfsift statements/ -o out/ --json > report.json

FILTER SEMANTICS:
  Matching is case-insensitive substring search, line by line.
  --filter-without-texts is checked first and always wins: a single excluded
  line disqualifies the file even when an include term also matches.
  With no filter options at all, every PDF is converted and kept.

  --filter-text / --filter-without are the legacy single-value spellings and
  are merged into the list options.
"#;

/// Batch-convert PDFs to Markdown with include/exclude text filtering.
#[derive(Parser, Debug)]
#[command(
    name = "pdfsift",
    version,
    about = "Batch-convert PDFs to Markdown, keeping only files whose text matches filters",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// A PDF file, or a directory containing PDF files (non-recursive).
    target: PathBuf,

    /// Directory to write the Markdown files to (created if missing).
    #[arg(short, long, env = "PDFSIFT_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Keep files containing this text (legacy single-value form).
    #[arg(long)]
    filter_text: Option<String>,

    /// Drop files containing this text (legacy single-value form).
    #[arg(long)]
    filter_without: Option<String>,

    /// Keep files whose text contains any of these values (repeatable).
    #[arg(long = "filter-texts", value_name = "TEXT")]
    filter_texts: Vec<String>,

    /// Drop files whose text contains any of these values (repeatable).
    #[arg(long = "filter-without-texts", value_name = "TEXT")]
    filter_without_texts: Vec<String>,

    /// Split each PDF into single pages before converting.
    #[arg(long, env = "PDFSIFT_SPLIT_BY_PAGE")]
    split_by_page: bool,

    /// Suffix appended to output file names (applied at most once).
    #[arg(long, default_value = "")]
    suffix: String,

    /// Print the full report as JSON instead of the text summary.
    #[arg(long, env = "PDFSIFT_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PDFSIFT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFSIFT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFSIFT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Library INFO logs duplicate the per-unit lines the progress callback
    // prints, so suppress them while the bar is active.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let criteria = FilterCriteria::with_legacy(
        cli.filter_texts.clone(),
        cli.filter_without_texts.clone(),
        cli.filter_text.clone(),
        cli.filter_without.clone(),
    );

    if !cli.quiet && !cli.json {
        if !criteria.include().is_empty() {
            eprintln!("Filter texts:  {}", criteria.include().join(", "));
        }
        if !criteria.exclude().is_empty() {
            eprintln!("Exclude texts: {}", criteria.exclude().join(", "));
        }
    }

    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgress::new() as ProgressCallback)
    } else {
        None
    };

    let mut builder = BatchConfig::builder(&cli.output_dir)
        .criteria(criteria)
        .split_by_page(cli.split_by_page)
        .suffix(cli.suffix.clone());
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run batch ────────────────────────────────────────────────────────
    let report = run_batch(&cli.target, &config).context("Batch failed")?;

    // ── Report ───────────────────────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
        return Ok(());
    }

    if report.units.is_empty() {
        if !cli.quiet {
            eprintln!(
                "{} No PDF files found in '{}'",
                yellow("⚠"),
                cli.target.display()
            );
        }
        return Ok(());
    }

    if !cli.quiet {
        let stats = &report.stats;
        println!("\nDone:");
        println!("  kept:     {}", bold(&stats.processed.to_string()));
        println!("  errors:   {}", stats.errors);
        println!("  skipped:  {}", stats.skipped);
        println!("  total time:   {}", fmt_duration(stats.total_duration));
        println!("  mean per file: {}", fmt_duration(stats.mean_time()));
        println!("  min per file:  {}", fmt_duration(stats.min_time()));
        println!("  max per file:  {}", fmt_duration(stats.max_time()));
        println!("  success rate: {:.2}%", stats.success_rate());
    }

    Ok(())
}
