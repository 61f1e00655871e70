//! Configuration for a batch run.
//!
//! All behaviour is controlled through [`BatchConfig`], built via its
//! [`BatchConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to pass a run's setup around, log it, and diff two runs to understand why
//! their outputs differ.

use crate::convert::{PdfConverter, PdfExtractConverter};
use crate::error::SiftError;
use crate::filter::FilterCriteria;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for one batch run.
///
/// Built via [`BatchConfig::builder`].
///
/// # Example
/// ```rust
/// use pdfsift::{BatchConfig, FilterCriteria};
///
/// let config = BatchConfig::builder("out/")
///     .criteria(FilterCriteria::new(vec!["invoice".into()], vec![]))
///     .split_by_page(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Directory the Markdown files are written to. Created if missing.
    pub output_dir: PathBuf,

    /// Include/exclude filter criteria. Default: empty (keep everything).
    pub criteria: FilterCriteria,

    /// Split each source PDF into per-page fragments before converting.
    /// Default: false.
    pub split_by_page: bool,

    /// Suffix appended to output base names (idempotently). Default: empty.
    ///
    /// Always caller-supplied; page fragments already carry their page number
    /// in the filename, and the idempotence rule in the processor keeps a
    /// matching suffix from doubling up.
    pub suffix: String,

    /// Converter collaborator. `None` falls back to [`PdfExtractConverter`].
    pub converter: Option<Arc<dyn PdfConverter>>,

    /// Progress callback for batch events. `None` disables reporting.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("output_dir", &self.output_dir)
            .field("criteria", &self.criteria)
            .field("split_by_page", &self.split_by_page)
            .field("suffix", &self.suffix)
            .field("converter", &self.converter.as_ref().map(|_| "<dyn PdfConverter>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl BatchConfig {
    /// Create a new builder writing output into `output_dir`.
    pub fn builder(output_dir: impl Into<PathBuf>) -> BatchConfigBuilder {
        BatchConfigBuilder {
            config: BatchConfig {
                output_dir: output_dir.into(),
                criteria: FilterCriteria::default(),
                split_by_page: false,
                suffix: String::new(),
                converter: None,
                progress_callback: None,
            },
        }
    }

    /// The configured converter, or the bundled pdf-extract one.
    pub fn converter_or_default(&self) -> Arc<dyn PdfConverter> {
        match &self.converter {
            Some(converter) => Arc::clone(converter),
            None => Arc::new(PdfExtractConverter),
        }
    }
}

/// Builder for [`BatchConfig`].
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    pub fn criteria(mut self, criteria: FilterCriteria) -> Self {
        self.config.criteria = criteria;
        self
    }

    pub fn split_by_page(mut self, v: bool) -> Self {
        self.config.split_by_page = v;
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.suffix = suffix.into();
        self
    }

    pub fn converter(mut self, converter: Arc<dyn PdfConverter>) -> Self {
        self.config.converter = Some(converter);
        self
    }

    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BatchConfig, SiftError> {
        let c = &self.config;
        if c.output_dir.as_os_str().is_empty() {
            return Err(SiftError::InvalidConfig(
                "output directory must not be empty".into(),
            ));
        }
        if c.suffix.contains('/') || c.suffix.contains('\\') {
            return Err(SiftError::InvalidConfig(format!(
                "suffix must not contain path separators, got '{}'",
                c.suffix
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = BatchConfig::builder("out").build().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.criteria.is_empty());
        assert!(!config.split_by_page);
        assert!(config.suffix.is_empty());
        assert!(config.converter.is_none());
    }

    #[test]
    fn empty_output_dir_rejected() {
        let result = BatchConfig::builder("").build();
        assert!(matches!(result, Err(SiftError::InvalidConfig(_))));
    }

    #[test]
    fn suffix_with_separator_rejected() {
        let result = BatchConfig::builder("out").suffix("a/b").build();
        assert!(matches!(result, Err(SiftError::InvalidConfig(_))));
    }

    #[test]
    fn debug_does_not_require_debug_converter() {
        let config = BatchConfig::builder("out")
            .converter(Arc::new(crate::convert::PdfExtractConverter))
            .build()
            .unwrap();
        let repr = format!("{config:?}");
        assert!(repr.contains("<dyn PdfConverter>"));
    }
}
