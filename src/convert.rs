//! The converter seam: turning a PDF path into Markdown text.
//!
//! Conversion is delegated to a collaborator behind [`PdfConverter`] so the
//! batch logic never depends on a concrete extraction engine. The bundled
//! [`PdfExtractConverter`] uses the `pdf-extract` crate; tests and embedders
//! inject their own implementation through
//! [`crate::config::BatchConfigBuilder::converter`].

use crate::error::UnitError;
use std::path::Path;

/// The rendered result of converting one PDF.
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    /// Markdown (or plain text) body of the document.
    pub markdown: String,
}

/// Extract the plain text from a rendered document.
pub fn text_from_rendered(rendered: &RenderedDocument) -> &str {
    &rendered.markdown
}

/// A callable that converts one PDF file into a [`RenderedDocument`].
///
/// Implementations must be `Send + Sync`; the batch holds one instance for
/// its whole run.
pub trait PdfConverter: Send + Sync {
    fn convert(&self, pdf_path: &Path) -> Result<RenderedDocument, UnitError>;
}

/// Default converter backed by the `pdf-extract` crate.
///
/// Extracts the embedded text layer only; scanned documents without a text
/// layer come back empty and are reported as such by the processor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractConverter;

impl PdfConverter for PdfExtractConverter {
    fn convert(&self, pdf_path: &Path) -> Result<RenderedDocument, UnitError> {
        let text = pdf_extract::extract_text(pdf_path).map_err(|e| {
            UnitError::ConversionFailed {
                detail: e.to_string(),
            }
        })?;
        Ok(RenderedDocument { markdown: text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_from_rendered_returns_body() {
        let rendered = RenderedDocument {
            markdown: "# Title\nbody".into(),
        };
        assert_eq!(text_from_rendered(&rendered), "# Title\nbody");
    }

    #[test]
    fn pdf_extract_converter_reports_failure_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not-a-pdf.pdf");
        std::fs::write(&bogus, b"definitely not a pdf").unwrap();
        let result = PdfExtractConverter.convert(&bogus);
        assert!(matches!(
            result,
            Err(UnitError::ConversionFailed { .. })
        ));
    }
}
