//! Text extractor with OCR fallback

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::ocr::{OcrError, OcrService};
use crate::pdf::{PageSource, PdfParser};

/// Where the extracted text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    /// Embedded text layer
    TextLayer,
    /// OCR of rasterized pages
    Ocr,
}

/// Result of extracting a document
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub source: TextSource,
    pub page_count: usize,
}

/// Extracts document text, preferring the text layer over OCR
pub struct TextExtractor<'a> {
    ocr: &'a OcrService,
    /// Rasterization resolution for the OCR fallback
    dpi: u32,
}

impl<'a> TextExtractor<'a> {
    pub fn new(ocr: &'a OcrService, dpi: u32) -> Self {
        Self { ocr, dpi }
    }

    /// Extract all text from a paged source
    ///
    /// Pages with an empty text layer are skipped with a warning. OCR runs
    /// only when no page yielded any text.
    pub async fn extract<S: PageSource + ?Sized>(&self, source: &S) -> Result<ExtractedText> {
        let page_count = source.page_count();
        let text = self.text_layer(source)?;

        if !text.is_empty() {
            return Ok(ExtractedText {
                text,
                source: TextSource::TextLayer,
                page_count,
            });
        }

        tracing::info!("No text extracted from text layer. Switching to OCR.");
        let text = self.ocr_pages(source).await?;

        Ok(ExtractedText {
            text,
            source: TextSource::Ocr,
            page_count,
        })
    }

    fn text_layer<S: PageSource + ?Sized>(&self, source: &S) -> Result<String> {
        let mut extracted = String::new();

        for page in 1..=source.page_count() {
            let page_text = source.page_text(page)?;
            if page_text.trim().is_empty() {
                tracing::warn!("No text extracted from page {}", page);
            } else {
                extracted.push_str(&page_text);
            }
        }

        Ok(extracted)
    }

    async fn ocr_pages<S: PageSource + ?Sized>(&self, source: &S) -> Result<String> {
        let mut extracted = String::new();

        for page in 1..=source.page_count() {
            let image = source.render_page_png(page, self.dpi).map_err(|e| {
                OcrError::ImageExtractionError(format!("page {}: {}", page, e))
            })?;
            let result = self.ocr.recognize(&image, None, None).await?;
            tracing::debug!(
                "OCR page {} via {:?}: {} chars",
                page,
                result.provider,
                result.text.chars().count()
            );
            extracted.push_str(&result.text);
        }

        Ok(extracted)
    }
}

/// Open a PDF from disk and extract its text
pub async fn extract_pdf_text(
    path: impl AsRef<Path>,
    ocr: &OcrService,
    dpi: u32,
) -> Result<ExtractedText> {
    let parser = PdfParser::from_path(path)?;
    TextExtractor::new(ocr, dpi).extract(&parser).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::error::AppError;
    use crate::ocr::{MockProvider, OcrProvider, OcrServiceConfig};
    use crate::pdf::fixtures::minimal_pdf;
    use crate::pdf::PdfParseError;

    /// Page source with fixed per-page text that counts renders
    struct ScriptedSource {
        pages: Vec<&'static str>,
        renders: AtomicUsize,
        fail_render: bool,
    }

    impl ScriptedSource {
        fn new(pages: &[&'static str]) -> Self {
            Self {
                pages: pages.to_vec(),
                renders: AtomicUsize::new(0),
                fail_render: false,
            }
        }
    }

    impl PageSource for ScriptedSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_text(&self, page: usize) -> std::result::Result<String, PdfParseError> {
            self.pages
                .get(page - 1)
                .map(|t| t.to_string())
                .ok_or(PdfParseError::PageNotFound(page, self.pages.len()))
        }

        fn render_page_png(
            &self,
            page: usize,
            _dpi: u32,
        ) -> std::result::Result<Vec<u8>, PdfParseError> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            if self.fail_render {
                return Err(PdfParseError::ImageError("encoder failed".to_string()));
            }
            Ok(format!("png-{}", page).into_bytes())
        }
    }

    fn service_with(mock: Arc<MockProvider>) -> OcrService {
        OcrService::with_providers(OcrServiceConfig::default(), vec![mock])
    }

    #[tokio::test]
    async fn test_text_layer_skips_ocr() {
        let mock = Arc::new(MockProvider::new(OcrProvider::Tesseract, &["ocr"]));
        let ocr = service_with(mock.clone());
        let source = ScriptedSource::new(&["Page one.", "", "Page three."]);

        let extracted = TextExtractor::new(&ocr, 200).extract(&source).await.unwrap();

        assert_eq!(extracted.text, "Page one.Page three.");
        assert_eq!(extracted.source, TextSource::TextLayer);
        assert_eq!(extracted.page_count, 3);
        assert_eq!(mock.call_count(), 0);
        assert_eq!(source.renders.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_text_layer_falls_back_to_ocr() {
        let mock = Arc::new(MockProvider::new(OcrProvider::Tesseract, &["first\n", "second\n"]));
        let ocr = service_with(mock.clone());
        let source = ScriptedSource::new(&["", "  \n"]);

        let extracted = TextExtractor::new(&ocr, 200).extract(&source).await.unwrap();

        assert_eq!(extracted.text, "first\nsecond\n");
        assert_eq!(extracted.source, TextSource::Ocr);
        assert_eq!(mock.call_count(), 2);
        assert_eq!(source.renders.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_document_without_pages() {
        let mock = Arc::new(MockProvider::new(OcrProvider::Tesseract, &["never"]));
        let ocr = service_with(mock.clone());
        let source = ScriptedSource::new(&[]);

        let extracted = TextExtractor::new(&ocr, 200).extract(&source).await.unwrap();

        assert!(extracted.text.is_empty());
        assert_eq!(extracted.source, TextSource::Ocr);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_ocr_failure_propagates() {
        let mut failing = MockProvider::new(OcrProvider::Tesseract, &["unused"]);
        failing.fail = true;
        let ocr = service_with(Arc::new(failing));
        let source = ScriptedSource::new(&[""]);

        let result = TextExtractor::new(&ocr, 200).extract(&source).await;

        assert!(matches!(result, Err(AppError::Ocr(_))));
    }

    #[tokio::test]
    async fn test_render_failure_is_image_extraction_error() {
        let mock = Arc::new(MockProvider::new(OcrProvider::Tesseract, &["unused"]));
        let ocr = service_with(mock.clone());
        let mut source = ScriptedSource::new(&["", ""]);
        source.fail_render = true;

        let result = TextExtractor::new(&ocr, 200).extract(&source).await;

        assert!(matches!(
            result,
            Err(AppError::Ocr(OcrError::ImageExtractionError(msg))) if msg.starts_with("page 1:")
        ));
        assert_eq!(source.renders.load(Ordering::SeqCst), 1);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extracts_real_pdf_text_layer() {
        let mock = Arc::new(MockProvider::new(OcrProvider::Tesseract, &["ocr"]));
        let ocr = service_with(mock.clone());
        let parser = PdfParser::from_bytes(&minimal_pdf(&[Some("Alpha"), None, Some("Beta")])).unwrap();

        let extracted = TextExtractor::new(&ocr, 200).extract(&parser).await.unwrap();

        assert_eq!(extracted.source, TextSource::TextLayer);
        assert!(extracted.text.contains("Alpha"));
        assert!(extracted.text.contains("Beta"));
        assert!(extracted.text.find("Alpha") < extracted.text.find("Beta"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_image_only_pdf_uses_ocr() {
        let mock = Arc::new(MockProvider::new(OcrProvider::Tesseract, &["scanned text"]));
        let ocr = service_with(mock.clone());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, minimal_pdf(&[None])).unwrap();

        let extracted = extract_pdf_text(&path, &ocr, 72).await.unwrap();

        assert_eq!(extracted.text, "scanned text");
        assert_eq!(extracted.source, TextSource::Ocr);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_pdf_is_an_error() {
        let ocr = OcrService::with_providers(OcrServiceConfig::default(), Vec::new());

        let result = extract_pdf_text("/nonexistent/missing.pdf", &ocr, 200).await;

        assert!(matches!(result, Err(AppError::Pdf(_))));
    }
}
