//! Page source abstraction
//!
//! The extractor only needs per-page text and per-page images, so it works
//! against this trait rather than MuPDF directly.

use super::parser::PdfParseError;

/// A paged document that can yield text and rasterized pages
pub trait PageSource {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Embedded text of a page (1-indexed)
    fn page_text(&self, page: usize) -> Result<String, PdfParseError>;

    /// Page rendered to PNG bytes at the given resolution (1-indexed)
    fn render_page_png(&self, page: usize, dpi: u32) -> Result<Vec<u8>, PdfParseError>;
}
