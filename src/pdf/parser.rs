//! PDF parsing using MuPDF
//!
//! Provides text-layer extraction and page rasterization. Each operation
//! opens a fresh document because MuPDF's `fz_context` is not thread-safe
//! and `Document` is not `Send`.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use mupdf::{Colorspace, Document, Matrix};
use thiserror::Error;

use super::source::PageSource;
use super::types::PageRenderRequest;

/// PDF parsing errors
#[derive(Error, Debug)]
pub enum PdfParseError {
    #[error("Failed to load PDF {0}: {1}")]
    LoadError(String, String),
    #[error("Page {0} not found (document has {1} pages)")]
    PageNotFound(usize, usize),
    #[error("Image encoding error: {0}")]
    ImageError(String),
    #[error("MuPDF error: {0}")]
    MuPdfError(String),
}

impl From<mupdf::Error> for PdfParseError {
    fn from(e: mupdf::Error) -> Self {
        PdfParseError::MuPdfError(e.to_string())
    }
}

/// MuPDF-backed PDF parser
pub struct PdfParser {
    data: PdfData,
    page_count: usize,
}

/// Holds the source PDF data to ensure it outlives each document instance
enum PdfData {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

impl PdfParser {
    /// Create parser from file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PdfParseError> {
        let path_buf = path.as_ref().to_path_buf();
        let path_str = path_buf.to_string_lossy();

        let doc = Document::open(&*path_str)
            .map_err(|e| PdfParseError::LoadError(path_str.to_string(), e.to_string()))?;
        let page_count = doc.page_count()? as usize;

        tracing::debug!("Opened {} ({} pages)", path_str, page_count);

        Ok(Self {
            data: PdfData::Path(path_buf),
            page_count,
        })
    }

    /// Create parser from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, PdfParseError> {
        let owned_data = data.to_vec();

        let doc = Document::from_bytes(&owned_data, "application/pdf")
            .map_err(|e| PdfParseError::LoadError("<memory>".to_string(), e.to_string()))?;
        let page_count = doc.page_count()? as usize;

        Ok(Self {
            data: PdfData::Bytes(owned_data),
            page_count,
        })
    }

    fn open_document(&self) -> Result<Document, PdfParseError> {
        match &self.data {
            PdfData::Bytes(data) => {
                Document::from_bytes(data, "application/pdf").map_err(Into::into)
            }
            PdfData::Path(path) => {
                let path_str = path.to_string_lossy();
                Document::open(&*path_str).map_err(Into::into)
            }
        }
    }

    /// Get page count
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Validate page number (1-indexed)
    fn validate_page_num(&self, page_num: usize) -> Result<(), PdfParseError> {
        if page_num < 1 || page_num > self.page_count {
            return Err(PdfParseError::PageNotFound(page_num, self.page_count));
        }
        Ok(())
    }

    /// Get full page text
    pub fn get_page_text(&self, page_num: usize) -> Result<String, PdfParseError> {
        self.validate_page_num(page_num)?;

        let doc = self.open_document()?;
        let page = doc.load_page((page_num - 1) as i32)?;

        page.to_text().map_err(Into::into)
    }

    /// Render a page to PNG bytes
    pub fn render_page(&self, request: &PageRenderRequest) -> Result<Vec<u8>, PdfParseError> {
        self.validate_page_num(request.page)?;

        let doc = self.open_document()?;
        let page = doc.load_page((request.page - 1) as i32)?;

        let scale = request.scale.clamp(0.1, 8.0);
        let matrix = Matrix::new_scale(scale, scale);

        // No alpha: OCR engines expect an opaque page
        let colorspace = Colorspace::device_rgb();
        let pixmap = page.to_pixmap(&matrix, &colorspace, false, true)?;

        encode_png(&pixmap)
    }
}

/// Encode pixmap to PNG bytes
fn encode_png(pixmap: &mupdf::Pixmap) -> Result<Vec<u8>, PdfParseError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize; // components per pixel

    let mut rgb_buffer = Vec::with_capacity((width * height * 3) as usize);

    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(r);
            let b = samples.get(offset + 2).copied().unwrap_or(r);
            rgb_buffer.extend_from_slice(&[r, g, b]);
        }
    }

    let img = image::RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| PdfParseError::ImageError("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| PdfParseError::ImageError(e.to_string()))?;

    Ok(output)
}

impl PageSource for PdfParser {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page: usize) -> Result<String, PdfParseError> {
        self.get_page_text(page)
    }

    fn render_page_png(&self, page: usize, dpi: u32) -> Result<Vec<u8>, PdfParseError> {
        self.render_page(&PageRenderRequest::at_dpi(page, dpi))
    }
}
