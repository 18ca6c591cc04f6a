//! Text extraction
//!
//! Prefers the embedded text layer and falls back to OCR when no page has one.

mod extractor;

pub use extractor::{extract_pdf_text, ExtractedText, TextExtractor, TextSource};
