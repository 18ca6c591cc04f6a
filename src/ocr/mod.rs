//! OCR Module
//!
//! Provides OCR (Optical Character Recognition) for PDF pages that carry no
//! text layer.
//!
//! Supports multiple backends:
//! - Tesseract (local CLI, requires installation)
//! - Ollama vision models (local LLM)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pdf_text_store::ocr::{OcrService, OcrServiceConfig};
//!
//! let service = OcrService::new(OcrServiceConfig::default());
//! let result = service.recognize(&png_bytes, None, Some("eng")).await?;
//! ```

mod provider;
mod service;
mod types;

pub use provider::{OcrProviderTrait, OllamaProvider, TesseractProvider};
pub use service::{OcrService, OcrServiceConfig};
pub use types::{OcrError, OcrProvider, OcrResult};

#[cfg(test)]
pub(crate) use provider::MockProvider;
