//! PDF Text Store
//!
//! Extracts the text of a PDF, preferring its embedded text layer and falling
//! back to OCR of rasterized pages, then writes it to a document store.
//! Payloads above the store's document size limit are split into indexed
//! chunks.
//!
//! # Modules
//!
//! - `pdf`: MuPDF text extraction and page rasterization
//! - `ocr`: OCR providers (Tesseract, Ollama)
//! - `extract`: text-layer-first extraction with OCR fallback
//! - `storage`: MongoDB and SQLite stores plus size-driven chunking
//! - `verify`: read-back inspection
//! - `pipeline`: the three stages wired together

pub mod config;
pub mod error;
pub mod extract;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod storage;
pub mod verify;

pub use config::Config;
pub use error::{AppError, Result};
pub use pipeline::{run, RunSummary};
