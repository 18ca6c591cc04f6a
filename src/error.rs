//! Error types for pdf-text-store

use thiserror::Error;

use crate::ocr::OcrError;
use crate::pdf::PdfParseError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfParseError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Document store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unsupported store URL: {0}")]
    UnsupportedUrl(String),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}
