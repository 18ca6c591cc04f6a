//! Storage types

use serde::{Deserialize, Serialize};

/// A piece of extracted text as written to the store
///
/// `chunk_id` is present only when the document was split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<u32>,
    pub text: String,
}

impl TextRecord {
    pub fn whole(text: impl Into<String>) -> Self {
        Self {
            chunk_id: None,
            text: text.into(),
        }
    }

    pub fn chunk(chunk_id: u32, text: impl Into<String>) -> Self {
        Self {
            chunk_id: Some(chunk_id),
            text: text.into(),
        }
    }
}

/// A record as read back from the store
///
/// Collections may hold documents this crate did not write, so `text` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord {
    pub id: String,
    pub chunk_id: Option<i64>,
    pub text: Option<String>,
}

/// Which driver backs a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Sqlite,
}

impl StoreBackend {
    /// Pick a backend from a connection URL scheme
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            Some(Self::Mongo)
        } else if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }
}
