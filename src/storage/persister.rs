//! Size-driven persistence of extracted text
//!
//! Text whose UTF-8 size exceeds the document limit is split into records of
//! `chunk_chars` characters each, indexed from 0. The limit is measured in
//! bytes but chunks are measured in characters, so a chunk of multi-byte
//! characters can still exceed the limit; such chunks are logged and written
//! unchanged.

use super::types::TextRecord;
use super::TextStore;
use crate::error::StoreError;

/// Maximum size of a single stored document (16 MiB)
pub const MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

/// Characters per chunk when a document is split
pub const CHUNK_CHARS: usize = MAX_DOCUMENT_BYTES / 2;

/// Thresholds used when persisting text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    /// Byte size above which text is split
    pub max_bytes: usize,
    /// Characters per chunk
    pub chunk_chars: usize,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_DOCUMENT_BYTES,
            chunk_chars: CHUNK_CHARS,
        }
    }
}

/// What `persist_text` wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Nothing to write
    Empty,
    /// One unindexed record
    Single,
    /// This many indexed records
    Chunked(usize),
}

impl PersistOutcome {
    pub fn records_written(&self) -> usize {
        match self {
            PersistOutcome::Empty => 0,
            PersistOutcome::Single => 1,
            PersistOutcome::Chunked(n) => *n,
        }
    }
}

/// Split `text` into consecutive pieces of `chunk_chars` characters
///
/// The last piece may be shorter. Characters are never split.
pub fn split_chunks(text: &str, chunk_chars: usize) -> Vec<&str> {
    let chunk_chars = chunk_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == chunk_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Write `text` to `store`, splitting it when it exceeds `policy.max_bytes`
pub async fn persist_text(
    store: &dyn TextStore,
    text: &str,
    policy: &ChunkPolicy,
) -> Result<PersistOutcome, StoreError> {
    if text.len() > policy.max_bytes {
        let chunks = split_chunks(text, policy.chunk_chars);

        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.len() > policy.max_bytes {
                tracing::warn!(
                    "Chunk {} is {} bytes, above the {} byte limit",
                    i,
                    chunk.len(),
                    policy.max_bytes
                );
            }
            store.insert(&TextRecord::chunk(i as u32, *chunk)).await?;
        }

        tracing::info!("Text saved in {} chunks due to size limit.", chunks.len());
        Ok(PersistOutcome::Chunked(chunks.len()))
    } else if !text.is_empty() {
        store.insert(&TextRecord::whole(text)).await?;
        tracing::info!("Text saved in store.");
        Ok(PersistOutcome::Single)
    } else {
        tracing::info!("No text to save to store.");
        Ok(PersistOutcome::Empty)
    }
}
