//! Storage module for extracted text
//!
//! Supports MongoDB collections and SQLite tables behind one `TextStore` trait.

mod mongo;
mod persister;
mod sqlite;
mod types;

pub use mongo::MongoTextStore;
pub use persister::{persist_text, split_chunks, ChunkPolicy, PersistOutcome, CHUNK_CHARS, MAX_DOCUMENT_BYTES};
pub use sqlite::SqliteTextStore;
pub use types::*;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Append-only store of text records
#[async_trait]
pub trait TextStore: Send + Sync {
    /// Driver behind this store
    fn backend(&self) -> StoreBackend;

    /// Write one record
    async fn insert(&self, record: &TextRecord) -> Result<(), StoreError>;

    /// Read every record in insertion order
    async fn find_all(&self) -> Result<Vec<StoredRecord>, StoreError>;
}

/// Connect to the store named by `config.url`
pub async fn connect(config: &StoreConfig) -> Result<Box<dyn TextStore>, StoreError> {
    match StoreBackend::from_url(&config.url) {
        Some(StoreBackend::Mongo) => Ok(Box::new(
            MongoTextStore::connect(&config.url, &config.database, &config.collection).await?,
        )),
        Some(StoreBackend::Sqlite) => Ok(Box::new(SqliteTextStore::connect(&config.url).await?)),
        None => Err(StoreError::UnsupportedUrl(config.url.clone())),
    }
}
