//! MongoDB-backed text store

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};

use super::types::{StoreBackend, StoredRecord, TextRecord};
use super::TextStore;
use crate::error::StoreError;

/// Text store over a single MongoDB collection
pub struct MongoTextStore {
    collection: Collection<Document>,
}

impl MongoTextStore {
    /// Connect to `url` and use `database.collection`
    pub async fn connect(url: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let collection = client.database(database).collection::<Document>(collection);

        tracing::debug!("Using MongoDB collection {}.{}", database, collection.name());

        Ok(Self { collection })
    }
}

#[async_trait]
impl TextStore for MongoTextStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Mongo
    }

    async fn insert(&self, record: &TextRecord) -> Result<(), StoreError> {
        let document = mongodb::bson::to_document(record)
            .map_err(|e| StoreError::MalformedRecord(e.to_string()))?;

        self.collection.insert_one(document).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let mut cursor = self.collection.find(doc! {}).await?;

        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            records.push(stored_record(&document)?);
        }

        Ok(records)
    }
}

/// Convert a raw collection document into a stored record
fn stored_record(document: &Document) -> Result<StoredRecord, StoreError> {
    let id = match document.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    // Other writers may store small integers as Int32
    let chunk_id = match document.get("chunk_id") {
        None | Some(Bson::Null) => None,
        Some(Bson::Int32(v)) => Some(i64::from(*v)),
        Some(Bson::Int64(v)) => Some(*v),
        Some(other) => {
            return Err(StoreError::MalformedRecord(format!(
                "document {} has non-integer chunk_id {}",
                id, other
            )))
        }
    };

    let text = match document.get("text") {
        Some(Bson::String(text)) => Some(text.clone()),
        _ => None,
    };

    Ok(StoredRecord { id, chunk_id, text })
}
