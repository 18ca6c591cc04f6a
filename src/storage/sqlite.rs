//! SQLite-backed text store

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::types::{StoreBackend, StoredRecord, TextRecord};
use super::TextStore;
use crate::error::StoreError;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS text_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    chunk_id INTEGER,
    text TEXT NOT NULL
);
"#;

#[derive(Debug, sqlx::FromRow)]
struct TextRow {
    id: i64,
    chunk_id: Option<i64>,
    text: String,
}

/// Text store over a single SQLite table
pub struct SqliteTextStore {
    pool: SqlitePool,
}

impl SqliteTextStore {
    /// Open (creating if missing) the database at `url`
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Each in-memory connection is its own database
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        sqlx::query(SCHEMA_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TextStore for SqliteTextStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }

    async fn insert(&self, record: &TextRecord) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO text_records (chunk_id, text) VALUES (?, ?)")
            .bind(record.chunk_id.map(i64::from))
            .bind(&record.text)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let rows = sqlx::query_as::<_, TextRow>(
            "SELECT id, chunk_id, text FROM text_records ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| StoredRecord {
                id: row.id.to_string(),
                chunk_id: row.chunk_id,
                text: Some(row.text),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_read_back_in_order() {
        let store = SqliteTextStore::connect("sqlite::memory:").await.unwrap();

        store.insert(&TextRecord::chunk(0, "first")).await.unwrap();
        store.insert(&TextRecord::chunk(1, "second")).await.unwrap();
        store.insert(&TextRecord::whole("whole")).await.unwrap();

        let records = store.find_all().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].chunk_id, Some(0));
        assert_eq!(records[0].text.as_deref(), Some("first"));
        assert_eq!(records[1].chunk_id, Some(1));
        assert_eq!(records[2].chunk_id, None);
        assert_eq!(records[2].text.as_deref(), Some("whole"));
    }

    #[tokio::test]
    async fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("text.db").display());

        {
            let store = SqliteTextStore::connect(&url).await.unwrap();
            store.insert(&TextRecord::whole("kept")).await.unwrap();
        }

        let store = SqliteTextStore::connect(&url).await.unwrap();
        let records = store.find_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text.as_deref(), Some("kept"));
        assert_eq!(store.backend(), StoreBackend::Sqlite);
    }
}
