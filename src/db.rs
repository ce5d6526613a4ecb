use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Executor, Pool, Row, Sqlite,
};
use std::str::FromStr;

use crate::error::Error;

/// A local key-value store holding text values.
#[async_trait]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;
    async fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}

pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    #[tracing::instrument(name = "SqliteStore::new")]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(db_uri)?.create_if_missing(true);

        // an in-memory database lives as long as its connection
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        pool.execute("CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)")
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_row = conn
            .fetch_optional(sqlx::query("SELECT value FROM kv WHERE key = ?1").bind(key))
            .await?;

        match maybe_row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO kv (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(key)
            .bind(value),
        )
        .await?;

        Ok(())
    }
}

#[tokio::test]
async fn missing_key_reads_as_none() {
    let store = SqliteStore::new("sqlite::memory:", 1).await.unwrap();

    assert_eq!(store.get("@places").await.unwrap(), None);
}

#[tokio::test]
async fn set_overwrites_previous_value() {
    let store = SqliteStore::new("sqlite::memory:", 1).await.unwrap();

    store.set("@places", "[]").await.unwrap();
    store.set("@places", "[1]").await.unwrap();

    assert_eq!(store.get("@places").await.unwrap(), Some("[1]".into()));
}

#[tokio::test]
async fn file_store_survives_reconnect() {
    let path = std::env::temp_dir().join(format!("myplaces-kv-{}.db", std::process::id()));
    let uri = format!("sqlite://{}", path.display());

    {
        let store = SqliteStore::new(&uri, 1).await.unwrap();
        store.set("@places", "[]").await.unwrap();
        store.pool.close().await;
    }

    let store = SqliteStore::new(&uri, 1).await.unwrap();
    assert_eq!(store.get("@places").await.unwrap(), Some("[]".into()));

    store.pool.close().await;
    let _ = std::fs::remove_file(path);
}
