//! Evidence storage backends
//!
//! Evidence lists live in a flat key-value namespace under `evidence:{SYMBOL}`,
//! one JSON array per ticker. A reseed replaces the whole array.

use analysis_core::{normalize_symbol, AnalysisError, EvidenceRecord, EvidenceStore};
use async_trait::async_trait;
use dashmap::DashMap;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const KEY_PREFIX: &str = "evidence:";

pub fn evidence_key(symbol: &str) -> String {
    format!("{}{}", KEY_PREFIX, normalize_symbol(symbol))
}

fn store_err<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::StoreError(err.to_string())
}

/// Decode a stored evidence payload leniently.
///
/// A payload that is not a JSON array yields an empty list. Elements that fail
/// to decode are skipped so one bad record cannot hide the rest of the ticker.
pub fn decode_records(symbol: &str, raw: &str) -> Vec<EvidenceRecord> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!("Evidence payload for {} is not a JSON array: {}", symbol, e);
            return Vec::new();
        }
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value::<EvidenceRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed evidence record #{} for {}: {}", idx, symbol, e);
                None
            }
        })
        .collect()
}

/// Process-local store, used by tests and the CLI when no database is configured
#[derive(Default)]
pub struct InMemoryEvidenceStore {
    lists: DashMap<String, Vec<EvidenceRecord>>,
}

impl InMemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EvidenceStore for InMemoryEvidenceStore {
    async fn get(&self, symbol: &str) -> Result<Option<Vec<EvidenceRecord>>, AnalysisError> {
        Ok(self
            .lists
            .get(&normalize_symbol(symbol))
            .map(|entry| entry.value().clone()))
    }

    async fn set(&self, symbol: &str, records: Vec<EvidenceRecord>) -> Result<(), AnalysisError> {
        self.lists.insert(normalize_symbol(symbol), records);
        Ok(())
    }

    async fn symbols(&self) -> Result<Vec<String>, AnalysisError> {
        let mut symbols: Vec<String> = self.lists.iter().map(|entry| entry.key().clone()).collect();
        symbols.sort();
        Ok(symbols)
    }
}

/// SQLite-backed key-value store
#[derive(Clone)]
pub struct SqliteEvidenceStore {
    pool: SqlitePool,
}

impl SqliteEvidenceStore {
    /// Open (or create) the database and ensure the key-value table exists
    pub async fn new(database_url: &str) -> Result<Self, AnalysisError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(store_err)?
            .create_if_missing(true);

        // Every connection to an in-memory database sees its own empty database
        let in_memory = database_url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 5 });
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await.map_err(store_err)?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), AnalysisError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    /// Store an externally produced payload verbatim
    pub async fn put_raw(&self, symbol: &str, raw: &str) -> Result<(), AnalysisError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(evidence_key(symbol))
        .bind(raw)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn get_raw(&self, symbol: &str) -> Result<Option<String>, AnalysisError> {
        sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
            .bind(evidence_key(symbol))
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)
    }
}

#[async_trait]
impl EvidenceStore for SqliteEvidenceStore {
    async fn get(&self, symbol: &str) -> Result<Option<Vec<EvidenceRecord>>, AnalysisError> {
        let symbol = normalize_symbol(symbol);
        Ok(self
            .get_raw(&symbol)
            .await?
            .map(|raw| decode_records(&symbol, &raw)))
    }

    async fn set(&self, symbol: &str, records: Vec<EvidenceRecord>) -> Result<(), AnalysisError> {
        let raw = serde_json::to_string(&records)?;
        self.put_raw(symbol, &raw).await
    }

    async fn symbols(&self) -> Result<Vec<String>, AnalysisError> {
        let keys: Vec<String> =
            sqlx::query_scalar::<_, String>("SELECT key FROM kv_store WHERE key LIKE ? ORDER BY key")
                .bind(format!("{}%", KEY_PREFIX))
                .fetch_all(&self.pool)
                .await
                .map_err(store_err)?;

        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect())
    }
}
