//! Persistence gateway
//!
//! [`CalculationStore`] is the capability the session writes through;
//! `SqliteStore` is the production variant, `MemoryStore` backs tests
//! and ephemeral runs.

use std::collections::BTreeMap;
use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tally_engine::Operator;
use tokio::sync::RwLock;
use tracing::debug;

use crate::client::SqliteClient;
use crate::error::{Result, StoreError};
use crate::model::CalculationRecord;

/// Storage capability for completed calculations
pub trait CalculationStore: Send + Sync {
    /// Insert one record keyed by its timestamp. Any storage failure
    /// (connectivity, key collision) surfaces as [`StoreError::Storage`];
    /// nothing is retried.
    fn record(&self, entry: &CalculationRecord) -> impl Future<Output = Result<()>> + Send;

    /// Every stored record as a formatted history line, in storage
    /// iteration order
    fn list_all(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Production store backed by the pooled SQLite client
#[derive(Clone)]
pub struct SqliteStore {
    client: SqliteClient,
}

impl SqliteStore {
    pub fn new(client: SqliteClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SqliteClient {
        &self.client
    }
}

impl CalculationStore for SqliteStore {
    fn record(&self, entry: &CalculationRecord) -> impl Future<Output = Result<()>> + Send {
        let entry = entry.clone();
        async move {
            sqlx::query(
                r#"
                INSERT INTO calculations (ts, operand1, operator, operand2, result)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&entry.timestamp)
            .bind(entry.operand1)
            .bind(entry.operator.symbol())
            .bind(entry.operand2)
            .bind(entry.result)
            .execute(self.client.pool())
            .await?;

            debug!("recorded calculation {}", entry.timestamp);
            Ok(())
        }
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        async move {
            let rows =
                sqlx::query("SELECT ts, operand1, operator, operand2, result FROM calculations")
                    .fetch_all(self.client.pool())
                    .await?;

            let mut lines = Vec::with_capacity(rows.len());
            for row in rows {
                lines.push(hydrate_line(row)?);
            }
            Ok(lines)
        }
    }
}

/// Hydrate a row into its history line
fn hydrate_line(row: SqliteRow) -> Result<String> {
    let timestamp: String = row.try_get("ts")?;
    let operand1: f64 = row.try_get("operand1")?;
    let symbol: String = row.try_get("operator")?;
    let operand2: f64 = row.try_get("operand2")?;
    let result: f64 = row.try_get("result")?;

    let operator = Operator::parse(&symbol).ok_or_else(|| {
        StoreError::Storage(format!("unknown operator in row {timestamp}: {symbol}"))
    })?;

    Ok(CalculationRecord {
        timestamp,
        operand1,
        operator,
        operand2,
        result,
    }
    .to_line())
}

/// In-memory store keyed by timestamp.
///
/// Key collisions are rejected just like the SQL primary key, so tests
/// exercise the same contract the production store enforces.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<BTreeMap<String, CalculationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CalculationStore for MemoryStore {
    fn record(&self, entry: &CalculationRecord) -> impl Future<Output = Result<()>> + Send {
        let entry = entry.clone();
        async move {
            let mut rows = self.rows.write().await;
            if rows.contains_key(&entry.timestamp) {
                return Err(StoreError::Storage(format!(
                    "duplicate timestamp: {}",
                    entry.timestamp
                )));
            }
            rows.insert(entry.timestamp.clone(), entry);
            Ok(())
        }
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        async move {
            let rows = self.rows.read().await;
            Ok(rows.values().map(CalculationRecord::to_line).collect())
        }
    }
}
