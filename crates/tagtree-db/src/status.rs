//! Ingestion-status repository: the durable side of the Ingestion Gate.
//!
//! The singleton row is claimed with a conditional insert, so the
//! check-then-set between concurrent privileged callers happens inside the
//! database rather than the application.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use tagtree_core::{Actor, IngestionStatus, IngestionStatusRepository, Result};

/// SQLite implementation of [`IngestionStatusRepository`].
pub struct SqliteIngestionRepository {
    pool: SqlitePool,
}

impl SqliteIngestionRepository {
    /// Create a new repository on the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngestionStatusRepository for SqliteIngestionRepository {
    async fn fetch(&self) -> Result<Option<IngestionStatus>> {
        let status = sqlx::query_as::<_, IngestionStatus>(
            "SELECT is_ingested, ingested_at_utc, ingested_by, source_name \
             FROM ingestion_status WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }
}

/// Attempt to claim the ingestion singleton inside an existing transaction.
///
/// Returns `true` if this caller won the claim. A prior (or concurrent)
/// ingestion leaves the existing row untouched; the flag is monotonic.
pub(crate) async fn claim_ingestion(
    tx: &mut Transaction<'_, Sqlite>,
    actor: &Actor,
    source_name: &str,
    now: DateTime<Utc>,
) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO ingestion_status (id, is_ingested, ingested_at_utc, ingested_by, source_name) \
         VALUES (1, 1, ?1, ?2, ?3) \
         ON CONFLICT(id) DO NOTHING",
    )
    .bind(now)
    .bind(&actor.name)
    .bind(source_name)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() == 1)
}
