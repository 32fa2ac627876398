//! Idempotent schema bootstrap.
//!
//! Three durable tables back the registry: the flat deduplicated leaf-path
//! set, the 1:1 node annotations, and the one-row ingestion singleton. The
//! tree itself is never stored; it is always derived from `leaf_record`.

use sqlx::SqlitePool;
use tracing::info;

use tagtree_core::Result;

/// Create all registry tables if they do not exist yet. Safe to call on
/// every startup.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    info!(
        subsystem = "database",
        component = "schema",
        op = "init",
        "Initializing registry schema"
    );

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leaf_record (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            path TEXT NOT NULL UNIQUE,
            created_at_utc TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS annotation (
            node_id TEXT PRIMARY KEY,
            stored_text TEXT NOT NULL,
            last_modified_by TEXT,
            updated_at_utc TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Singleton: the CHECK constraint pins the only possible row to id 1,
    // and the conditional insert against it serializes concurrent ingestion
    // attempts.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ingestion_status (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            is_ingested INTEGER NOT NULL DEFAULT 0,
            ingested_at_utc TIMESTAMP NOT NULL,
            ingested_by TEXT NOT NULL,
            source_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
