//! Leaf-record repository: the Tree Store / Projector.
//!
//! One row per distinct canonical path string. Ingestion is a counted
//! set-union; projection replays the recorded paths, in insertion order,
//! through the core compiler.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use tagtree_core::{
    compile, CanonicalPath, IngestReport, LeafRecordRepository, Result, TreeNode,
};

/// Message carried by the root of an empty projection.
pub const EMPTY_PROJECTION_MESSAGE: &str = "no dataset ingested";

/// SQLite implementation of [`LeafRecordRepository`].
pub struct SqliteLeafRepository {
    pool: SqlitePool,
}

impl SqliteLeafRepository {
    /// Create a new repository on the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Union `paths` into `leaf_record` inside an existing transaction.
///
/// The conditional insert makes re-ingestion of a known path a no-op; the
/// rows-affected count distinguishes created from existing.
pub(crate) async fn ingest_records(
    tx: &mut Transaction<'_, Sqlite>,
    paths: &[CanonicalPath],
    now: DateTime<Utc>,
) -> Result<IngestReport> {
    let mut report = IngestReport {
        created: 0,
        existing: 0,
    };

    for path in paths {
        let result = sqlx::query(
            "INSERT INTO leaf_record (path, created_at_utc) VALUES (?1, ?2) \
             ON CONFLICT(path) DO NOTHING",
        )
        .bind(path.to_string())
        .bind(now)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 1 {
            report.created += 1;
        } else {
            report.existing += 1;
        }
    }

    Ok(report)
}

#[async_trait]
impl LeafRecordRepository for SqliteLeafRepository {
    async fn ingest(&self, paths: &[CanonicalPath]) -> Result<IngestReport> {
        let mut tx = self.pool.begin().await?;
        let report = ingest_records(&mut tx, paths, Utc::now()).await?;
        tx.commit().await?;

        info!(
            subsystem = "database",
            component = "leaves",
            op = "ingest",
            created = report.created,
            existing = report.existing,
            "Leaf records ingested"
        );

        Ok(report)
    }

    async fn list_paths(&self) -> Result<Vec<CanonicalPath>> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT path FROM leaf_record ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|p| CanonicalPath::parse(p)).collect())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leaf_record")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn project(&self) -> Result<TreeNode> {
        let paths = self.list_paths().await?;

        if paths.is_empty() {
            debug!(
                subsystem = "database",
                component = "leaves",
                op = "project",
                "No leaf records; returning empty root"
            );
            let mut root = TreeNode::root();
            root.message = Some(EMPTY_PROJECTION_MESSAGE.to_string());
            return Ok(root);
        }

        let path_count = paths.len();
        let tree = compile(paths);

        debug!(
            subsystem = "database",
            component = "leaves",
            op = "project",
            path_count,
            node_count = tree.descendant_count(),
            "Projected tree from leaf records"
        );

        Ok(tree)
    }
}
