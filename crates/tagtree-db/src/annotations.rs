//! Annotation repository implementation.
//!
//! The durable half of the annotation engine: the pure audit-line pipeline
//! lives in `tagtree_core::annotation`, this repository validates, renders,
//! and upserts the resulting stored text. Each write fully replaces the
//! previous value; last-writer-wins.

use async_trait::async_trait;
use chrono::{Local, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use tagtree_core::annotation::{count_content_lines, render_stored_text};
use tagtree_core::defaults::MAX_ANNOTATION_LINES;
use tagtree_core::{Actor, Annotation, AnnotationRepository, Error, Result};

/// SQLite implementation of [`AnnotationRepository`].
pub struct SqliteAnnotationRepository {
    pool: SqlitePool,
    max_lines: usize,
}

impl SqliteAnnotationRepository {
    /// Create a new repository with the default line ceiling.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_max_lines(pool, MAX_ANNOTATION_LINES)
    }

    /// Create a new repository with a custom line ceiling.
    pub fn with_max_lines(pool: SqlitePool, max_lines: usize) -> Self {
        Self { pool, max_lines }
    }
}

#[async_trait]
impl AnnotationRepository for SqliteAnnotationRepository {
    async fn fetch(&self, node_id: &str) -> Result<Option<Annotation>> {
        let annotation = sqlx::query_as::<_, Annotation>(
            "SELECT node_id, stored_text, last_modified_by, updated_at_utc \
             FROM annotation WHERE node_id = ?1",
        )
        .bind(node_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(annotation)
    }

    async fn write(&self, node_id: &str, raw_text: &str, actor: &Actor) -> Result<Annotation> {
        // Rejected before any write; the ceiling counts content lines only,
        // not the audit lines added afterwards.
        let line_count = count_content_lines(raw_text);
        if line_count > self.max_lines {
            warn!(
                subsystem = "database",
                component = "annotations",
                op = "write",
                node_id,
                line_count,
                max_lines = self.max_lines,
                "Annotation rejected: line ceiling exceeded"
            );
            return Err(Error::Validation(format!(
                "annotation cannot exceed {} lines (currently {} lines)",
                self.max_lines, line_count
            )));
        }

        let stored_text = render_stored_text(raw_text, actor, Local::now());
        let updated_at_utc = Utc::now();
        let last_modified_by = actor.authenticated.then(|| actor.name.clone());

        sqlx::query(
            "INSERT INTO annotation (node_id, stored_text, last_modified_by, updated_at_utc) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(node_id) DO UPDATE SET \
                 stored_text = excluded.stored_text, \
                 last_modified_by = excluded.last_modified_by, \
                 updated_at_utc = excluded.updated_at_utc",
        )
        .bind(node_id)
        .bind(&stored_text)
        .bind(&last_modified_by)
        .bind(updated_at_utc)
        .execute(&self.pool)
        .await?;

        debug!(
            subsystem = "database",
            component = "annotations",
            op = "write",
            node_id,
            actor = %actor.name,
            "Annotation written"
        );

        Ok(Annotation {
            node_id: node_id.to_string(),
            stored_text,
            last_modified_by,
            updated_at_utc,
        })
    }

    async fn delete(&self, node_id: &str, actor: &Actor) -> Result<()> {
        if !actor.privileged {
            return Err(Error::Forbidden(
                "only privileged actors may delete annotations".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM annotation WHERE node_id = ?1")
            .bind(node_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("annotation for {}", node_id)));
        }

        info!(
            subsystem = "database",
            component = "annotations",
            op = "delete",
            node_id,
            actor = %actor.name,
            "Annotation deleted"
        );

        Ok(())
    }
}
