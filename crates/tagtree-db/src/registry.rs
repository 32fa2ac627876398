//! The `Registry` facade: the narrow surface the rest of the system calls.
//!
//! External plumbing (HTTP routing, auth screens, uploads) is expected to
//! invoke the core through this type only: compile an uploaded dataset via
//! `tagtree_core::compile`, and everything durable through the four
//! operations here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};

use tagtree_core::defaults::MAX_ANNOTATION_LINES;
use tagtree_core::{
    Actor, Annotation, AnnotationRepository, CanonicalPath, Error, IngestReport,
    IngestionStatusRepository, LeafRecordRepository, Result, TreeNode,
};

use crate::annotations::SqliteAnnotationRepository;
use crate::leaves::{self, SqliteLeafRepository};
use crate::pool::create_pool;
use crate::schema::init_schema;
use crate::status::{self, SqliteIngestionRepository};

/// Tunable registry behavior.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum content lines accepted by an annotation write.
    pub max_annotation_lines: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_annotation_lines: MAX_ANNOTATION_LINES,
        }
    }
}

/// Facade over the durable registry: leaf records, annotations, and the
/// one-time ingestion gate, sharing one connection pool.
pub struct Registry {
    pool: SqlitePool,
    pub leaves: SqliteLeafRepository,
    pub annotations: SqliteAnnotationRepository,
    pub ingestion: SqliteIngestionRepository,
}

impl Registry {
    /// Connect to the given database URL, bootstrap the schema, and build
    /// the repositories.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with_config(database_url, RegistryConfig::default()).await
    }

    /// Connect with custom registry configuration.
    pub async fn connect_with_config(database_url: &str, config: RegistryConfig) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        init_schema(&pool).await?;
        Ok(Self::from_pool_with_config(pool, config))
    }

    /// Build a registry over an in-memory database. Intended for tests and
    /// ad-hoc tooling; the schema is bootstrapped automatically.
    pub async fn connect_in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    /// Build the repositories over an existing pool whose schema is already
    /// initialized.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self::from_pool_with_config(pool, RegistryConfig::default())
    }

    /// Build over an existing pool with custom configuration.
    pub fn from_pool_with_config(pool: SqlitePool, config: RegistryConfig) -> Self {
        Self {
            leaves: SqliteLeafRepository::new(pool.clone()),
            annotations: SqliteAnnotationRepository::with_max_lines(
                pool.clone(),
                config.max_annotation_lines,
            ),
            ingestion: SqliteIngestionRepository::new(pool.clone()),
            pool,
        }
    }

    /// Perform the one permitted permanent ingestion.
    ///
    /// Fails with [`Error::Forbidden`] for non-privileged actors (no state
    /// change) and with [`Error::AlreadyIngested`] once a dataset has been
    /// ingested, surfacing the original actor and timestamp. The leaf-record
    /// union and the singleton claim run in a single transaction: either the
    /// whole ingestion persists or nothing does, and a losing concurrent
    /// caller observes the winner's row.
    pub async fn try_ingest(
        &self,
        actor: &Actor,
        source_name: &str,
        paths: &[CanonicalPath],
    ) -> Result<IngestReport> {
        if !actor.privileged {
            warn!(
                subsystem = "database",
                component = "registry",
                op = "try_ingest",
                actor = %actor.name,
                "Ingestion rejected: actor lacks privilege"
            );
            return Err(Error::Forbidden(
                "only privileged actors may perform the one-time ingestion".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        if !status::claim_ingestion(&mut tx, actor, source_name, now).await? {
            tx.rollback().await?;
            let prior = self
                .ingestion
                .fetch()
                .await?
                .ok_or_else(|| Error::NotFound("ingestion status".to_string()))?;
            return Err(Error::AlreadyIngested {
                ingested_at: prior.ingested_at_utc,
                ingested_by: prior.ingested_by,
            });
        }

        let report = leaves::ingest_records(&mut tx, paths, now).await?;
        tx.commit().await?;

        info!(
            subsystem = "database",
            component = "registry",
            op = "try_ingest",
            actor = %actor.name,
            source_name,
            created = report.created,
            existing = report.existing,
            "Permanent dataset ingestion completed"
        );

        Ok(report)
    }

    /// Rebuild the tree from the durable leaf-record set.
    pub async fn project(&self) -> Result<TreeNode> {
        self.leaves.project().await
    }

    /// Read the current annotation for a node identity, if any.
    pub async fn read_annotation(&self, node_id: &str) -> Result<Option<Annotation>> {
        self.annotations.fetch(node_id).await
    }

    /// Write a node's annotation under an actor identity.
    pub async fn write_annotation(
        &self,
        node_id: &str,
        raw_text: &str,
        actor: &Actor,
    ) -> Result<Annotation> {
        self.annotations.write(node_id, raw_text, actor).await
    }
}
