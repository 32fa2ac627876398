//! Core traits for tagtree abstractions.
//!
//! These traits define the interfaces the durable layer must satisfy,
//! enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Actor, Annotation, IngestReport, IngestionStatus, TreeNode};
use crate::path::CanonicalPath;

// =============================================================================
// LEAF RECORD REPOSITORY (Tree Store / Projector)
// =============================================================================

/// Repository over the durable, deduplicated set of canonical leaf paths.
///
/// The persisted flat set is the source of truth for the ingested dataset;
/// the tree is always derived from it, never stored as a tree.
#[async_trait]
pub trait LeafRecordRepository: Send + Sync {
    /// Set-union the given paths into the record set, counting distinct new
    /// vs. already-present paths. Re-ingesting an existing path is a no-op
    /// on the record, counted as existing.
    async fn ingest(&self, paths: &[CanonicalPath]) -> Result<IngestReport>;

    /// All recorded paths, in persisted insertion order.
    async fn list_paths(&self) -> Result<Vec<CanonicalPath>>;

    /// Number of recorded paths.
    async fn count(&self) -> Result<i64>;

    /// Rebuild the full tree from the current record set. An empty set
    /// yields a childless root carrying an informational message rather
    /// than an error.
    async fn project(&self) -> Result<TreeNode>;
}

// =============================================================================
// ANNOTATION REPOSITORY
// =============================================================================

/// Repository for the 1:1 free-text annotation attached to a node identity.
///
/// Node identities are path strings; they need not exist as leaf records,
/// and writing an annotation never creates one.
#[async_trait]
pub trait AnnotationRepository: Send + Sync {
    /// Fetch the existing annotation, if any. Never creates one.
    async fn fetch(&self, node_id: &str) -> Result<Option<Annotation>>;

    /// Replace the annotation under the given actor identity, creating the
    /// row lazily. Audit lines are regenerated from the normalized base on
    /// every write; last-writer-wins, no concurrency check.
    async fn write(&self, node_id: &str, raw_text: &str, actor: &Actor) -> Result<Annotation>;

    /// Hard-delete an annotation. Privileged actors only.
    async fn delete(&self, node_id: &str, actor: &Actor) -> Result<()>;
}

// =============================================================================
// INGESTION STATUS REPOSITORY (Ingestion Gate)
// =============================================================================

/// Repository over the durable, monotonic one-time-ingestion singleton.
#[async_trait]
pub trait IngestionStatusRepository: Send + Sync {
    /// Current ingestion status; `None` if no ingestion ever completed.
    async fn fetch(&self) -> Result<Option<IngestionStatus>>;
}
