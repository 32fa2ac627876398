//! # tagtree-db
//!
//! SQLite database layer for the tagtree sensor registry.
//!
//! This crate provides:
//! - Connection pool management
//! - Idempotent schema bootstrap
//! - Repository implementations for leaf records, annotations, and the
//!   one-time ingestion singleton
//! - The [`Registry`] facade exposing the narrow core surface: `try_ingest`,
//!   `project`, `read_annotation`, `write_annotation`
//!
//! ## Example
//!
//! ```rust,ignore
//! use tagtree_db::{Registry, Actor, CanonicalPath};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Registry::connect("sqlite://registry.db").await?;
//!
//!     let admin = Actor::privileged("admin");
//!     let paths = vec![CanonicalPath::parse("plantA/line3/pump7/temp")];
//!     let report = registry.try_ingest(&admin, "registry.xlsx", &paths).await?;
//!     println!("ingested {} new paths", report.created);
//!
//!     let tree = registry.project().await?;
//!     println!("{}", serde_json::to_string_pretty(&tree)?);
//!     Ok(())
//! }
//! ```

pub mod annotations;
pub mod leaves;
pub mod pool;
pub mod registry;
pub mod schema;
pub mod status;

pub use annotations::SqliteAnnotationRepository;
pub use leaves::SqliteLeafRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use registry::{Registry, RegistryConfig};
pub use schema::init_schema;
pub use status::SqliteIngestionRepository;

// Re-export core types
pub use tagtree_core::*;
