//! # tagtree-core
//!
//! Core types, traits, and abstractions for the tagtree sensor registry.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other tagtree crates depend on: canonical tag paths, the
//! path-to-tree compiler, the annotation text pipeline, and the repository
//! traits the durable layer implements.

pub mod annotation;
pub mod defaults;
pub mod error;
pub mod models;
pub mod path;
pub mod traits;
pub mod tree;

// Re-export commonly used types at crate root
pub use annotation::{
    content_for_editing, content_plain, count_content_lines, normalize_base, render_stored_text,
    strip_modification_metadata, strip_timestamp,
};
pub use error::{Error, Result};
pub use models::*;
pub use path::CanonicalPath;
pub use traits::*;
pub use tree::compile;
