//! # tagtree-ingest
//!
//! Dataset admission for the tagtree registry.
//!
//! The core never parses spreadsheets; it consumes a tabular model with
//! named sheets and named columns. This crate provides that model
//! ([`Workbook`], [`Sheet`]), sheet selection by preference order, extraction
//! of the single identifier column, and the two admission paths:
//!
//! - [`compile_dataset`] — the ad-hoc path: extract, normalize, and compile
//!   an uploaded dataset into a tree without touching the durable store.
//! - [`paths_from_workbook`] — the extraction half alone, producing the
//!   canonical path set fed to the ingestion gate.

pub mod extract;
pub mod tabular;

pub use extract::{compile_dataset, extract_tags, normalize_tags, paths_from_workbook};
pub use tabular::{Sheet, Workbook};
