//! Centralized default constants for the tagtree system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Other crates reference these constants instead of defining their
//! own magic numbers.

// =============================================================================
// DATASET EXTRACTION
// =============================================================================

/// Name of the identifier column extracted from a tabular dataset.
pub const TAG_COLUMN: &str = "TagName";

/// Sheet names tried in order before falling back to the first sheet.
pub const SHEET_PREFERENCE: &[&str] = &["Sheet2"];

// =============================================================================
// ANNOTATIONS
// =============================================================================

/// Maximum number of content lines accepted by an annotation write.
/// Counted after CRLF normalization, ignoring trailing empty lines.
pub const MAX_ANNOTATION_LINES: usize = 10_000;
