//! Canonical tag paths and the raw-tag normalizer.
//!
//! A canonical path is the slash-delimited hierarchical identity of one
//! sensor. Raw tags arrive in two formats: new-style tags already contain
//! the delimiter and are split verbatim, while legacy fixed-width codes have
//! the delimiter injected at known character offsets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path segment delimiter.
pub const DELIMITER: char = '/';

/// Character offsets at which the delimiter is injected into a legacy
/// fixed-width tag. Each insertion shifts subsequent offsets by the number
/// of delimiters already inserted; offsets past the end are skipped.
pub const LEGACY_OFFSETS: [usize; 8] = [4, 7, 10, 13, 16, 19, 22, 25];

/// An ordered sequence of hierarchy segments derived from a raw tag.
///
/// Segments never contain the delimiter. Paths produced by
/// [`CanonicalPath::normalize`] always have at least one segment; segments
/// may be empty strings when a pre-delimited tag contains consecutive
/// delimiters (preserved verbatim, the compiler treats them as ordinary
/// oddly-named nodes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalPath(Vec<String>);

impl CanonicalPath {
    /// Build a path from pre-split segments.
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Split an already-canonical string on the delimiter, preserving empty
    /// segments verbatim.
    pub fn parse(path: &str) -> Self {
        Self(path.split(DELIMITER).map(str::to_string).collect())
    }

    /// Turn a raw tag into a canonical path.
    ///
    /// Tags that already contain the delimiter are split verbatim. Anything
    /// else is treated as a legacy fixed-width code with the delimiter
    /// injected at [`LEGACY_OFFSETS`]. Pure and deterministic.
    pub fn normalize(raw_tag: &str) -> Self {
        if raw_tag.contains(DELIMITER) {
            return Self::parse(raw_tag);
        }
        Self::parse(&inject_delimiters(raw_tag, DELIMITER, &LEGACY_OFFSETS))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment, if any: the sensor name of this path.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Insert `delimiter` into `s` at each character index in `offsets`.
///
/// Offsets are interpreted against the original string; the running count of
/// insertions already made is added to each. Offsets at or beyond the
/// shifted length are silently skipped.
fn inject_delimiters(s: &str, delimiter: char, offsets: &[usize]) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    for (inserted, &pos) in offsets.iter().enumerate() {
        let shifted = pos + inserted;
        if shifted < chars.len() {
            chars.insert(shifted, delimiter);
        }
    }
    chars.into_iter().collect()
}
