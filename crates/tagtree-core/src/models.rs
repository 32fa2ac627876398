//! Core data models for the tagtree registry.
//!
//! These types are shared across all tagtree crates and represent the core
//! domain entities: the level-typed sensor tree, actors, annotations, and
//! the durable ingestion records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// LEVEL TYPES
// =============================================================================

/// Semantic type assigned to a tree node by its depth in the hierarchy.
///
/// The named vocabulary covers eight levels; deeper internal nodes clamp to
/// [`LevelType::Stage`], while the final segment of every path is always
/// [`LevelType::Sensor`] regardless of depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    Root,
    Manufacturer,
    Segment,
    Site,
    Plant,
    Function,
    System,
    Machine,
    Stage,
    Sensor,
}

/// Depth-ordered vocabulary for internal (non-leaf) nodes.
const LEVEL_VOCABULARY: [LevelType; 8] = [
    LevelType::Manufacturer,
    LevelType::Segment,
    LevelType::Site,
    LevelType::Plant,
    LevelType::Function,
    LevelType::System,
    LevelType::Machine,
    LevelType::Stage,
];

impl LevelType {
    /// Level type for a node at zero-based depth `depth`.
    ///
    /// Leaves are always `Sensor`; internal depths beyond the vocabulary
    /// reuse the last entry (`Stage`).
    pub fn for_depth(depth: usize, is_leaf: bool) -> Self {
        if is_leaf {
            LevelType::Sensor
        } else {
            LEVEL_VOCABULARY[depth.min(LEVEL_VOCABULARY.len() - 1)]
        }
    }

    /// Lowercase wire name, matching the serialized `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelType::Root => "root",
            LevelType::Manufacturer => "manufacturer",
            LevelType::Segment => "segment",
            LevelType::Site => "site",
            LevelType::Plant => "plant",
            LevelType::Function => "function",
            LevelType::System => "system",
            LevelType::Machine => "machine",
            LevelType::Stage => "stage",
            LevelType::Sensor => "sensor",
        }
    }
}

// =============================================================================
// TREE NODES
// =============================================================================

/// Operational status carried only by sensor leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Online,
}

/// One level of the compiled sensor hierarchy.
///
/// `id` is the full canonical path up to and including this node's segment
/// (the root uses the sentinel `"root"`), which makes node identity
/// deterministic and content-addressable across rebuilds. Children are kept
/// in first-insertion order and are unique by name within a parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub level_type: LevelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SensorStatus>,
    /// Informational marker, set only on the root of an empty projection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new childless node.
    pub fn new(id: impl Into<String>, name: impl Into<String>, level_type: LevelType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level_type,
            status: None,
            message: None,
            children: Vec::new(),
        }
    }

    /// The sentinel root of an empty tree.
    pub fn root() -> Self {
        Self::new("root", "root", LevelType::Root)
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Total number of nodes in this subtree, excluding self.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

// =============================================================================
// ACTORS
// =============================================================================

/// Identity under which core operations execute.
///
/// `privileged` gates the one-time ingestion and hard deletes; annotations
/// written by non-privileged actors carry a `[Modified by: …]` audit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub privileged: bool,
    pub authenticated: bool,
}

impl Actor {
    /// An authenticated actor with elevated capability.
    pub fn privileged(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privileged: true,
            authenticated: true,
        }
    }

    /// An authenticated actor without elevated capability.
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privileged: false,
            authenticated: true,
        }
    }

    /// An unauthenticated actor.
    pub fn anonymous() -> Self {
        Self {
            name: "anonymous".to_string(),
            privileged: false,
            authenticated: false,
        }
    }
}

// =============================================================================
// DURABLE RECORDS
// =============================================================================

/// The current annotation attached to one node identity.
///
/// `stored_text` is the user-supplied base plus regenerated audit lines;
/// there is no revision history, each write fully replaces the prior value.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Annotation {
    pub node_id: String,
    pub stored_text: String,
    pub last_modified_by: Option<String>,
    pub updated_at_utc: DateTime<Utc>,
}

/// Durable singleton recording the one permitted permanent ingestion.
///
/// Monotonic: once `is_ingested` is true, normal operation never resets it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IngestionStatus {
    pub is_ingested: bool,
    pub ingested_at_utc: DateTime<Utc>,
    pub ingested_by: String,
    pub source_name: String,
}

/// Outcome of a leaf-record union: distinct paths newly created vs. already
/// present. Re-ingesting an existing path is a counted no-op, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub created: u64,
    pub existing: u64,
}

impl IngestReport {
    pub fn total(&self) -> u64 {
        self.created + self.existing
    }
}
