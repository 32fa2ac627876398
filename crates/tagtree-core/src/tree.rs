//! The path-to-tree compiler.
//!
//! Folds a sequence of canonical paths into a single rooted tree by
//! trie-style merge-insert: paths sharing a prefix share the nodes for that
//! prefix, child ordering follows first-seen input order, and node ids are
//! the slash-joined canonical path up to that node. The compiler is pure;
//! compiling the same path set twice yields a structurally identical tree.

use tracing::debug;

use crate::models::{LevelType, SensorStatus, TreeNode};
use crate::path::CanonicalPath;

/// Compile a sequence of canonical paths into a rooted tree.
///
/// For each path, walk from the root and find-or-create the child named
/// after each segment. Depth-0 ids are the bare first segment (the root
/// sentinel contributes no prefix). The final segment of every path is
/// typed `sensor` and marked `online`; internal nodes never carry a status.
/// Empty paths are skipped.
pub fn compile<I>(paths: I) -> TreeNode
where
    I: IntoIterator<Item = CanonicalPath>,
{
    let mut root = TreeNode::root();
    let mut path_count = 0usize;

    for path in paths {
        if path.is_empty() {
            continue;
        }
        insert_path(&mut root, &path);
        path_count += 1;
    }

    debug!(
        subsystem = "compiler",
        op = "compile",
        path_count,
        node_count = root.descendant_count(),
        "Compiled path set into tree"
    );

    root
}

/// Merge one path into the tree under `root`.
fn insert_path(root: &mut TreeNode, path: &CanonicalPath) {
    let mut node = root;
    let mut prefix = String::new();

    for (depth, segment) in path.segments().iter().enumerate() {
        // Depth-0 ids are the bare segment; the root sentinel contributes no
        // prefix. Deeper ids are the slash-join of the accumulated prefix,
        // which keeps empty-named segments addressable ("a//b" and friends).
        let id = if depth == 0 {
            segment.clone()
        } else {
            format!("{}/{}", prefix, segment)
        };
        let is_leaf = depth + 1 == path.len();

        let idx = match node.children.iter().position(|c| c.name == *segment) {
            Some(idx) => idx,
            None => {
                node.children.push(TreeNode::new(
                    id.clone(),
                    segment.clone(),
                    LevelType::for_depth(depth, is_leaf),
                ));
                node.children.len() - 1
            }
        };

        node = &mut node.children[idx];
        prefix = id;
    }

    // The true leaf of every input path is a sensor, even when the node was
    // first created as an internal level by a longer sibling path.
    node.level_type = LevelType::Sensor;
    node.status = Some(SensorStatus::Online);
}
