//! Hierarchy files: TOML descriptions of a tree, loaded into and snapshotted from `Tree<String>`.
//!
//! ```toml
//! [root]
//! id = 0
//! name = "company"
//!
//! [[nodes]]
//! id = 1
//! parent = 0
//! name = "engineering"
//! ```
//!
//! Entries may appear in any order; parents need not precede their children.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::error_ext::IoResultExt;
use crate::config::Settings;
use crate::domain::{Node, NodeId, Tree, TreeError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootEntry {
    pub id: NodeId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeEntry {
    pub id: NodeId,
    pub parent: NodeId,
    pub name: String,
}

/// Serializable form of a `Tree<String>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HierarchyFile {
    pub root: RootEntry,
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
}

impl HierarchyFile {
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> ApplicationResult<Self> {
        let content = fs::read_to_string(path).with_path_context("read", path)?;
        toml::from_str(&content).map_err(|e| ApplicationError::hierarchy(path, e.to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn save(&self, path: &Path) -> ApplicationResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ApplicationError::hierarchy(path, e.to_string()))?;
        fs::write(path, content).with_path_context("write", path)?;
        info!(path = %path.display(), nodes = self.nodes.len() + 1, "saved hierarchy");
        Ok(())
    }

    /// Builds the tree breadth-first from the root.
    ///
    /// Duplicate ids surface as tree errors. Entries whose parent chain never
    /// reaches the root (missing parents, cycles) are reported together.
    #[instrument(level = "debug", skip(self))]
    pub fn build_tree(&self, max_level: usize) -> ApplicationResult<Tree<String>> {
        let mut by_parent: HashMap<NodeId, Vec<&NodeEntry>> = HashMap::new();
        for entry in &self.nodes {
            by_parent.entry(entry.parent).or_default().push(entry);
        }

        let tree = Tree::with_max_level(Node::new(self.root.id, self.root.name.clone()), max_level);
        let mut queue = VecDeque::from([self.root.id]);
        while let Some(parent) = queue.pop_front() {
            let Some(children) = by_parent.remove(&parent) else {
                continue;
            };
            for entry in children {
                tree.create_node(entry.id, parent, entry.name.clone())?;
                queue.push_back(entry.id);
            }
        }

        if !by_parent.is_empty() {
            let mut ids: Vec<NodeId> = by_parent.values().flatten().map(|e| e.id).collect();
            ids.sort_unstable();
            return Err(ApplicationError::Unreachable { ids });
        }

        debug!(size = tree.size(), "built tree from hierarchy");
        Ok(tree)
    }

    /// Breadth-first snapshot; rebuilding it reproduces sibling order.
    #[instrument(level = "debug", skip(tree))]
    pub fn snapshot(tree: &Tree<String>) -> ApplicationResult<Self> {
        let root = tree.get_root_node().ok_or(TreeError::InvalidNode)?;
        let nodes = tree
            .bfs(tree.root_id())
            .skip(1)
            .filter_map(|id| tree.get_node(id))
            .map(|node| NodeEntry {
                id: node.id(),
                parent: node.parent_id(),
                name: node.payload().clone(),
            })
            .collect();

        Ok(Self {
            root: RootEntry {
                id: root.id(),
                name: root.payload().clone(),
            },
            nodes,
        })
    }
}

/// Loads a hierarchy file and builds its tree with the configured `max_level`.
///
/// Unreachable entries are reported against the file they came from.
pub fn load_tree(path: &Path, settings: &Settings) -> ApplicationResult<Tree<String>> {
    HierarchyFile::load(path)?
        .build_tree(settings.max_level)
        .map_err(|e| match e {
            ApplicationError::Unreachable { ids } => ApplicationError::hierarchy(
                path,
                format!("nodes not reachable from the root: {}", ids.iter().join(", ")),
            ),
            other => other,
        })
}

/// Writes the current state of `tree` back to `path`.
pub fn save_tree(path: &Path, tree: &Tree<String>) -> ApplicationResult<()> {
    HierarchyFile::snapshot(tree)?.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: NodeId, parent: NodeId, name: &str) -> NodeEntry {
        NodeEntry {
            id,
            parent,
            name: name.to_string(),
        }
    }

    fn file(nodes: Vec<NodeEntry>) -> HierarchyFile {
        HierarchyFile {
            root: RootEntry {
                id: 0,
                name: "root".to_string(),
            },
            nodes,
        }
    }

    #[test]
    fn given_children_listed_before_parents_when_building_then_links_resolve() {
        let hierarchy = file(vec![entry(3, 2, "c"), entry(2, 1, "b"), entry(1, 0, "a")]);
        let tree = hierarchy.build_tree(100).unwrap();
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.get_parent_id(3), 2);
        assert_eq!(tree.level(3), 3);
    }

    #[test]
    fn given_orphans_and_cycle_when_building_then_reports_unreachable_ids() {
        let hierarchy = file(vec![
            entry(1, 0, "a"),
            entry(2, 42, "orphan"),
            entry(5, 6, "x"),
            entry(6, 5, "y"),
        ]);
        match hierarchy.build_tree(100) {
            Err(ApplicationError::Unreachable { ids }) => assert_eq!(ids, vec![2, 5, 6]),
            other => panic!("expected unreachable error, got {:?}", other.map(|t| t.size())),
        }
    }

    #[test]
    fn given_duplicate_id_when_building_then_fails_with_tree_error() {
        let hierarchy = file(vec![entry(1, 0, "a"), entry(1, 0, "again")]);
        let err = hierarchy.build_tree(100).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Tree(TreeError::NodeAlreadyExists(1))
        ));
    }

    #[test]
    fn given_tree_when_snapshotted_then_rebuild_matches() {
        let hierarchy = file(vec![entry(1, 0, "a"), entry(2, 0, "b"), entry(3, 1, "c")]);
        let tree = hierarchy.build_tree(100).unwrap();
        tree.move_node(3, 2).unwrap();

        let snapshot = HierarchyFile::snapshot(&tree).unwrap();
        let rebuilt = snapshot.build_tree(100).unwrap();
        assert_eq!(rebuilt.get_child_ids(0), vec![1, 2]);
        assert_eq!(rebuilt.get_child_ids(2), vec![3]);
        assert_eq!(rebuilt.get_all_paths(), tree.get_all_paths());
    }
}
