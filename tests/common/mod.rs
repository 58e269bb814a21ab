#![allow(dead_code)]

use idtree::domain::{Node, NodeId, Tree};
use idtree::util::testing;

/// Reference hierarchy used across the integration tests.
///
/// ```text
/// 0
/// ├── 1
/// ├── 2
/// │   ├── 5
/// │   ├── 6
/// │   │   ├── 12
/// │   │   ├── 13
/// │   │   │   └── 16
/// │   │   ├── 14
/// │   │   └── 15
/// │   └── 7
/// ├── 3
/// └── 4
/// ```
pub const EDGES: [(NodeId, NodeId); 12] = [
    (1, 0),
    (2, 0),
    (3, 0),
    (4, 0),
    (5, 2),
    (6, 2),
    (7, 2),
    (12, 6),
    (13, 6),
    (14, 6),
    (15, 6),
    (16, 13),
];

pub fn name(id: NodeId) -> String {
    format!("unit-{}", id)
}

pub fn scenario_tree() -> Tree<String> {
    testing::init_test_setup();
    let tree = Tree::new(Node::new(0, name(0)));
    for (id, parent) in EDGES {
        tree.create_node(id, parent, name(id)).unwrap();
    }
    tree
}

/// Checks the structural invariants that must hold whenever no writer is active.
pub fn assert_consistent<T>(tree: &Tree<T>) {
    let root = tree.root_id();
    let mut seen_as_child = Vec::new();

    for id in tree.dfs(root) {
        let node = tree.get_node(id).unwrap();
        assert!(!tree.is_ancestor(id, id), "{} is its own ancestor", id);
        for &child in node.children() {
            assert_eq!(tree.get_parent_id(child), id, "parent link of {}", child);
            seen_as_child.push(child);
        }
    }

    let mut unique = seen_as_child.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), seen_as_child.len(), "a node is listed twice");
    assert!(!seen_as_child.contains(&root), "root listed as a child");
    assert_eq!(tree.dfs(root).count(), tree.size(), "unreachable nodes in store");
}
