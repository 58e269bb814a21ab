//! Terminal rendering of a tree via `termtree`.
//!
//! Rendering is built bottom-up from a depth-first snapshot and torn down
//! iteratively, so chains of any depth render without growing the call stack.

use std::collections::HashMap;
use std::fmt::{self, Display};

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::node::{Node, NodeId};
use crate::domain::tree::Tree;

pub trait TreeDisplay {
    /// Renders the tree for terminal output, children in stored order.
    fn to_tree_string(&self, show_ids: bool) -> Rendering;
}

/// Rendered tree, printable through `Display`.
#[derive(Debug)]
pub struct Rendering(TermTree<String>);

impl Rendering {
    pub fn tree(&self) -> &TermTree<String> {
        &self.0
    }
}

impl Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Drop for Rendering {
    fn drop(&mut self) {
        // nested leaves would otherwise be dropped recursively
        let mut pending = std::mem::take(&mut self.0.leaves);
        while let Some(mut leaf) = pending.pop() {
            pending.append(&mut leaf.leaves);
        }
    }
}

fn label<T: Display>(node: &Node<T>, show_ids: bool) -> String {
    if show_ids {
        node.to_string()
    } else {
        node.payload().to_string()
    }
}

impl<T: Display> TreeDisplay for Tree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, show_ids: bool) -> Rendering {
        let Some(root) = self.get_root_node() else {
            return Rendering(TermTree::new("Empty tree".to_string()));
        };

        let nodes: Vec<Node<T>> = self
            .dfs(root.id())
            .filter_map(|id| self.get_node(id))
            .collect();

        // pre-order reversed: every child is finished before its parent
        let mut finished: HashMap<NodeId, TermTree<String>> = HashMap::with_capacity(nodes.len());
        for node in nodes.iter().rev() {
            let leaves: Vec<TermTree<String>> = node
                .children()
                .iter()
                .filter_map(|child| finished.remove(child))
                .collect();
            finished.insert(
                node.id(),
                TermTree::new(label(node, show_ids)).with_leaves(leaves),
            );
        }

        let rendered = finished
            .remove(&root.id())
            .unwrap_or_else(|| TermTree::new(label(&root, show_ids)));
        // subtrees left over from a concurrent move
        finished.into_values().for_each(|stray| drop(Rendering(stray)));
        Rendering(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_small_tree_when_rendered_then_lists_children_in_order() {
        let tree = Tree::new(Node::new(0, "root"));
        tree.create_node(1, 0, "a").unwrap();
        tree.create_node(2, 0, "b").unwrap();
        tree.create_node(3, 1, "c").unwrap();

        let rendered = tree.to_tree_string(true).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "0: root");
        assert!(lines[1].ends_with("1: a"));
        assert!(lines[2].ends_with("3: c"));
        assert!(lines[3].ends_with("2: b"));
    }

    #[test]
    fn given_show_ids_off_when_rendered_then_only_payloads_appear() {
        let tree = Tree::new(Node::new(0, "root"));
        tree.create_node(5, 0, "leaf").unwrap();

        let rendered = tree.to_tree_string(false).to_string();
        assert!(rendered.starts_with("root"));
        assert!(!rendered.contains("5:"));
    }

    #[test]
    fn given_deep_chain_when_rendered_then_every_level_is_nested() {
        const DEPTH: NodeId = 20_000;
        let tree = Tree::new(Node::new(0, "n0".to_string()));
        for id in 1..=DEPTH {
            tree.create_node(id, id - 1, format!("n{}", id)).unwrap();
        }

        let rendered = tree.to_tree_string(false);
        let mut current = rendered.tree();
        let mut levels = 0;
        while let Some(next) = current.leaves.first() {
            assert_eq!(current.leaves.len(), 1);
            current = next;
            levels += 1;
        }
        assert_eq!(levels, DEPTH);
        assert_eq!(current.root, format!("n{}", DEPTH));
    }
}
