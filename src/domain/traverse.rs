//! Lazy walks over a tree and subtree extraction.
//!
//! Every iterator here pulls from the store on demand: no work happens ahead
//! of the consumer, and dropping an iterator midway releases everything.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use dashmap::DashMap;
use parking_lot::ReentrantMutex;
use tracing::{debug, instrument};

use crate::domain::node::{Node, NodeId, NO_PARENT};
use crate::domain::tree::Tree;

/// Filter used by the unfiltered walk variants.
pub type AcceptAll<T> = fn(&Node<T>) -> bool;

fn accept_all<T>(_: &Node<T>) -> bool {
    true
}

/// Order in which [`Walk`] expands children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkOrder {
    /// Children are visited before the node's later siblings.
    #[default]
    DepthFirst,
    /// Level by level.
    BreadthFirst,
}

/// Walk over the subtree below a start node, yielding ids.
///
/// The start node is tested against the filter like any other. A rejected
/// node is not yielded and its children are not expanded.
pub struct Walk<'a, T, F> {
    tree: &'a Tree<T>,
    pending: VecDeque<NodeId>,
    order: WalkOrder,
    filter: F,
}

impl<'a, T, F> Walk<'a, T, F>
where
    F: Fn(&Node<T>) -> bool,
{
    fn new(tree: &'a Tree<T>, start: NodeId, order: WalkOrder, filter: F) -> Self {
        Self {
            tree,
            pending: VecDeque::from([start]),
            order,
            filter,
        }
    }
}

impl<T, F> Iterator for Walk<'_, T, F>
where
    F: Fn(&Node<T>) -> bool,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.pending.pop_front() {
            let Some(node) = self.tree.get_node(current) else {
                // removed by a concurrent writer
                continue;
            };
            if !(self.filter)(&node) {
                continue;
            }
            match self.order {
                WalkOrder::DepthFirst => {
                    for &child in node.children().iter().rev() {
                        self.pending.push_front(child);
                    }
                }
                WalkOrder::BreadthFirst => self.pending.extend(node.children()),
            }
            return Some(current);
        }
        None
    }
}

impl<T, F> FusedIterator for Walk<'_, T, F> where F: Fn(&Node<T>) -> bool {}

/// Ancestor chain from a start node up to and including the root.
///
/// The filter applies to every non-root node; the root always terminates the
/// chain. An absent start node yields nothing.
pub struct Ancestors<'a, T, F> {
    tree: &'a Tree<T>,
    next: Option<NodeId>,
    filter: F,
}

impl<T, F> Iterator for Ancestors<'_, T, F>
where
    F: Fn(&Node<T>) -> bool,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.next.take() {
            if current == self.tree.root_id() {
                return Some(current);
            }
            let node = self.tree.get_node(current)?;
            self.next = Some(node.parent_id());
            if (self.filter)(&node) {
                return Some(current);
            }
        }
        None
    }
}

impl<T, F> FusedIterator for Ancestors<'_, T, F> where F: Fn(&Node<T>) -> bool {}

impl<T> Tree<T> {
    pub fn dfs(&self, id: NodeId) -> Walk<'_, T, AcceptAll<T>> {
        self.walk(id, WalkOrder::DepthFirst)
    }

    pub fn dfs_filtered<F>(&self, id: NodeId, filter: F) -> Walk<'_, T, F>
    where
        F: Fn(&Node<T>) -> bool,
    {
        self.walk_filtered(id, WalkOrder::DepthFirst, filter)
    }

    pub fn bfs(&self, id: NodeId) -> Walk<'_, T, AcceptAll<T>> {
        self.walk(id, WalkOrder::BreadthFirst)
    }

    pub fn bfs_filtered<F>(&self, id: NodeId, filter: F) -> Walk<'_, T, F>
    where
        F: Fn(&Node<T>) -> bool,
    {
        self.walk_filtered(id, WalkOrder::BreadthFirst, filter)
    }

    pub fn walk(&self, id: NodeId, order: WalkOrder) -> Walk<'_, T, AcceptAll<T>> {
        self.walk_filtered(id, order, accept_all::<T> as AcceptAll<T>)
    }

    #[instrument(level = "trace", skip(self, filter))]
    pub fn walk_filtered<F>(&self, id: NodeId, order: WalkOrder, filter: F) -> Walk<'_, T, F>
    where
        F: Fn(&Node<T>) -> bool,
    {
        Walk::new(self, id, order, filter)
    }

    /// Ancestor chain of `id`, starting with `id` itself and ending at the root.
    pub fn rsearch(&self, id: NodeId) -> Ancestors<'_, T, AcceptAll<T>> {
        self.rsearch_filtered(id, accept_all::<T> as AcceptAll<T>)
    }

    #[instrument(level = "trace", skip(self, filter))]
    pub fn rsearch_filtered<F>(&self, id: NodeId, filter: F) -> Ancestors<'_, T, F>
    where
        F: Fn(&Node<T>) -> bool,
    {
        Ancestors {
            tree: self,
            next: Some(id),
            filter,
        }
    }

    /// Independent tree rooted at `id`, holding copies of the nodes below it.
    ///
    /// Payloads are shared with this tree; links and the store are not, so
    /// later mutations on either side stay invisible to the other.
    #[instrument(level = "debug", skip(self))]
    pub fn subtree(&self, id: NodeId) -> Option<Tree<T>> {
        if !self.contains(id) {
            return None;
        }
        let store = DashMap::new();
        for node_id in self.dfs(id) {
            if let Some(mut node) = self.get_node(node_id) {
                if node_id == id {
                    node.set_parent(NO_PARENT);
                }
                store.insert(node_id, node);
            }
        }
        debug!(root_id = id, size = store.len(), "extracted subtree");

        Some(Tree {
            store,
            root_id: id,
            max_level: self.max_level,
            lock: ReentrantMutex::new(()),
        })
    }
}
