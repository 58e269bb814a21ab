//! The tree itself: the concurrent id-keyed store and its read-only queries.

use dashmap::DashMap;
use parking_lot::ReentrantMutex;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::{Node, NodeId, ABSENT_ID, NO_PARENT};

/// Lower bound (and default) for `max_level`.
pub const DEFAULT_MAX_LEVEL: usize = 100;

/// Concurrency-safe tree of id-addressed nodes.
///
/// Nodes live in a concurrent map keyed by id; parent and child links are ids
/// resolved through that map. Structural changes (`create_node`, `move_node`,
/// `delete_node`) are serialized by one tree-wide re-entrant lock. Queries and
/// walks never take the lock: a reader racing a writer may briefly observe a
/// child listed under both its old and new parent, or under neither.
#[derive(Debug)]
pub struct Tree<T> {
    pub(crate) store: DashMap<NodeId, Node<T>>,
    pub(crate) root_id: NodeId,
    pub(crate) max_level: usize,
    pub(crate) lock: ReentrantMutex<()>,
}

impl<T> Tree<T> {
    pub fn new(root: Node<T>) -> Self {
        Self::with_max_level(root, DEFAULT_MAX_LEVEL)
    }

    /// Creates a tree owning `root`. Any links on `root` are discarded.
    ///
    /// `max_level` sizes the buffer used when collecting ancestor chains and
    /// never drops below [`DEFAULT_MAX_LEVEL`].
    pub fn with_max_level(mut root: Node<T>, max_level: usize) -> Self {
        root.clear_children();
        root.set_parent(NO_PARENT);
        let root_id = root.id();
        let max_level = max_level.max(DEFAULT_MAX_LEVEL);

        let store = DashMap::new();
        store.insert(root_id, root);
        debug!(root_id, max_level, "created tree");

        Self {
            store,
            root_id,
            max_level,
            lock: ReentrantMutex::new(()),
        }
    }

    /// Fails with [`TreeError::InvalidNode`] when no root is supplied.
    pub fn try_from_root(root: Option<Node<T>>, max_level: Option<usize>) -> TreeResult<Self> {
        let root = root.ok_or(TreeError::InvalidNode)?;
        Ok(Self::with_max_level(
            root,
            max_level.unwrap_or(DEFAULT_MAX_LEVEL),
        ))
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Number of stored nodes, root included.
    pub fn size(&self) -> usize {
        self.store.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.store.contains_key(&id)
    }

    /// Snapshot of the node stored under `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, id: NodeId) -> Option<Node<T>> {
        self.store.get(&id).map(|entry| entry.value().clone())
    }

    pub fn get_root_node(&self) -> Option<Node<T>> {
        self.get_node(self.root_id)
    }

    /// Parent id of `id`: [`NO_PARENT`] for the root, [`ABSENT_ID`] when `id` is absent.
    #[instrument(level = "trace", skip(self))]
    pub fn get_parent_id(&self, id: NodeId) -> NodeId {
        self.store
            .get(&id)
            .map(|entry| entry.parent_id())
            .unwrap_or(ABSENT_ID)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_parent_node(&self, id: NodeId) -> Option<Node<T>> {
        if id == self.root_id {
            return None;
        }
        let parent_id = self.get_node(id)?.parent_id();
        self.get_node(parent_id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.store
            .get(&id)
            .map(|entry| entry.children().to_vec())
            .unwrap_or_default()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_child_nodes(&self, id: NodeId) -> Vec<Node<T>> {
        self.get_child_ids(id)
            .into_iter()
            .filter_map(|child| self.get_node(child))
            .collect()
    }

    /// The parent's other children. The root has no siblings.
    #[instrument(level = "trace", skip(self))]
    pub fn get_sibling_nodes(&self, id: NodeId) -> Vec<Node<T>> {
        match self.get_parent_node(id) {
            Some(parent) => parent
                .children()
                .iter()
                .filter(|&&sibling| sibling != id)
                .filter_map(|&sibling| self.get_node(sibling))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Walks exactly `distance` steps toward the root (1 = parent).
    #[instrument(level = "trace", skip(self))]
    pub fn get_ancestor_node(&self, id: NodeId, distance: usize) -> Option<Node<T>> {
        if id == self.root_id || distance < 1 || distance > self.level(id) {
            return None;
        }
        let ancestor = self.rsearch(id).nth(distance)?;
        self.get_node(ancestor)
    }

    /// Hops from `id` back to the root; the root is level 0, an absent node too.
    pub fn level(&self, id: NodeId) -> usize {
        self.rsearch(id).count().saturating_sub(1)
    }

    /// Number of accepted non-root nodes on the chain from `id` to the root.
    ///
    /// `id` itself counts only when the filter accepts it; a filter rejecting
    /// everything yields 0.
    pub fn level_filtered<F>(&self, id: NodeId, filter: F) -> usize
    where
        F: Fn(&Node<T>) -> bool,
    {
        self.rsearch_filtered(id, filter).count().saturating_sub(1)
    }

    /// Tree height without an id, otherwise the level of `id` (0 when absent).
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: Option<NodeId>) -> usize {
        match id {
            Some(id) => self.level(id),
            None => self
                .get_leaf_nodes(None)
                .iter()
                .map(|leaf| self.level(leaf.id()))
                .max()
                .unwrap_or(0),
        }
    }

    /// Leaves of the whole store ordered by id, or the leaves below `id` in
    /// depth-first order.
    #[instrument(level = "debug", skip(self))]
    pub fn get_leaf_nodes(&self, id: Option<NodeId>) -> Vec<Node<T>> {
        match id {
            Some(id) => self
                .dfs(id)
                .filter_map(|node_id| self.get_node(node_id))
                .filter(Node::is_leaf)
                .collect(),
            None => {
                let mut leaves: Vec<Node<T>> = self
                    .store
                    .iter()
                    .filter(|entry| entry.value().is_leaf())
                    .map(|entry| entry.value().clone())
                    .collect();
                leaves.sort_by_key(Node::id);
                leaves
            }
        }
    }

    /// Ids of the subtree rooted at `id`, `id` included, in depth-first order.
    pub fn get_descendant_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.get_descendant_ids_filtered(id, |_| true)
    }

    /// Ids of the subtree rooted at `id` accepted by `filter`.
    ///
    /// Unlike a filtered walk, a rejected node does not hide its descendants.
    #[instrument(level = "debug", skip(self, filter))]
    pub fn get_descendant_ids_filtered<F>(&self, id: NodeId, filter: F) -> Vec<NodeId>
    where
        F: Fn(&Node<T>) -> bool,
    {
        self.get_descendant_nodes_filtered(id, filter)
            .iter()
            .map(Node::id)
            .collect()
    }

    pub fn get_descendant_nodes(&self, id: NodeId) -> Vec<Node<T>> {
        self.get_descendant_nodes_filtered(id, |_| true)
    }

    #[instrument(level = "debug", skip(self, filter))]
    pub fn get_descendant_nodes_filtered<F>(&self, id: NodeId, filter: F) -> Vec<Node<T>>
    where
        F: Fn(&Node<T>) -> bool,
    {
        let Some(sub) = self.subtree(id) else {
            return Vec::new();
        };
        sub.dfs(id)
            .filter_map(|node_id| sub.get_node(node_id))
            .filter(|node| filter(node))
            .collect()
    }

    /// True when `ancestor_id` lies on the chain from `node_id` up to the root.
    #[instrument(level = "trace", skip(self))]
    pub fn is_ancestor(&self, ancestor_id: NodeId, node_id: NodeId) -> bool {
        if !self.contains(ancestor_id) || !self.contains(node_id) {
            return false;
        }
        self.rsearch(node_id).skip(1).any(|id| id == ancestor_id)
    }

    /// Root-first id chain ending at `id`.
    pub(crate) fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.max_level);
        path.extend(self.rsearch(id));
        path.reverse();
        path
    }
}

impl<T: Send + Sync> Tree<T> {
    /// One root-first path per leaf, in leaf id order.
    #[instrument(level = "debug", skip(self))]
    pub fn get_all_paths(&self) -> Vec<Vec<NodeId>> {
        let leaves: Vec<NodeId> = self.get_leaf_nodes(None).iter().map(Node::id).collect();
        leaves.par_iter().map(|&leaf| self.path_to(leaf)).collect()
    }

    /// Paths of the leaves lying strictly below `id`.
    #[instrument(level = "debug", skip(self))]
    pub fn get_paths(&self, id: NodeId) -> Vec<Vec<NodeId>> {
        let leaves: Vec<NodeId> = self
            .get_leaf_nodes(None)
            .iter()
            .map(Node::id)
            .filter(|&leaf| self.is_ancestor(id, leaf))
            .collect();
        leaves.par_iter().map(|&leaf| self.path_to(leaf)).collect()
    }
}
