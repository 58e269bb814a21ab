//! Structural mutations: create, move and splice-delete.
//!
//! Each operation checks every precondition before its first store write and
//! holds the tree's mutation lock until the last one, so writers never
//! interleave and a failed call leaves the tree untouched.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::{Node, NodeId, NO_PARENT};
use crate::domain::tree::Tree;

impl<T> Tree<T> {
    /// Stores a new node under `parent_id`, appended after its current children.
    #[instrument(level = "debug", skip(self, payload))]
    pub fn create_node(&self, id: NodeId, parent_id: NodeId, payload: T) -> TreeResult<Node<T>> {
        self.create_shared(id, parent_id, Arc::new(payload))
    }

    /// [`Tree::create_node`] for a payload that is already shared.
    #[instrument(level = "debug", skip(self, payload))]
    pub fn create_shared(
        &self,
        id: NodeId,
        parent_id: NodeId,
        payload: Arc<T>,
    ) -> TreeResult<Node<T>> {
        let _guard = self.lock.lock();

        if id == self.root_id || id <= NO_PARENT {
            return Err(TreeError::InvalidNodeId(id));
        }
        if self.contains(id) {
            return Err(TreeError::NodeAlreadyExists(id));
        }
        if !self.contains(parent_id) {
            return Err(TreeError::NodeNotFound(parent_id));
        }

        let mut node = Node::with_shared(id, payload);
        node.set_parent(parent_id);
        self.store.insert(id, node.clone());
        if let Some(mut parent) = self.store.get_mut(&parent_id) {
            parent.add_child(id);
        }

        debug!(id, parent_id, "created node");
        Ok(node)
    }

    /// Re-parents `id` under `new_parent_id`, appended after its new siblings.
    ///
    /// Fails with [`TreeError::InvalidSourceDest`] when the destination lies in
    /// the subtree of `id` or `id` is the root. The root itself is always a
    /// valid destination.
    #[instrument(level = "debug", skip(self))]
    pub fn move_node(&self, id: NodeId, new_parent_id: NodeId) -> TreeResult<()> {
        let _guard = self.lock.lock();

        let old_parent_id = self
            .store
            .get(&id)
            .map(|entry| entry.parent_id())
            .ok_or(TreeError::NodeNotFound(id))?;
        if !self.contains(new_parent_id) {
            return Err(TreeError::NodeNotFound(new_parent_id));
        }
        let would_cycle = id == new_parent_id
            || (new_parent_id != self.root_id && self.is_ancestor(id, new_parent_id));
        if id == self.root_id || would_cycle {
            return Err(TreeError::InvalidSourceDest {
                id,
                dest: new_parent_id,
            });
        }
        if old_parent_id == new_parent_id {
            return Ok(());
        }

        if let Some(mut old_parent) = self.store.get_mut(&old_parent_id) {
            old_parent.remove_child(id);
        }
        if let Some(mut new_parent) = self.store.get_mut(&new_parent_id) {
            new_parent.add_child(id);
        }
        if let Some(mut node) = self.store.get_mut(&id) {
            node.set_parent(new_parent_id);
        }

        debug!(id, old_parent_id, new_parent_id, "moved node");
        Ok(())
    }

    /// Removes `id`, re-attaching its children to its former parent.
    ///
    /// Nothing below `id` is deleted: the children keep their order and are
    /// appended after the former parent's remaining children.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&self, id: NodeId) -> TreeResult<()> {
        let _guard = self.lock.lock();

        if id == self.root_id {
            return Err(TreeError::DeleteRootForbidden(id));
        }
        let (parent_id, children) = self
            .store
            .get(&id)
            .map(|entry| (entry.parent_id(), entry.children().to_vec()))
            .ok_or(TreeError::NodeNotFound(id))?;
        if !self.contains(parent_id) {
            return Err(TreeError::NodeNotFound(parent_id));
        }

        for &child in &children {
            if let Some(mut node) = self.store.get_mut(&child) {
                node.set_parent(parent_id);
            }
        }
        if let Some(mut parent) = self.store.get_mut(&parent_id) {
            parent.remove_child(id);
            for &child in &children {
                parent.add_child(child);
            }
        }
        self.store.remove(&id);

        debug!(id, parent_id, reattached = children.len(), "deleted node");
        Ok(())
    }
}
