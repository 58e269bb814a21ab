//! Tree vertex: identity, structural links and an opaque payload.

use std::fmt;
use std::sync::Arc;

/// Identifier of a node within one tree. Assigned by the caller.
pub type NodeId = i64;

/// Parent id recorded on the root (and on detached nodes).
///
/// Non-root ids are strictly positive, so `0` never names a real parent.
pub const NO_PARENT: NodeId = 0;

/// Returned by id-valued getters when the requested node is absent.
pub const ABSENT_ID: NodeId = -1;

/// Tree node in the id-indexed store.
///
/// All cross-references are ids resolved through the owning tree. The
/// structural mutators are crate-private: only the tree changes links, and it
/// does so while holding its mutation lock.
pub struct Node<T> {
    id: NodeId,
    parent_id: NodeId,
    /// Child ids in insertion order, without duplicates
    children: Vec<NodeId>,
    payload: Arc<T>,
}

// Manual impl: cloning shares the payload and must not require `T: Clone`.
impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            parent_id: self.parent_id,
            children: self.children.clone(),
            payload: Arc::clone(&self.payload),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("parent_id", &self.parent_id)
            .field("children", &self.children)
            .field("payload", &self.payload)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.payload)
    }
}

impl<T> Node<T> {
    pub fn new(id: NodeId, payload: T) -> Self {
        Self::with_shared(id, Arc::new(payload))
    }

    /// Creates a node around an already shared payload.
    pub fn with_shared(id: NodeId, payload: Arc<T>) -> Self {
        Self {
            id,
            parent_id: NO_PARENT,
            children: Vec::new(),
            payload,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent_id(&self) -> NodeId {
        self.parent_id
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Shared handle to the payload; identical across clones and subtrees.
    pub fn shared_payload(&self) -> &Arc<T> {
        &self.payload
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Appends `id` unless it is not a valid child id or already present.
    pub(crate) fn add_child(&mut self, id: NodeId) {
        if id <= NO_PARENT || self.children.contains(&id) {
            return;
        }
        self.children.push(id);
    }

    pub(crate) fn remove_child(&mut self, id: NodeId) {
        if id <= NO_PARENT {
            return;
        }
        if let Some(pos) = self.children.iter().position(|&c| c == id) {
            self.children.remove(pos);
        }
    }

    pub(crate) fn set_parent(&mut self, id: NodeId) {
        self.parent_id = id;
    }

    pub(crate) fn clear_children(&mut self) {
        self.children.clear();
    }
}
