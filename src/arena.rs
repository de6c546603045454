use std::sync::Arc;

use crate::node::{Node, NodeId};

/// Contiguous storage for [`Node`]s.
///
/// Links between nodes are [`NodeId`] indices into the arena. Slot 0 is
/// reserved for the header, whose tower is kept in `head`.
pub(crate) struct Arena<V> {
    head: Box<[Option<NodeId>]>,
    slots: Vec<Option<Node<V>>>,
    // Vacated slots, reused before the vector grows
    free: Vec<usize>,
}

impl<V> Arena<V> {
    pub(crate) fn new(max_level: usize) -> Self {
        Arena {
            head: vec![None; max_level].into_boxed_slice(),
            slots: vec![None],
            free: Vec::new(),
        }
    }

    /// Store a node with the given height, all of its links unset
    pub(crate) fn allocate(&mut self, key: f64, value: Arc<V>, height: usize) -> NodeId {
        let node = Node::new(key, value, height);
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Take a node out of the arena. The caller must have unlinked it first.
    pub(crate) fn deallocate(&mut self, id: NodeId) -> Node<V> {
        debug_assert_ne!(id, NodeId::HEAD, "the header is never deallocated");
        let node = self.slots[id.0].take();
        self.free.push(id.0);
        node.unwrap_or_else(|| panic!("node {} deallocated twice", id.0))
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<V> {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {}", id.0),
        }
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {}", id.0),
        }
    }

    /// Successor of `id` at `level`; `id` may be the header
    #[inline]
    pub(crate) fn next(&self, id: NodeId, level: usize) -> Option<NodeId> {
        if id == NodeId::HEAD {
            self.head[level]
        } else {
            self.node(id).forward[level]
        }
    }

    #[inline]
    pub(crate) fn set_next(&mut self, id: NodeId, level: usize, next: Option<NodeId>) {
        if id == NodeId::HEAD {
            self.head[level] = next;
        } else {
            self.node_mut(id).forward[level] = next;
        }
    }

    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> f64 {
        self.node(id).key
    }

    /// Number of slots in use, header excluded
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - 1 - self.free.len()
    }
}
