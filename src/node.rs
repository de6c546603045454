use std::sync::Arc;

/// Index of a node inside the [`Arena`](crate::arena::Arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

impl NodeId {
    /// Reserved id of the header tower.
    pub(crate) const HEAD: NodeId = NodeId(0);
}

// A stored key/value pair and its tower of forward links
pub(crate) struct Node<V> {
    pub(crate) key: f64,
    pub(crate) value: Arc<V>,
    // forward[i] is the next node at level i; the tower height is forward.len()
    pub(crate) forward: Box<[Option<NodeId>]>,
}

impl<V> Node<V> {
    pub(crate) fn new(key: f64, value: Arc<V>, height: usize) -> Self {
        Node {
            key,
            value,
            forward: vec![None; height].into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }

    pub(crate) fn entry(&self) -> Entry<V> {
        Entry {
            key: self.key,
            value: Arc::clone(&self.value),
        }
    }

    pub(crate) fn into_entry(self) -> Entry<V> {
        Entry {
            key: self.key,
            value: self.value,
        }
    }
}

/// A read-only handle to a stored key/value pair.
///
/// The handle is a snapshot: a later `set` on the same key replaces the
/// value inside the list but not the value this handle points at.
#[derive(Debug)]
pub struct Entry<V> {
    key: f64,
    value: Arc<V>,
}

impl<V> Clone for Entry<V> {
    fn clone(&self) -> Self {
        Entry {
            key: self.key,
            value: Arc::clone(&self.value),
        }
    }
}

impl<V> Entry<V> {
    #[inline]
    pub fn key(&self) -> f64 {
        self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the handle, returning the shared value.
    pub fn into_value(self) -> Arc<V> {
        self.value
    }
}
