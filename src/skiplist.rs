use parking_lot::RwLock;
use rand::{RngCore, rngs::StdRng};

use crate::{error::Error, list::RawSkipList, node::Entry, options::Options};

/// A thread-safe skip list keyed by `f64`.
///
/// Every operation runs under one `RwLock`. Lookups share the read lock,
/// while `set`, `remove` and `set_probability` take it exclusively, so each
/// call appears to happen atomically at one point between its start and end.
pub struct SkipList<V, R = StdRng> {
    inner: RwLock<RawSkipList<V, R>>,
}

impl<V> SkipList<V> {
    /// Create a skip list with the given max level and the default probability.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is outside `[1, MAX_LEVEL]`.
    pub fn new(max_level: usize) -> Self {
        SkipList {
            inner: RwLock::new(RawSkipList::new(max_level)),
        }
    }

    pub fn with_options(options: Options) -> Result<Self, Error> {
        RawSkipList::with_options(options).map(|list| SkipList {
            inner: RwLock::new(list),
        })
    }
}

impl<V> Default for SkipList<V> {
    fn default() -> Self {
        SkipList {
            inner: RwLock::new(RawSkipList::default()),
        }
    }
}

impl<V, R> SkipList<V, R> {
    /// Create a skip list drawing tower heights from `rng`.
    pub fn with_rng(options: Options, rng: R) -> Result<Self, Error> {
        RawSkipList::with_rng(options, rng).map(|list| SkipList {
            inner: RwLock::new(list),
        })
    }

    pub fn get(&self, key: f64) -> Option<Entry<V>> {
        self.inner.read().get(key)
    }

    pub fn contains_key(&self, key: f64) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn remove(&self, key: f64) -> Option<Entry<V>> {
        self.inner.write().remove(key)
    }

    pub fn set_probability(&self, probability: f64) -> Result<(), Error> {
        self.inner.write().set_probability(probability)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn max_level(&self) -> usize {
        self.inner.read().max_level()
    }

    pub fn probability(&self) -> f64 {
        self.inner.read().probability()
    }

    /// Unwrap the single-owner list.
    pub fn into_inner(self) -> RawSkipList<V, R> {
        self.inner.into_inner()
    }
}

impl<V, R: RngCore> SkipList<V, R> {
    pub fn set(&self, key: f64, value: V) -> Result<Entry<V>, Error> {
        self.inner.write().set(key, value)
    }
}

impl<V, R> From<RawSkipList<V, R>> for SkipList<V, R> {
    fn from(list: RawSkipList<V, R>) -> Self {
        SkipList {
            inner: RwLock::new(list),
        }
    }
}
