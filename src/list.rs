use std::sync::Arc;

use rand::{RngCore, SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use crate::{
    DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, DEFAULT_TABLE, MAX_LEVEL,
    arena::Arena,
    error::Error,
    level::{LevelGenerator, ProbabilityTable},
    node::{Entry, NodeId},
    options::Options,
};

/// Per-level predecessors of a key. Only the first `max_level` slots are used.
pub(crate) type Predecessors = [NodeId; MAX_LEVEL];

/// A single-owner skip list keyed by `f64`.
///
/// Mutation needs `&mut self`; wrap it in a [`SkipList`](crate::SkipList)
/// to share it between threads.
pub struct RawSkipList<V, R = StdRng> {
    arena: Arena<V>,
    levels: LevelGenerator<R>,
    len: usize,
}

impl<V> RawSkipList<V> {
    /// Create a list with the given max level and the default probability.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is outside `[1, MAX_LEVEL]`.
    pub fn new(max_level: usize) -> Self {
        match Self::with_options(Options::new().with_max_level(max_level)) {
            Ok(list) => list,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a list from options, seeding the level generator from
    /// [`Options::seed`] or from the operating system.
    pub fn with_options(options: Options) -> Result<Self, Error> {
        let rng = match options.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(options, rng)
    }
}

impl<V> Default for RawSkipList<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL)
    }
}

impl<V, R> RawSkipList<V, R> {
    /// Create a list drawing tower heights from `rng`.
    pub fn with_rng(options: Options, rng: R) -> Result<Self, Error> {
        options.validate()?;

        let max_level = options.max_level();
        let probability = options.probability();
        let table = if max_level == DEFAULT_MAX_LEVEL && probability == DEFAULT_PROBABILITY {
            DEFAULT_TABLE.clone()
        } else {
            ProbabilityTable::new(probability, max_level)
        };

        debug!(
            max_level,
            probability,
            seeded = options.seed().is_some(),
            "created skip list"
        );

        Ok(RawSkipList {
            arena: Arena::new(max_level),
            levels: LevelGenerator::new(table, rng),
            len: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_level(&self) -> usize {
        self.levels.max_level()
    }

    pub fn probability(&self) -> f64 {
        self.levels.probability()
    }

    /// Replace the promotion probability. Only nodes inserted afterwards
    /// are affected.
    pub fn set_probability(&mut self, probability: f64) -> Result<(), Error> {
        self.levels.set_probability(probability)?;
        debug!(probability, "updated skip list probability");
        Ok(())
    }

    /// For every level, find the last node whose key is strictly less than `key`.
    fn find_predecessors(&self, key: f64) -> Predecessors {
        let mut preds = [NodeId::HEAD; MAX_LEVEL];
        let mut x = NodeId::HEAD;

        for level in (0..self.max_level()).rev() {
            while let Some(next) = self.arena.next(x, level) {
                if self.arena.key(next) < key {
                    x = next;
                } else {
                    break;
                }
            }
            preds[level] = x;
        }

        preds
    }

    // The node holding `key`, if the base-level successor of its predecessor matches
    fn matching(&self, preds: &Predecessors, key: f64) -> Option<NodeId> {
        self.arena
            .next(preds[0], 0)
            .filter(|&next| self.arena.key(next) == key)
    }

    /// Look up `key`. NaN never matches.
    pub fn get(&self, key: f64) -> Option<Entry<V>> {
        let preds = self.find_predecessors(key);
        self.matching(&preds, key)
            .map(|id| self.arena.node(id).entry())
    }

    pub fn contains_key(&self, key: f64) -> bool {
        let preds = self.find_predecessors(key);
        self.matching(&preds, key).is_some()
    }

    /// Unlink `key` from every level it occupies and return its entry.
    pub fn remove(&mut self, key: f64) -> Option<Entry<V>> {
        let preds = self.find_predecessors(key);
        let id = self.matching(&preds, key)?;

        let height = self.arena.node(id).height();
        for (level, &pred) in preds.iter().enumerate().take(height) {
            let next = self.arena.next(id, level);
            self.arena.set_next(pred, level, next);
        }

        let node = self.arena.deallocate(id);
        self.len -= 1;
        trace!(key, height, len = self.len, "removed node");

        Some(node.into_entry())
    }
}

impl<V, R: RngCore> RawSkipList<V, R> {
    /// Store `value` under `key`, replacing the value if the key is present.
    pub fn set(&mut self, key: f64, value: V) -> Result<Entry<V>, Error> {
        if key.is_nan() {
            return Err(Error::NanKey);
        }

        let preds = self.find_predecessors(key);
        if let Some(id) = self.matching(&preds, key) {
            let node = self.arena.node_mut(id);
            node.value = Arc::new(value);
            trace!(key, "updated value in place");
            return Ok(node.entry());
        }

        let height = self.levels.random_level();
        let id = self.arena.allocate(key, Arc::new(value), height);

        for (level, &pred) in preds.iter().enumerate().take(height) {
            let next = self.arena.next(pred, level);
            self.arena.set_next(id, level, next);
            self.arena.set_next(pred, level, Some(id));
        }

        self.len += 1;
        trace!(key, height, len = self.len, "inserted node");

        Ok(self.arena.node(id).entry())
    }
}

#[cfg(test)]
impl<V, R> RawSkipList<V, R> {
    /// Keys reachable from the header at `level`, in link order
    pub(crate) fn keys_at(&self, level: usize) -> Vec<f64> {
        let mut keys = Vec::new();
        let mut x = self.arena.next(NodeId::HEAD, level);
        while let Some(id) = x {
            keys.push(self.arena.key(id));
            x = self.arena.next(id, level);
        }
        keys
    }

    pub(crate) fn height_of(&self, key: f64) -> Option<usize> {
        let preds = self.find_predecessors(key);
        self.matching(&preds, key)
            .map(|id| self.arena.node(id).height())
    }

    /// Check ordering, tower shape and length bookkeeping
    pub(crate) fn assert_invariants(&self) {
        let max_level = self.max_level();
        assert_eq!(self.levels.table().len(), max_level);
        assert_eq!(self.levels.table().get(0), Some(1.0));

        for level in 0..max_level {
            let keys = self.keys_at(level);
            assert!(
                keys.windows(2).all(|w| w[0] < w[1]),
                "level {level} out of order: {keys:?}"
            );

            let mut x = self.arena.next(NodeId::HEAD, level);
            while let Some(id) = x {
                assert!(self.arena.node(id).height() > level);
                x = self.arena.next(id, level);
            }

            if level > 0 {
                let below = self.keys_at(level - 1);
                for key in keys {
                    assert!(below.contains(&key), "{key} at level {level} but not below");
                }
            }
        }

        assert_eq!(self.keys_at(0).len(), self.len);
        assert_eq!(self.arena.live(), self.len);
    }
}
