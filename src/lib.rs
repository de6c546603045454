//! An ordered, thread-safe key-value container keyed by `f64`, built on a
//! probabilistic skip list.
//!
//! ```
//! use fskip::{Options, SkipList};
//!
//! let list = SkipList::with_options(Options::new().with_max_level(8).with_seed(42)).unwrap();
//! list.set(2.5, "b").unwrap();
//! list.set(1.0, "a").unwrap();
//!
//! assert_eq!(list.get(2.5).map(|e| *e.value()), Some("b"));
//! assert_eq!(list.remove(1.0).map(|e| e.key()), Some(1.0));
//! assert!(list.get(1.0).is_none());
//! ```

use once_cell::sync::Lazy;

mod arena;
pub mod error;
pub mod level;
pub mod list;
pub mod node;
pub mod options;
pub mod skiplist;

pub use error::Error;
pub use level::{LevelGenerator, ProbabilityTable};
pub use list::RawSkipList;
pub use node::Entry;
pub use options::Options;
pub use skiplist::SkipList;

/// Upper bound on the number of levels a list can be built with.
pub const MAX_LEVEL: usize = 18;

/// Number of levels used when none is specified.
pub const DEFAULT_MAX_LEVEL: usize = MAX_LEVEL;

/// Default promotion probability, `1/e`.
pub const DEFAULT_PROBABILITY: f64 = 1.0 / std::f64::consts::E;

/// Table shared by every list built with the default configuration
pub(crate) static DEFAULT_TABLE: Lazy<ProbabilityTable> =
    Lazy::new(|| ProbabilityTable::new(DEFAULT_PROBABILITY, DEFAULT_MAX_LEVEL));
