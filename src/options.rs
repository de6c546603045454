use crate::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL, error::Error};

/// Construction options for a [`SkipList`](crate::SkipList).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    max_level: usize,
    probability: f64,
    seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

impl Options {
    /// Creates options with [`DEFAULT_MAX_LEVEL`], [`DEFAULT_PROBABILITY`] and
    /// an OS-seeded random source.
    pub const fn new() -> Self {
        Options {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }

    /// Sets the number of levels every tower is capped at.
    pub const fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Sets the probability that a node present at level `i` is also present
    /// at level `i + 1`.
    pub const fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Seeds the level generator, making tower heights reproducible.
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn max_level(&self) -> usize {
        self.max_level
    }

    pub const fn probability(&self) -> f64 {
        self.probability
    }

    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Checks that the max level and probability are in range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_level < 1 || self.max_level > MAX_LEVEL {
            return Err(Error::InvalidMaxLevel(self.max_level));
        }
        validate_probability(self.probability)
    }
}

pub(crate) fn validate_probability(probability: f64) -> Result<(), Error> {
    // NaN fails both comparisons
    if probability > 0.0 && probability < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidProbability(probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.max_level(), 18);
        assert!((options.probability() - 1.0 / std::f64::consts::E).abs() < f64::EPSILON);
        assert_eq!(options.seed(), None);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn max_level_bounds() {
        assert_eq!(
            Options::new().with_max_level(0).validate(),
            Err(Error::InvalidMaxLevel(0))
        );
        assert_eq!(
            Options::new().with_max_level(19).validate(),
            Err(Error::InvalidMaxLevel(19))
        );
        assert!(Options::new().with_max_level(1).validate().is_ok());
        assert!(Options::new().with_max_level(18).validate().is_ok());
    }

    #[test]
    fn probability_bounds() {
        for p in [0.0, 1.0, -0.5, 2.0] {
            assert_eq!(
                Options::new().with_probability(p).validate(),
                Err(Error::InvalidProbability(p))
            );
        }
        assert!(Options::new().with_probability(f64::NAN).validate().is_err());
        assert!(Options::new().with_probability(0.25).validate().is_ok());
    }
}
