//! Tower heights follow a truncated geometric distribution: every node is
//! present at level 1, and a node present at level `n` reaches level `n + 1`
//! with probability `p`. The chance of a height of at least `n` is therefore
//! `p^(n - 1)`, which is exactly what the [`ProbabilityTable`] stores.

use rand::{Rng, RngCore};

use crate::{error::Error, options::validate_probability};

/// Precomputed thresholds `p^i` for `i` in `[0, max_level)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    probability: f64,
    thresholds: Box<[f64]>,
}

impl ProbabilityTable {
    /// Builds the table for `probability` with `max_level` entries.
    pub fn new(probability: f64, max_level: usize) -> Self {
        let thresholds = (0..max_level)
            .map(|i| probability.powi(i as i32))
            .collect();

        ProbabilityTable {
            probability,
            thresholds,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of thresholds, equal to the max level it was built for.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Probability that a new tower reaches at least `level + 1` levels.
    pub fn get(&self, level: usize) -> Option<f64> {
        self.thresholds.get(level).copied()
    }
}

/// Picks tower heights for new nodes from an injected random source.
pub struct LevelGenerator<R> {
    table: ProbabilityTable,
    rng: R,
}

impl<R> LevelGenerator<R> {
    pub fn new(table: ProbabilityTable, rng: R) -> Self {
        LevelGenerator { table, rng }
    }

    pub fn max_level(&self) -> usize {
        self.table.len()
    }

    pub fn probability(&self) -> f64 {
        self.table.probability()
    }

    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }

    /// Rebuilds the table for a new probability. Towers that already exist
    /// keep their heights.
    pub fn set_probability(&mut self, probability: f64) -> Result<(), Error> {
        validate_probability(probability)?;
        self.table = ProbabilityTable::new(probability, self.table.len());
        Ok(())
    }
}

impl<R: RngCore> LevelGenerator<R> {
    /// Draws a height in `[1, max_level]`.
    pub fn random_level(&mut self) -> usize {
        let r: f64 = self.rng.random();
        let max_level = self.table.len();

        let mut level = 1;
        while level < max_level && r < self.table.thresholds[level] {
            level += 1;
        }

        level
    }
}


#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::testing::ScriptedRng;
    use super::*;

    #[test]
    fn table_values() {
        let table = ProbabilityTable::new(0.5, 4);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(0), Some(1.0));
        assert_eq!(table.get(1), Some(0.5));
        assert_eq!(table.get(2), Some(0.25));
        assert_eq!(table.get(3), Some(0.125));
        assert_eq!(table.get(4), None);
    }

    #[test]
    fn base_level_always_present() {
        for max_level in 1..=18 {
            let table = ProbabilityTable::new(1.0 / std::f64::consts::E, max_level);
            assert_eq!(table.len(), max_level);
            assert_eq!(table.get(0), Some(1.0));
        }
    }

    #[test]
    fn levels_stay_in_range() {
        let mut generator = LevelGenerator::new(ProbabilityTable::new(0.9, 5), StdRng::seed_from_u64(7));
        for _ in 0..10_000 {
            let level = generator.random_level();
            assert!((1..=5).contains(&level));
        }
    }

    #[test]
    fn single_level_list() {
        let mut generator = LevelGenerator::new(ProbabilityTable::new(0.99, 1), StdRng::seed_from_u64(7));
        for _ in 0..1000 {
            assert_eq!(generator.random_level(), 1);
        }
    }

    #[test]
    fn scripted_draws() {
        let rng = ScriptedRng::for_levels(0.5, &[2, 1, 3, 1, 4]);
        let mut generator = LevelGenerator::new(ProbabilityTable::new(0.5, 4), rng);
        let levels: Vec<usize> = (0..5).map(|_| generator.random_level()).collect();
        assert_eq!(levels, vec![2, 1, 3, 1, 4]);
    }

    #[test]
    fn extreme_draws() {
        // r == 0 climbs to the cap, r close to 1 stays at the base level
        let rng = ScriptedRng::new(&[0.0, 0.999_999]);
        let mut generator = LevelGenerator::new(ProbabilityTable::new(0.5, 6), rng);
        assert_eq!(generator.random_level(), 6);
        assert_eq!(generator.random_level(), 1);
    }

    #[test]
    fn seeded_generators_agree() {
        let table = ProbabilityTable::new(0.5, 12);
        let mut a = LevelGenerator::new(table.clone(), StdRng::seed_from_u64(42));
        let mut b = LevelGenerator::new(table, StdRng::seed_from_u64(42));
        for _ in 0..1000 {
            assert_eq!(a.random_level(), b.random_level());
        }
    }

    #[test]
    fn random_level_distribution() {
        let p = 0.5;
        let max_level = 16;
        let iterations = 100_000;
        let mut generator =
            LevelGenerator::new(ProbabilityTable::new(p, max_level), StdRng::seed_from_u64(1234));

        let mut at_least = vec![0usize; max_level + 1];
        for _ in 0..iterations {
            let level = generator.random_level();
            for count in at_least.iter_mut().take(level + 1).skip(1) {
                *count += 1;
            }
        }

        assert_eq!(at_least[1], iterations);

        // Only check levels with enough samples to be stable
        for level in 2..=6 {
            let observed = at_least[level] as f64 / iterations as f64;
            let expected = p.powi(level as i32 - 1);
            assert!(
                (observed - expected).abs() < expected * 0.1,
                "level {level}: expected {expected}, got {observed}"
            );
        }
    }

    #[test]
    fn set_probability_rebuilds_table() {
        let mut generator = LevelGenerator::new(ProbabilityTable::new(0.5, 4), StdRng::seed_from_u64(3));
        generator.set_probability(0.25).unwrap();
        assert_eq!(generator.probability(), 0.25);
        assert_eq!(generator.max_level(), 4);
        assert_eq!(generator.table().get(1), Some(0.25));
        assert_eq!(generator.table().get(3), Some(0.015625));

        assert_eq!(
            generator.set_probability(1.0),
            Err(Error::InvalidProbability(1.0))
        );
        // A rejected probability leaves the table untouched
        assert_eq!(generator.probability(), 0.25);
    }
}
