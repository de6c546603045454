use crate::MAX_LEVEL;

/// Error type for the [`SkipList`](crate::SkipList).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// The requested maximum level is outside `[1, MAX_LEVEL]`.
    InvalidMaxLevel(usize),

    /// The promotion probability is outside the open interval `(0, 1)`.
    InvalidProbability(f64),

    /// NaN has no position in the key order and cannot be stored.
    NanKey,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMaxLevel(level) => {
                write!(f, "invalid max level {level}, expected 1..={MAX_LEVEL}")
            }
            Self::InvalidProbability(p) => {
                write!(f, "invalid probability {p}, expected a value in (0, 1)")
            }
            Self::NanKey => write!(f, "NaN cannot be used as a key"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::InvalidMaxLevel(19).to_string(),
            "invalid max level 19, expected 1..=18"
        );
        assert_eq!(
            Error::InvalidProbability(1.5).to_string(),
            "invalid probability 1.5, expected a value in (0, 1)"
        );
        assert_eq!(Error::NanKey.to_string(), "NaN cannot be used as a key");
    }
}
