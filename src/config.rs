//! Game configuration
//!
//! Pin and color counts, the guess algorithm and the caching switches, validated
//! once before any game is played.

use crate::core::{Codeword, CodewordError, MAX_COLOR, MAX_PINS, Score};
use clap::ValueEnum;
use std::fmt;

/// Largest universe we are willing to enumerate (`color_count ^ pin_count`)
pub const MAX_UNIVERSE: u64 = 1 << 24;

/// Upper bound on the dense score table, one byte per ordered codeword pair
pub const DENSE_CACHE_LIMIT_BYTES: u64 = 1 << 31;

/// Dense tables up to this size are enabled by default
const DEFAULT_DENSE_BYTES: u64 = 1 << 28;

/// How the next guess is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum Algorithm {
    /// Play the first remaining candidate
    FirstCandidate,
    /// Play a uniformly random remaining candidate
    RandomCandidate,
    /// Knuth's minimax: minimize the worst-case remaining candidates
    #[default]
    Minimax,
}

impl Algorithm {
    /// All algorithms, in comparison order
    pub const ALL: [Self; 3] = [Self::FirstCandidate, Self::RandomCandidate, Self::Minimax];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FirstCandidate => "first-candidate",
            Self::RandomCandidate => "random-candidate",
            Self::Minimax => "minimax",
        };
        write!(f, "{name}")
    }
}

/// Minimax tie-break policy among guesses with equal worst case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum TieBreak {
    /// Prefer a guess that is still a possible solution, then the first seen
    #[default]
    PreferCandidates,
    /// Keep the first guess seen in universe order
    FirstSeen,
}

/// Score cache backing the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ScoreCacheKind {
    /// Always compute
    None,
    /// `universe²` byte table indexed by ordinal pair
    Dense,
    /// Hash map keyed by ordinal pair, filled on demand
    Sparse,
}

/// Error type for rejected configurations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    PinCountOutOfRange(u8),
    ColorCountOutOfRange(u8),
    UniverseTooLarge { size: u64 },
    ScoreCacheTooLarge { bytes: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinCountOutOfRange(pins) => {
                write!(f, "Pin count must be 1-{MAX_PINS}, got {pins}")
            }
            Self::ColorCountOutOfRange(colors) => {
                write!(f, "Color count must be 1-{MAX_COLOR}, got {colors}")
            }
            Self::UniverseTooLarge { size } => {
                write!(
                    f,
                    "Codeword universe of {size} is too large to enumerate (max {MAX_UNIVERSE})"
                )
            }
            Self::ScoreCacheTooLarge { bytes } => {
                write!(
                    f,
                    "Dense score cache needs {:.2}GiB, limit is {:.2}GiB",
                    *bytes as f64 / 1_073_741_824.0,
                    DENSE_CACHE_LIMIT_BYTES as f64 / 1_073_741_824.0
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for a Mastermind solving run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pin_count: u8,
    color_count: u8,
    pub algorithm: Algorithm,
    pub tie_break: TieBreak,
    pub score_cache: ScoreCacheKind,
    pub strategy_cache: bool,
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Create a configuration with default strategy settings
    ///
    /// The dense score cache is enabled when the universe is small enough.
    ///
    /// # Errors
    /// Returns `ConfigError` if the pin or color count is out of range, or the
    /// universe is too large to enumerate.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::config::GameConfig;
    ///
    /// let config = GameConfig::new(4, 6).unwrap();
    /// assert_eq!(config.universe_size(), 1296);
    /// assert_eq!(config.opening_guess().to_string(), "1122");
    ///
    /// assert!(GameConfig::new(0, 6).is_err());
    /// ```
    pub fn new(pin_count: u8, color_count: u8) -> Result<Self, ConfigError> {
        if !(1..=MAX_PINS).contains(&pin_count) {
            return Err(ConfigError::PinCountOutOfRange(pin_count));
        }
        if !(1..=MAX_COLOR).contains(&color_count) {
            return Err(ConfigError::ColorCountOutOfRange(color_count));
        }

        let size = u64::from(color_count).pow(u32::from(pin_count));
        if size > MAX_UNIVERSE {
            return Err(ConfigError::UniverseTooLarge { size });
        }

        let score_cache = if size * size <= DEFAULT_DENSE_BYTES {
            ScoreCacheKind::Dense
        } else {
            ScoreCacheKind::None
        };

        Ok(Self {
            pin_count,
            color_count,
            algorithm: Algorithm::default(),
            tie_break: TieBreak::default(),
            score_cache,
            strategy_cache: true,
            seed: None,
        })
    }

    /// The classic 4-pin, 6-color game
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            pin_count: 4,
            color_count: 6,
            algorithm: Algorithm::Minimax,
            tie_break: TieBreak::PreferCandidates,
            score_cache: ScoreCacheKind::Dense,
            strategy_cache: true,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub const fn with_score_cache(mut self, score_cache: ScoreCacheKind) -> Self {
        self.score_cache = score_cache;
        self
    }

    #[must_use]
    pub const fn with_strategy_cache(mut self, enabled: bool) -> Self {
        self.strategy_cache = enabled;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Check the whole configuration, including the requested score cache
    ///
    /// # Errors
    /// Returns `ConfigError::ScoreCacheTooLarge` if a dense cache was requested for
    /// a universe whose table would exceed [`DENSE_CACHE_LIMIT_BYTES`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Re-run the range checks, the fields may have come from elsewhere
        Self::new(self.pin_count, self.color_count)?;

        if self.score_cache == ScoreCacheKind::Dense {
            let bytes = self.dense_cache_bytes();
            if bytes > DENSE_CACHE_LIMIT_BYTES {
                return Err(ConfigError::ScoreCacheTooLarge { bytes });
            }
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn pin_count(&self) -> u8 {
        self.pin_count
    }

    #[inline]
    #[must_use]
    pub const fn color_count(&self) -> u8 {
        self.color_count
    }

    /// Number of codewords, `color_count ^ pin_count`
    #[must_use]
    pub fn universe_size(&self) -> usize {
        usize::from(self.color_count).pow(u32::from(self.pin_count))
    }

    /// Bytes needed by a dense score table for this universe
    #[must_use]
    pub fn dense_cache_bytes(&self) -> u64 {
        let size = self.universe_size() as u64;
        size * size
    }

    /// The winning score `(pin_count, 0)`
    #[must_use]
    pub const fn winning_score(&self) -> Score {
        Score::winning(self.pin_count)
    }

    /// Every codeword in ordinal order
    #[must_use]
    pub fn all_codewords(&self) -> Vec<Codeword> {
        (0..self.universe_size() as u32)
            .map(|ordinal| Codeword::from_ordinal(ordinal, self.pin_count, self.color_count))
            .collect()
    }

    /// The fixed opening guess
    ///
    /// Generalizes Knuth's `1122`: the first half of the pins (rounded down) take
    /// the first color, the rest take the second color (or the first, in a
    /// one-color game).
    #[must_use]
    pub fn opening_guess(&self) -> Codeword {
        let ones = usize::from(self.pin_count / 2);
        let second = 2.min(self.color_count);
        let pins: Vec<u8> = (0..usize::from(self.pin_count))
            .map(|i| if i < ones { 1 } else { second })
            .collect();

        Codeword::from_pins(&pins)
            .ok()
            .and_then(|code| self.resolve(&code).ok())
            .unwrap_or_else(|| Codeword::from_ordinal(0, self.pin_count, self.color_count))
    }

    /// Check that a codeword belongs to this universe and attach its ordinal
    ///
    /// # Errors
    /// Returns `CodewordError` if the pin count differs or a pin color is outside
    /// `1..=color_count`.
    pub fn resolve(&self, code: &Codeword) -> Result<Codeword, CodewordError> {
        if code.pin_count() != self.pin_count {
            return Err(CodewordError::PinCountMismatch {
                expected: self.pin_count,
                actual: code.pin_count(),
            });
        }

        if let Some(color) = code
            .pins()
            .find(|color| !(1..=self.color_count).contains(color))
        {
            return Err(CodewordError::ColorOutOfRange {
                color,
                color_count: self.color_count,
            });
        }

        code.key(self.color_count)
            .map(|ordinal| code.with_ordinal(ordinal))
            .ok_or(CodewordError::InvalidLength(usize::from(code.pin_count())))
    }

    /// Parse a codeword and resolve it against this universe
    ///
    /// # Errors
    /// Returns `CodewordError` if the text is not a valid codeword of this game.
    pub fn parse_codeword(&self, text: &str) -> Result<Codeword, CodewordError> {
        self.resolve(&text.parse()?)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_matches_new() {
        assert_eq!(GameConfig::new(4, 6).unwrap(), GameConfig::classic());
    }

    #[test]
    fn rejects_out_of_range_counts() {
        assert_eq!(GameConfig::new(0, 6), Err(ConfigError::PinCountOutOfRange(0)));
        assert_eq!(GameConfig::new(16, 6), Err(ConfigError::PinCountOutOfRange(16)));
        assert_eq!(GameConfig::new(4, 0), Err(ConfigError::ColorCountOutOfRange(0)));
        assert_eq!(GameConfig::new(4, 16), Err(ConfigError::ColorCountOutOfRange(16)));
    }

    #[test]
    fn rejects_huge_universe() {
        assert!(matches!(
            GameConfig::new(15, 15),
            Err(ConfigError::UniverseTooLarge { .. })
        ));
        assert!(GameConfig::new(8, 8).is_ok());
    }

    #[test]
    fn dense_cache_limit() {
        // 8p8c has 16.7M codewords, far too many for a dense table
        let config = GameConfig::new(8, 8)
            .unwrap()
            .with_score_cache(ScoreCacheKind::Dense);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScoreCacheTooLarge { .. })
        ));

        let config = config.with_score_cache(ScoreCacheKind::Sparse);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_cache_depends_on_size() {
        assert_eq!(GameConfig::new(4, 6).unwrap().score_cache, ScoreCacheKind::Dense);
        assert_eq!(GameConfig::new(8, 8).unwrap().score_cache, ScoreCacheKind::None);
    }

    #[test]
    fn opening_guess_generalizes_knuth() {
        let opening = |p, c| GameConfig::new(p, c).unwrap().opening_guess().to_string();
        assert_eq!(opening(4, 6), "1122");
        assert_eq!(opening(5, 8), "11222");
        assert_eq!(opening(6, 9), "111222");
        assert_eq!(opening(1, 6), "2");
        assert_eq!(opening(3, 1), "111");
    }

    #[test]
    fn opening_guess_has_ordinal() {
        let opening = GameConfig::classic().opening_guess();
        assert_eq!(opening.ordinal(), Some(7));
    }

    #[test]
    fn all_codewords_enumerates_universe() {
        let config = GameConfig::new(3, 4).unwrap();
        let all = config.all_codewords();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0].to_string(), "111");
        assert_eq!(all[63].to_string(), "444");
        for (i, code) in all.iter().enumerate() {
            assert_eq!(code.ordinal(), Some(i as u32));
        }
    }

    #[test]
    fn resolve_validates_membership() {
        let config = GameConfig::classic();
        assert_eq!(config.parse_codeword("3632").unwrap().ordinal(), Some(2 * 216 + 5 * 36 + 2 * 6 + 1));
        assert_eq!(
            config.parse_codeword("6700"),
            Err(CodewordError::ColorOutOfRange {
                color: 7,
                color_count: 6
            })
        );
        assert_eq!(
            config.parse_codeword("123"),
            Err(CodewordError::PinCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn algorithm_names() {
        assert_eq!(Algorithm::Minimax.to_string(), "minimax");
        assert_eq!(Algorithm::FirstCandidate.to_string(), "first-candidate");
        assert_eq!(Algorithm::default(), Algorithm::Minimax);
    }
}
