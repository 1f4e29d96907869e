//! Codeword scoring
//!
//! The [`Scorer`] computes scores by counting with exclusion and, when configured,
//! memoizes them in a [`ScoreCache`]. The cache only changes speed, never results.

mod cache;

pub use cache::{DenseScoreTable, SPARSE_CACHE_CAPACITY, ScoreCache, SparseScoreMap};

use crate::config::{GameConfig, ScoreCacheKind};
use crate::core::{Codeword, Score};
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Scores codewords, optionally through a cache, counting every comparison
pub struct Scorer {
    cache: Option<ScoreCache>,
    comparisons: AtomicU64,
}

impl Scorer {
    /// Create a scorer with the cache the configuration asks for
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let cache = ScoreCache::new(config.score_cache, config.universe_size());
        if config.score_cache == ScoreCacheKind::Dense {
            debug!(
                "Setup score cache of {:.2}MiB",
                config.dense_cache_bytes() as f64 / 1_048_576.0
            );
        } else if config.score_cache == ScoreCacheKind::Sparse {
            debug!("Setup sparse score cache of at most {SPARSE_CACHE_CAPACITY} entries");
        }

        Self {
            cache,
            comparisons: AtomicU64::new(0),
        }
    }

    /// Create a scorer that always computes
    #[must_use]
    pub const fn uncached() -> Self {
        Self {
            cache: None,
            comparisons: AtomicU64::new(0),
        }
    }

    /// Score `guess` against `secret`
    ///
    /// Codewords without an ordinal (not resolved against a universe) bypass the
    /// cache.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::{Codeword, Score};
    /// use mastermind_solver::scoring::Scorer;
    ///
    /// let scorer = Scorer::uncached();
    /// let secret: Codeword = "6684".parse().unwrap();
    /// let guess: Codeword = "6666".parse().unwrap();
    /// assert_eq!(scorer.score(&secret, &guess), Score::new(2, 0));
    /// assert_eq!(scorer.comparisons(), 1);
    /// ```
    pub fn score(&self, secret: &Codeword, guess: &Codeword) -> Score {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
        self.score_uncounted(secret, guess)
    }

    /// Score without touching the comparison counter
    ///
    /// Hot loops use this and report their total once via [`Self::record_comparisons`],
    /// keeping the shared counter out of the inner loop.
    pub(crate) fn score_uncounted(&self, secret: &Codeword, guess: &Codeword) -> Score {
        match (&self.cache, secret.ordinal(), guess.ordinal()) {
            (Some(cache), Some(s), Some(g)) => {
                cache.get_or_insert_with(s, g, || Score::calculate(secret, guess))
            }
            _ => Score::calculate(secret, guess),
        }
    }

    pub(crate) fn record_comparisons(&self, count: usize) {
        self.comparisons.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Total comparisons since creation or the last reset
    #[must_use]
    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    pub fn reset_comparisons(&self) {
        self.comparisons.store(0, Ordering::Relaxed);
    }

    /// The active cache kind
    #[must_use]
    pub fn cache_kind(&self) -> ScoreCacheKind {
        self.cache
            .as_ref()
            .map_or(ScoreCacheKind::None, ScoreCache::kind)
    }

    /// Number of cached scores
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache.as_ref().map_or(0, ScoreCache::filled)
    }

    /// Check this scorer against the reference vectors, in both directions
    ///
    /// # Errors
    /// Returns the first `VectorError` found.
    pub fn self_test(&self) -> Result<(), crate::vectors::VectorError> {
        crate::vectors::self_test(self)
    }

    /// Fill a dense cache ahead of time
    ///
    /// Does nothing for sparse or absent caches, which only fill on demand.
    pub fn precompute(&self, universe: &[Codeword]) {
        if let Some(ScoreCache::Dense(table)) = &self.cache {
            table.fill(universe);
            debug!("Precomputed {} scores", universe.len() * universe.len());
        }
    }
}
