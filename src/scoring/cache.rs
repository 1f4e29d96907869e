//! Score caches
//!
//! Both caches are keyed by the ordinal pair `(secret, guess)` and are safe to
//! share between worker threads.

use crate::config::ScoreCacheKind;
use crate::core::{Codeword, Score};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

/// Marks an unfilled dense slot; `exact + misplaced <= 15` so no score packs to it
const EMPTY: u8 = 0xFF;

/// Default entry limit of the sparse map, about 64 MiB of entries
pub const SPARSE_CACHE_CAPACITY: usize = 1 << 22;

/// Lock stripes of the sparse map; a power of two
const SPARSE_SHARDS: usize = 64;

/// A score cache behind the [`Scorer`](super::Scorer)
pub enum ScoreCache {
    Dense(DenseScoreTable),
    Sparse(SparseScoreMap),
}

impl ScoreCache {
    /// Build the cache of the given kind for a universe of `universe_size` codewords
    #[must_use]
    pub fn new(kind: ScoreCacheKind, universe_size: usize) -> Option<Self> {
        match kind {
            ScoreCacheKind::None => None,
            ScoreCacheKind::Dense => Some(Self::Dense(DenseScoreTable::new(universe_size))),
            ScoreCacheKind::Sparse => Some(Self::Sparse(SparseScoreMap::default())),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ScoreCacheKind {
        match self {
            Self::Dense(_) => ScoreCacheKind::Dense,
            Self::Sparse(_) => ScoreCacheKind::Sparse,
        }
    }

    /// Look up a score, computing and storing it on a miss
    pub fn get_or_insert_with(
        &self,
        secret: u32,
        guess: u32,
        compute: impl FnOnce() -> Score,
    ) -> Score {
        match self {
            Self::Dense(table) => table.get_or_insert_with(secret, guess, compute),
            Self::Sparse(map) => map.get_or_insert_with(secret, guess, compute),
        }
    }

    /// Number of cached entries
    #[must_use]
    pub fn filled(&self) -> usize {
        match self {
            Self::Dense(table) => table.filled(),
            Self::Sparse(map) => map.len(),
        }
    }
}

/// Flat `size × size` table of packed scores
///
/// Slots are atomics so the table can be filled lazily from many threads without a
/// lock: a score is a pure function of its inputs, so racing writers store the same
/// byte.
pub struct DenseScoreTable {
    size: usize,
    slots: Vec<AtomicU8>,
}

impl DenseScoreTable {
    #[must_use]
    pub fn new(size: usize) -> Self {
        let slots = (0..size * size).map(|_| AtomicU8::new(EMPTY)).collect();
        Self { size, slots }
    }

    #[inline]
    fn index(&self, secret: u32, guess: u32) -> usize {
        secret as usize * self.size + guess as usize
    }

    #[must_use]
    pub fn get(&self, secret: u32, guess: u32) -> Option<Score> {
        let value = self.slots[self.index(secret, guess)].load(Ordering::Relaxed);
        (value != EMPTY).then(|| Score::from_value(value))
    }

    pub fn get_or_insert_with(
        &self,
        secret: u32,
        guess: u32,
        compute: impl FnOnce() -> Score,
    ) -> Score {
        let slot = &self.slots[self.index(secret, guess)];
        let value = slot.load(Ordering::Relaxed);
        if value != EMPTY {
            return Score::from_value(value);
        }

        let score = compute();
        slot.store(score.value(), Ordering::Relaxed);
        score
    }

    /// Fill every slot, one rayon task per row
    ///
    /// `universe` must be in ordinal order. Each task owns its row, so no slot is
    /// written by two tasks.
    pub fn fill(&self, universe: &[Codeword]) {
        debug_assert_eq!(universe.len(), self.size);

        self.slots
            .par_chunks(self.size.max(1))
            .zip(universe.par_iter())
            .for_each(|(row, secret)| {
                for (slot, guess) in row.iter().zip(universe) {
                    slot.store(Score::calculate(secret, guess).value(), Ordering::Relaxed);
                }
            });
    }

    /// Number of filled slots
    #[must_use]
    pub fn filled(&self) -> usize {
        self.slots
            .par_iter()
            .filter(|slot| slot.load(Ordering::Relaxed) != EMPTY)
            .count()
    }
}

/// Ordinal-pair hash map for universes too large for a dense table
///
/// The map is split into lock stripes so that misses from different worker threads
/// rarely contend; the write lock of one stripe is the only contention point. It
/// holds at most `capacity` entries: once full, misses are computed but no longer
/// stored, and the scores already cached keep serving hits.
pub struct SparseScoreMap {
    shards: Vec<RwLock<FxHashMap<(u32, u32), Score>>>,
    capacity: usize,
    len: AtomicUsize,
}

impl Default for SparseScoreMap {
    fn default() -> Self {
        Self::with_capacity_limit(SPARSE_CACHE_CAPACITY)
    }
}

impl SparseScoreMap {
    /// Create a map that stores at most `capacity` scores
    #[must_use]
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            shards: (0..SPARSE_SHARDS)
                .map(|_| RwLock::new(FxHashMap::default()))
                .collect(),
            capacity,
            len: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn shard(&self, secret: u32, guess: u32) -> &RwLock<FxHashMap<(u32, u32), Score>> {
        let mixed = (u64::from(secret) << 32 | u64::from(guess)).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        &self.shards[(mixed >> 58) as usize & (SPARSE_SHARDS - 1)]
    }

    pub fn get_or_insert_with(
        &self,
        secret: u32,
        guess: u32,
        compute: impl FnOnce() -> Score,
    ) -> Score {
        let shard = self.shard(secret, guess);
        let cached = shard
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(secret, guess))
            .copied();
        if let Some(score) = cached {
            return score;
        }

        let score = compute();

        // Reserve a slot first so the limit holds with concurrent writers
        let reserved = self
            .len
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |len| {
                (len < self.capacity).then_some(len + 1)
            })
            .is_ok();
        if reserved {
            let previous = shard
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert((secret, guess), score);
            if previous.is_some() {
                self.len.fetch_sub(1, Ordering::AcqRel);
            }
        }
        score
    }

    /// Maximum number of stored scores
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn dense_starts_empty_and_fills_lazily() {
        let table = DenseScoreTable::new(4);
        assert_eq!(table.get(1, 2), None);
        assert_eq!(table.filled(), 0);

        let score = table.get_or_insert_with(1, 2, || Score::new(1, 1));
        assert_eq!(score, Score::new(1, 1));
        assert_eq!(table.get(1, 2), Some(Score::new(1, 1)));
        assert_eq!(table.get(2, 1), None);
        assert_eq!(table.filled(), 1);
    }

    #[test]
    fn dense_hit_skips_compute() {
        let table = DenseScoreTable::new(2);
        table.get_or_insert_with(0, 1, || Score::new(0, 2));
        let score = table.get_or_insert_with(0, 1, || panic!("should be cached"));
        assert_eq!(score, Score::new(0, 2));
    }

    #[test]
    fn dense_fill_matches_calculation() {
        let config = GameConfig::new(3, 3).unwrap();
        let universe = config.all_codewords();
        let table = DenseScoreTable::new(universe.len());
        table.fill(&universe);

        assert_eq!(table.filled(), universe.len() * universe.len());
        for a in &universe {
            for b in &universe {
                let cached = table.get(a.ordinal().unwrap(), b.ordinal().unwrap());
                assert_eq!(cached, Some(Score::calculate(a, b)));
            }
        }
    }

    #[test]
    fn sparse_caches_on_miss() {
        let map = SparseScoreMap::default();
        assert!(map.is_empty());
        map.get_or_insert_with(5, 9, || Score::new(2, 0));
        assert_eq!(map.len(), 1);
        let score = map.get_or_insert_with(5, 9, || panic!("should be cached"));
        assert_eq!(score, Score::new(2, 0));
    }

    #[test]
    fn sparse_stops_storing_at_capacity() {
        let map = SparseScoreMap::with_capacity_limit(8);
        for guess in 0..100 {
            let score = map.get_or_insert_with(1, guess, || Score::new(1, 0));
            assert_eq!(score, Score::new(1, 0));
            assert!(map.len() <= map.capacity());
        }
        assert_eq!(map.len(), 8);

        // Stored entries still hit, the rest are computed every time
        assert_eq!(map.get_or_insert_with(1, 0, || panic!("should be cached")), Score::new(1, 0));
        assert_eq!(map.get_or_insert_with(1, 99, || Score::new(0, 1)), Score::new(0, 1));
    }

    #[test]
    fn sparse_capacity_holds_across_threads() {
        let map = SparseScoreMap::with_capacity_limit(1000);
        (0..64u32).into_par_iter().for_each(|secret| {
            for guess in 0..64 {
                map.get_or_insert_with(secret, guess, || Score::new(0, 0));
                map.get_or_insert_with(secret, guess, || Score::new(0, 0));
            }
        });
        assert_eq!(map.len(), 1000);
    }

    #[test]
    fn cache_kinds() {
        assert!(ScoreCache::new(ScoreCacheKind::None, 10).is_none());
        let dense = ScoreCache::new(ScoreCacheKind::Dense, 10).unwrap();
        assert_eq!(dense.kind(), ScoreCacheKind::Dense);
        let sparse = ScoreCache::new(ScoreCacheKind::Sparse, 10).unwrap();
        assert_eq!(sparse.kind(), ScoreCacheKind::Sparse);
        assert_eq!(sparse.filled(), 0);
    }
}
