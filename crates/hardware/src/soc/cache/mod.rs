//! Set-Associative Cache.
//!
//! A write-through, write-allocate cache placed in front of any
//! [`DataMemory`]. Every access is forwarded to the backing memory, so results
//! are identical with or without the cache; only the hit and miss counters
//! differ. One way per set gives a direct-mapped cache.

/// LRU replacement policy.
pub mod lru;

use serde::Serialize;
use tracing::trace;

use self::lru::{LruPolicy, ReplacementPolicy};
use super::traits::DataMemory;
use crate::common::reg::Word;
use crate::config::CacheConfig;

/// Access counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
}

impl CacheStats {
    /// Hits over total accesses, or 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    tag: usize,
    valid: bool,
}

/// Cache decorator over a backing memory.
#[derive(Debug)]
pub struct CachedMemory<M> {
    inner: M,
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    block_words: usize,
    policy: LruPolicy,
    stats: CacheStats,
}

impl<M: DataMemory> CachedMemory<M> {
    /// Wraps `inner` with a cache of the given geometry.
    ///
    /// Zero-sized parameters are treated as one, and `lines` is rounded down to
    /// a multiple of `ways`.
    pub fn new(inner: M, config: &CacheConfig) -> Self {
        let ways = config.ways.max(1);
        let block_words = config.block_words.max(1);
        let num_sets = (config.lines / ways).max(1);
        Self {
            inner,
            lines: vec![CacheLine::default(); num_sets * ways],
            num_sets,
            ways,
            block_words,
            policy: LruPolicy::new(num_sets, ways),
            stats: CacheStats::default(),
        }
    }

    /// Current hit and miss counters.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zeroes the counters. Resident blocks and LRU state are kept.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// The backing memory.
    pub const fn inner(&self) -> &M {
        &self.inner
    }

    const fn locate(&self, addr: usize) -> (usize, usize) {
        let block = addr / self.block_words;
        (block % self.num_sets, block / self.num_sets)
    }

    fn find(&self, set: usize, tag: usize) -> Option<usize> {
        let base = set * self.ways;
        (0..self.ways).find(|&way| {
            self.lines
                .get(base + way)
                .is_some_and(|line| line.valid && line.tag == tag)
        })
    }

    /// Looks up `addr`, updating counters and LRU state, and fills the block on
    /// a miss. Returns true on a hit.
    fn access(&mut self, addr: usize) -> bool {
        let (set, tag) = self.locate(addr);
        if let Some(way) = self.find(set, tag) {
            self.stats.hits += 1;
            self.policy.update(set, way);
            trace!(addr, set, way, "cache hit");
            return true;
        }

        self.stats.misses += 1;
        trace!(addr, set, "cache miss");
        let way = self.policy.victim(set);
        if let Some(line) = self.lines.get_mut(set * self.ways + way) {
            *line = CacheLine { tag, valid: true };
        }
        self.policy.update(set, way);
        false
    }

    /// True if the block holding `addr` is resident.
    pub fn contains(&self, addr: usize) -> bool {
        let (set, tag) = self.locate(addr);
        self.find(set, tag).is_some()
    }
}

impl<M: DataMemory> DataMemory for CachedMemory<M> {
    fn read(&mut self, addr: usize) -> Word {
        let _ = self.access(addr);
        self.inner.read(addr)
    }

    fn write(&mut self, addr: usize, val: Word) {
        let _ = self.access(addr);
        self.inner.write(addr, val);
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        Some(self.stats)
    }
}
