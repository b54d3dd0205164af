//! Data memory interface.
//!
//! Every access completes within the MEM stage's single cycle. Addresses are
//! word indices already checked against [`DataMemory::size`] by the caller.

use super::cache::CacheStats;
use crate::common::reg::Word;

/// Word-addressed data memory seen by the MEM stage.
pub trait DataMemory {
    /// Reads the word at `addr`.
    fn read(&mut self, addr: usize) -> Word;

    /// Writes `val` to the word at `addr`.
    fn write(&mut self, addr: usize, val: Word);

    /// Number of addressable words.
    fn size(&self) -> usize;

    /// Hit and miss counters if this memory is fronted by a cache.
    fn cache_stats(&self) -> Option<CacheStats> {
        None
    }
}

impl<M: DataMemory + ?Sized> DataMemory for Box<M> {
    fn read(&mut self, addr: usize) -> Word {
        (**self).read(addr)
    }

    fn write(&mut self, addr: usize, val: Word) {
        (**self).write(addr, val);
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        (**self).cache_stats()
    }
}
