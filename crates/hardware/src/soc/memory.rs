//! Flat word-addressed memory.

use serde::Serialize;

use super::traits::DataMemory;
use crate::common::constants::DEFAULT_MEMORY_WORDS;
use crate::common::reg::Word;

/// Zero-initialised vector of words.
///
/// Out-of-range reads return zero and out-of-range writes are dropped; the
/// pipeline checks bounds before calling in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlatMemory {
    words: Vec<Word>,
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_WORDS)
    }
}

impl FlatMemory {
    /// Creates a memory of `size` zeroed words.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
        }
    }
}

impl DataMemory for FlatMemory {
    fn read(&mut self, addr: usize) -> Word {
        self.words.get(addr).copied().unwrap_or(0)
    }

    fn write(&mut self, addr: usize, val: Word) {
        if let Some(slot) = self.words.get_mut(addr) {
            *slot = val;
        }
    }

    fn size(&self) -> usize {
        self.words.len()
    }
}
