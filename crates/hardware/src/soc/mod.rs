//! Data memory collaborators.
//!
//! The MEM stage talks to data memory only through the [`DataMemory`] trait.
//! This module provides:
//! 1. **Flat Memory:** A word-addressed backing store.
//! 2. **Cache:** An optional write-through cache decorator that counts hits and misses.

/// Set-associative cache decorator and replacement policy.
pub mod cache;

/// Word-addressed flat memory.
pub mod memory;

/// Data memory interface used by the MEM stage.
pub mod traits;

pub use cache::{CacheStats, CachedMemory};
pub use memory::FlatMemory;
pub use traits::DataMemory;
