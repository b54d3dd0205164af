//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline constants for memory size, cycle budget and cache geometry.
//! 2. **Structures:** Sectioned config for general, memory and cache settings.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every section and field is optional in JSON; missing values take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::LoaderError;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants::{DEFAULT_MAX_CYCLES, DEFAULT_MEMORY_WORDS};

    /// Data memory size in words.
    pub const MEMORY_WORDS: usize = DEFAULT_MEMORY_WORDS;

    /// Cycle budget before a run is abandoned.
    ///
    /// Bounds programs that never drain, such as a `JUMP` to itself.
    pub const MAX_CYCLES: u64 = DEFAULT_MAX_CYCLES;

    /// Number of cache lines.
    pub const CACHE_LINES: usize = 16;

    /// Default cache associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;

    /// Words per cache block.
    pub const CACHE_BLOCK_WORDS: usize = 4;
}

/// Root configuration structure for the simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Optional data cache in front of memory
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not valid JSON or a field
    /// has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Io`] if the file cannot be read and
    /// [`LoaderError::Json`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| LoaderError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Record a per-cycle pipeline trace in the run report
    #[serde(default)]
    pub trace_pipeline: bool,

    /// Cycle budget; exceeding it aborts the run
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_pipeline: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Number of addressable words
    #[serde(default = "MemoryConfig::default_size_words")]
    pub size_words: usize,
}

impl MemoryConfig {
    /// Returns the default memory size in words.
    const fn default_size_words() -> usize {
        defaults::MEMORY_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_words: defaults::MEMORY_WORDS,
        }
    }
}

/// Data cache configuration.
///
/// The cache is write-through and write-allocate with LRU replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the cache
    #[serde(default)]
    pub enabled: bool,

    /// Total number of lines
    #[serde(default = "CacheConfig::default_lines")]
    pub lines: usize,

    /// Associativity (number of ways); 1 is direct-mapped
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Words per block
    #[serde(default = "CacheConfig::default_block_words")]
    pub block_words: usize,
}

impl CacheConfig {
    /// Returns the default number of cache lines.
    const fn default_lines() -> usize {
        defaults::CACHE_LINES
    }

    /// Returns the default cache associativity (number of ways).
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default block size in words.
    const fn default_block_words() -> usize {
        defaults::CACHE_BLOCK_WORDS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            lines: defaults::CACHE_LINES,
            ways: defaults::CACHE_WAYS,
            block_words: defaults::CACHE_BLOCK_WORDS,
        }
    }
}
