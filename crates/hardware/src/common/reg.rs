//! Architectural register file.
//!
//! This module provides the `RegisterFile` owned exclusively by the pipeline engine.
//! It provides:
//! 1. **Storage:** `NUM_REGS` signed registers.
//! 2. **Invariant Enforcement:** Register `R0` is hardwired to zero.
//! 3. **Observability:** A textual dump of the final register state.

use std::fmt;

use serde::Serialize;

use super::constants::{NUM_REGS, REG_ZERO};

/// Value held by a register or a memory word.
pub type Word = i64;

/// Integer register file.
///
/// Out-of-range indices read as zero and ignore writes; programs are validated
/// before they run so the pipeline never produces such an index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterFile {
    regs: [Word; NUM_REGS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with every register set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register. `R0` always returns 0.
    pub fn read(&self, idx: usize) -> Word {
        if idx == REG_ZERO {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a register. Writes to `R0` are discarded.
    pub fn write(&mut self, idx: usize, val: Word) {
        if idx == REG_ZERO {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns all register values in index order.
    pub const fn as_slice(&self) -> &[Word] {
        &self.regs
    }
}

impl fmt::Display for RegisterFile {
    /// Formats the registers four per row, e.g. `R0 =0  R1 =30 ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.regs.chunks(4).enumerate() {
            for (col, val) in chunk.iter().enumerate() {
                let idx = row * 4 + col;
                write!(f, "R{idx:<2}={val:<12}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
