//! Arithmetic Logic Unit (ALU).
//!
//! Integer arithmetic for the EX stage. All operations wrap on overflow so a
//! program can never abort the simulator through arithmetic.

use crate::common::reg::Word;
use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit for integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 10, 20), 30);
    /// assert_eq!(Alu::execute(AluOp::Sub, 30, 15), 15);
    /// assert_eq!(Alu::execute(AluOp::Mul, i64::MAX, 2), -2);
    /// ```
    pub const fn execute(op: AluOp, a: Word, b: Word) -> Word {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Mul => a.wrapping_mul(b),
        }
    }
}
