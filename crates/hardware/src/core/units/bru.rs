//! Branch Resolution Unit.
//!
//! Branches are not predicted: fetch always continues sequentially and the
//! outcome of `BEQ`/`JUMP` is known only once the instruction reaches EX.

use crate::common::reg::Word;
use crate::isa::instruction::Instruction;

/// Evaluates control-flow instructions in the EX stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bru;

impl Bru {
    /// Returns the redirect target if `inst` at index `pc` is taken.
    ///
    /// `a` and `b` are the (possibly forwarded) operand values. A target that
    /// would be negative yields `None`; validated programs never contain one.
    pub fn resolve(inst: &Instruction, pc: usize, a: Word, b: Word) -> Option<usize> {
        let taken = match inst {
            Instruction::Beq { .. } => a == b,
            Instruction::Jump { .. } => true,
            _ => false,
        };
        if !taken {
            return None;
        }
        inst.branch_target(pc)
            .and_then(|target| usize::try_from(target).ok())
    }
}
