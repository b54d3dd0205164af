//! Pipeline control signals.
//!
//! Control signals are generated once in ID and travel with the instruction
//! through every later latch, so downstream stages never re-inspect the opcode
//! to decide whether to touch memory or the register file.

use crate::isa::instruction::Instruction;

/// ALU operation selected for the EX stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Addition; also used for effective-address computation.
    #[default]
    Add,

    /// Subtraction.
    Sub,

    /// Multiplication (low 64 bits).
    Mul,
}

/// Control signals generated by the ID stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Write the result to the register file in WB.
    pub reg_write: bool,
    /// Read data memory in MEM.
    pub mem_read: bool,
    /// Write data memory in MEM.
    pub mem_write: bool,
    /// Conditional branch resolved in EX.
    pub branch: bool,
    /// Unconditional jump resolved in EX.
    pub jump: bool,
    /// ALU operation for EX.
    pub alu: AluOp,
}

impl ControlSignals {
    /// Generates the control signals for an instruction.
    pub const fn for_instruction(inst: &Instruction) -> Self {
        let base = Self {
            reg_write: false,
            mem_read: false,
            mem_write: false,
            branch: false,
            jump: false,
            alu: AluOp::Add,
        };
        match inst {
            Instruction::Add { .. } => Self {
                reg_write: true,
                ..base
            },
            Instruction::Sub { .. } => Self {
                reg_write: true,
                alu: AluOp::Sub,
                ..base
            },
            Instruction::Mul { .. } => Self {
                reg_write: true,
                alu: AluOp::Mul,
                ..base
            },
            Instruction::Load { .. } => Self {
                reg_write: true,
                mem_read: true,
                ..base
            },
            Instruction::Store { .. } => Self {
                mem_write: true,
                ..base
            },
            Instruction::Beq { .. } => Self {
                branch: true,
                alu: AluOp::Sub,
                ..base
            },
            Instruction::Jump { .. } => Self { jump: true, ..base },
            Instruction::Nop => base,
        }
    }
}
