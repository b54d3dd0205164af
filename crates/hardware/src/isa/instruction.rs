//! Instruction model.
//!
//! Each operation carries only the operand fields it uses, so a `STORE` has no
//! destination and a `JUMP` has no registers at all. The pipeline queries
//! operands through [`Instruction::dest`] and [`Instruction::sources`] rather
//! than matching on variants itself.

use serde::{Deserialize, Serialize};

use super::opcodes::Opcode;

/// Register index (`R0`..`R31`).
pub type Reg = u8;

/// A single decoded instruction.
///
/// Serialized as an object tagged by `op`, e.g.
/// `{"op": "LOAD", "rd": 8, "offset": 100}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "UPPERCASE")]
pub enum Instruction {
    /// `rd = rs1 + rs2`
    Add {
        /// Destination register.
        rd: Reg,
        /// First source register.
        rs1: Reg,
        /// Second source register.
        rs2: Reg,
    },
    /// `rd = rs1 - rs2`
    Sub {
        /// Destination register.
        rd: Reg,
        /// First source register.
        rs1: Reg,
        /// Second source register.
        rs2: Reg,
    },
    /// `rd = rs1 * rs2`
    Mul {
        /// Destination register.
        rd: Reg,
        /// First source register.
        rs1: Reg,
        /// Second source register.
        rs2: Reg,
    },
    /// `rd = MEM[base + offset]`
    Load {
        /// Destination register.
        rd: Reg,
        /// Base address register; `R0` gives an absolute address.
        #[serde(default)]
        base: Reg,
        /// Signed offset added to the base.
        #[serde(alias = "addr")]
        offset: i32,
    },
    /// `MEM[addr] = rs`
    Store {
        /// Register holding the value to store.
        rs: Reg,
        /// Absolute word address.
        addr: i32,
    },
    /// `if rs1 == rs2 { pc = pc + offset }`
    Beq {
        /// First compared register.
        rs1: Reg,
        /// Second compared register.
        rs2: Reg,
        /// Signed displacement from the branch's own index.
        offset: i32,
    },
    /// `pc = target`
    Jump {
        /// Absolute instruction index.
        target: u32,
    },
    /// No operation.
    Nop,
}

impl Instruction {
    /// Operation kind.
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::Add { .. } => Opcode::Add,
            Self::Sub { .. } => Opcode::Sub,
            Self::Mul { .. } => Opcode::Mul,
            Self::Load { .. } => Opcode::Load,
            Self::Store { .. } => Opcode::Store,
            Self::Beq { .. } => Opcode::Beq,
            Self::Jump { .. } => Opcode::Jump,
            Self::Nop => Opcode::Nop,
        }
    }

    /// Register written in WB, if any.
    ///
    /// A write to `R0` is reported as `None` since it never changes state and
    /// must not be treated as a forwarding producer.
    pub const fn dest(&self) -> Option<Reg> {
        match *self {
            Self::Add { rd, .. }
            | Self::Sub { rd, .. }
            | Self::Mul { rd, .. }
            | Self::Load { rd, .. }
                if rd != 0 =>
            {
                Some(rd)
            }
            _ => None,
        }
    }

    /// Registers read in ID, as the `(a, b)` operand pair consumed by EX.
    pub const fn sources(&self) -> [Option<Reg>; 2] {
        match *self {
            Self::Add { rs1, rs2, .. }
            | Self::Sub { rs1, rs2, .. }
            | Self::Mul { rs1, rs2, .. }
            | Self::Beq { rs1, rs2, .. } => [Some(rs1), Some(rs2)],
            Self::Load { base, .. } => [Some(base), None],
            Self::Store { rs, .. } => [Some(rs), None],
            Self::Jump { .. } | Self::Nop => [None, None],
        }
    }

    /// True if the instruction reads `reg` as a source operand.
    pub fn reads(&self, reg: Reg) -> bool {
        self.sources().contains(&Some(reg))
    }

    /// True for `LOAD`.
    pub const fn is_load(&self) -> bool {
        matches!(self, Self::Load { .. })
    }

    /// True for `STORE`.
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store { .. })
    }

    /// True for instructions that may redirect the program counter.
    pub const fn is_control(&self) -> bool {
        matches!(self, Self::Beq { .. } | Self::Jump { .. })
    }

    /// True for register-register arithmetic.
    pub const fn is_alu(&self) -> bool {
        matches!(self, Self::Add { .. } | Self::Sub { .. } | Self::Mul { .. })
    }

    /// Absolute control-flow target when taken, given the instruction's index.
    pub const fn branch_target(&self, pc: usize) -> Option<i64> {
        match *self {
            Self::Beq { offset, .. } => Some(pc as i64 + offset as i64),
            Self::Jump { target } => Some(target as i64),
            _ => None,
        }
    }

    /// Data address known without reading a register.
    ///
    /// `STORE` always has one; `LOAD` only when its base is `R0`.
    pub const fn static_address(&self) -> Option<i64> {
        match *self {
            Self::Store { addr, .. } => Some(addr as i64),
            Self::Load {
                base: 0, offset, ..
            } => Some(offset as i64),
            _ => None,
        }
    }
}
