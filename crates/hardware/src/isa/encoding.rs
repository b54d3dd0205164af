//! Instruction encoding and decoding.
//!
//! Every instruction packs into one 32-bit word with the opcode in bits 31-26:
//!
//! | Format | Fields                                                |
//! |--------|-------------------------------------------------------|
//! | R      | `rs1[25:21] rs2[20:16] rd[15:11]` (bits 10-0 ignored) |
//! | I      | `base[25:21] rd[20:16] imm16[15:0]`                   |
//! | S      | `rs[25:21] imm21[20:0]`                               |
//! | B      | `rs1[25:21] rs2[20:16] imm16[15:0]`                   |
//! | J      | `target26[25:0]`                                      |

use crate::common::constants::NUM_REGS;
use crate::common::error::IsaError;

use super::instruction::{Instruction, Reg};
use super::opcodes::Opcode;

/// Bit position of the opcode field.
pub const OPCODE_SHIFT: u32 = 26;
/// Bit mask for the opcode field (after shifting).
pub const OPCODE_MASK: u32 = 0x3F;
/// Bit position of the first register field.
pub const RS1_SHIFT: u32 = 21;
/// Bit position of the second register field.
pub const RS2_SHIFT: u32 = 16;
/// Bit position of the R-format destination field.
pub const RD_SHIFT: u32 = 11;
/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Width of a register field in bits.
pub const REG_BITS: u32 = 5;
/// Width of the load offset and branch displacement fields.
pub const IMM16_BITS: u32 = 16;
/// Width of the store address field.
pub const IMM21_BITS: u32 = 21;
/// Width of the jump target field.
pub const TARGET_BITS: u32 = 26;

/// Trait for extracting fields from encoded instruction words.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 31-26).
    fn opcode(&self) -> u32;

    /// Extracts the first register field (bits 25-21).
    fn rs1(&self) -> Reg;

    /// Extracts the second register field (bits 20-16).
    ///
    /// Holds `rd` for `LOAD`.
    fn rs2(&self) -> Reg;

    /// Extracts the R-format destination field (bits 15-11).
    fn rd(&self) -> Reg;

    /// Extracts and sign-extends the 16-bit immediate (bits 15-0).
    fn imm16(&self) -> i32;

    /// Extracts and sign-extends the 21-bit immediate (bits 20-0).
    fn imm21(&self) -> i32;

    /// Extracts the unsigned 26-bit jump target (bits 25-0).
    fn target26(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline]
    fn rs1(&self) -> Reg {
        ((self >> RS1_SHIFT) & REG_MASK) as Reg
    }

    #[inline]
    fn rs2(&self) -> Reg {
        ((self >> RS2_SHIFT) & REG_MASK) as Reg
    }

    #[inline]
    fn rd(&self) -> Reg {
        ((self >> RD_SHIFT) & REG_MASK) as Reg
    }

    #[inline]
    fn imm16(&self) -> i32 {
        i32::from(*self as u16 as i16)
    }

    #[inline]
    fn imm21(&self) -> i32 {
        ((*self << (32 - IMM21_BITS)) as i32) >> (32 - IMM21_BITS)
    }

    #[inline]
    fn target26(&self) -> u32 {
        self & ((1 << TARGET_BITS) - 1)
    }
}

fn reg_field(field: &'static str, reg: Reg) -> Result<u32, IsaError> {
    if usize::from(reg) < NUM_REGS {
        Ok(u32::from(reg))
    } else {
        Err(IsaError::InvalidOperand {
            field,
            value: i64::from(reg),
            bits: REG_BITS,
        })
    }
}

fn signed_field(field: &'static str, value: i32, bits: u32) -> Result<u32, IsaError> {
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    let wide = i64::from(value);
    if wide < min || wide > max {
        return Err(IsaError::InvalidOperand {
            field,
            value: wide,
            bits,
        });
    }
    Ok((value as u32) & ((1u32 << bits) - 1))
}

fn unsigned_field(field: &'static str, value: u32, bits: u32) -> Result<u32, IsaError> {
    if value >> bits == 0 {
        Ok(value)
    } else {
        Err(IsaError::InvalidOperand {
            field,
            value: i64::from(value),
            bits,
        })
    }
}

const fn op(opcode: Opcode) -> u32 {
    opcode.bits() << OPCODE_SHIFT
}

fn r_type(opcode: Opcode, rd: Reg, rs1: Reg, rs2: Reg) -> Result<u32, IsaError> {
    Ok(op(opcode)
        | reg_field("rs1", rs1)? << RS1_SHIFT
        | reg_field("rs2", rs2)? << RS2_SHIFT
        | reg_field("rd", rd)? << RD_SHIFT)
}

/// Packs an instruction into its 32-bit word.
///
/// # Errors
///
/// Returns [`IsaError::InvalidOperand`] if a register index is 32 or above, or
/// if an immediate does not fit its field.
pub fn encode(inst: &Instruction) -> Result<u32, IsaError> {
    match *inst {
        Instruction::Add { rd, rs1, rs2 } => r_type(Opcode::Add, rd, rs1, rs2),
        Instruction::Sub { rd, rs1, rs2 } => r_type(Opcode::Sub, rd, rs1, rs2),
        Instruction::Mul { rd, rs1, rs2 } => r_type(Opcode::Mul, rd, rs1, rs2),
        Instruction::Load { rd, base, offset } => Ok(op(Opcode::Load)
            | reg_field("base", base)? << RS1_SHIFT
            | reg_field("rd", rd)? << RS2_SHIFT
            | signed_field("offset", offset, IMM16_BITS)?),
        Instruction::Store { rs, addr } => Ok(op(Opcode::Store)
            | reg_field("rs", rs)? << RS1_SHIFT
            | signed_field("addr", addr, IMM21_BITS)?),
        Instruction::Beq { rs1, rs2, offset } => Ok(op(Opcode::Beq)
            | reg_field("rs1", rs1)? << RS1_SHIFT
            | reg_field("rs2", rs2)? << RS2_SHIFT
            | signed_field("offset", offset, IMM16_BITS)?),
        Instruction::Jump { target } => {
            Ok(op(Opcode::Jump) | unsigned_field("target", target, TARGET_BITS)?)
        }
        Instruction::Nop => Ok(op(Opcode::Nop)),
    }
}

/// Unpacks a 32-bit word into an instruction.
///
/// Bits not used by the word's format are ignored.
///
/// # Errors
///
/// Returns [`IsaError::UnknownOpcode`] if bits 31-26 name no operation.
pub fn decode(word: u32) -> Result<Instruction, IsaError> {
    let opcode = Opcode::from_bits(word.opcode()).ok_or(IsaError::UnknownOpcode {
        opcode: word.opcode(),
        word,
    })?;
    let (rs1, rs2, rd) = (word.rs1(), word.rs2(), word.rd());
    Ok(match opcode {
        Opcode::Add => Instruction::Add { rd, rs1, rs2 },
        Opcode::Sub => Instruction::Sub { rd, rs1, rs2 },
        Opcode::Mul => Instruction::Mul { rd, rs1, rs2 },
        Opcode::Load => Instruction::Load {
            rd: rs2,
            base: rs1,
            offset: word.imm16(),
        },
        Opcode::Store => Instruction::Store {
            rs: rs1,
            addr: word.imm21(),
        },
        Opcode::Beq => Instruction::Beq {
            rs1,
            rs2,
            offset: word.imm16(),
        },
        Opcode::Jump => Instruction::Jump {
            target: word.target26(),
        },
        Opcode::Nop => Instruction::Nop,
    })
}
