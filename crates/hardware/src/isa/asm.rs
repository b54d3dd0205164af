//! Text assembler.
//!
//! Accepts one instruction per line in the syntax produced by the disassembler.
//! Mnemonics and register prefixes are case-insensitive; `#` and `;` start a
//! comment; blank lines are skipped. Memory operands may be written bare
//! (`100`), bracketed (`[100]`) or as base plus offset (`[R2+4]`, `[R2-4]`).
//!
//! Field-width checks are left to program validation so that every offending
//! instruction is reported together.

use crate::common::constants::NUM_REGS;
use crate::common::error::AsmError;

use super::instruction::{Instruction, Reg};
use super::opcodes::Opcode;

/// Assembles a complete source text.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered, tagged with its 1-based line.
pub fn assemble(source: &str) -> Result<Vec<Instruction>, AsmError> {
    let mut program = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        if let Some(inst) = assemble_line(raw, idx + 1)? {
            program.push(inst);
        }
    }
    Ok(program)
}

/// Assembles a single line. Returns `None` for blank or comment-only lines.
///
/// # Errors
///
/// Returns an [`AsmError`] tagged with `line` if the text is malformed.
pub fn assemble_line(raw: &str, line: usize) -> Result<Option<Instruction>, AsmError> {
    let text = raw.split(['#', ';']).next().unwrap_or_default().trim();
    if text.is_empty() {
        return Ok(None);
    }

    let (mnemonic, rest) = text
        .split_once(char::is_whitespace)
        .map_or((text, ""), |(m, r)| (m, r.trim()));
    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
        line,
        mnemonic: mnemonic.to_string(),
    })?;

    let operands: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };
    let expect = |n: usize| {
        if operands.len() == n {
            Ok(())
        } else {
            Err(AsmError::OperandCount {
                line,
                expected: n,
                found: operands.len(),
            })
        }
    };

    let inst = match opcode {
        Opcode::Add | Opcode::Sub | Opcode::Mul => {
            expect(3)?;
            let rd = parse_reg(operands[0], line)?;
            let rs1 = parse_reg(operands[1], line)?;
            let rs2 = parse_reg(operands[2], line)?;
            match opcode {
                Opcode::Add => Instruction::Add { rd, rs1, rs2 },
                Opcode::Sub => Instruction::Sub { rd, rs1, rs2 },
                _ => Instruction::Mul { rd, rs1, rs2 },
            }
        }
        Opcode::Load => {
            expect(2)?;
            let rd = parse_reg(operands[0], line)?;
            let (base, offset) = parse_mem(operands[1], line)?;
            Instruction::Load { rd, base, offset }
        }
        Opcode::Store => {
            expect(2)?;
            let rs = parse_reg(operands[0], line)?;
            let (base, addr) = parse_mem(operands[1], line)?;
            if base != 0 {
                return Err(AsmError::InvalidImmediate {
                    line,
                    token: operands[1].to_string(),
                });
            }
            Instruction::Store { rs, addr }
        }
        Opcode::Beq => {
            expect(3)?;
            Instruction::Beq {
                rs1: parse_reg(operands[0], line)?,
                rs2: parse_reg(operands[1], line)?,
                offset: parse_imm(operands[2], line)?,
            }
        }
        Opcode::Jump => {
            expect(1)?;
            let target = parse_imm(operands[0], line)?;
            Instruction::Jump {
                target: u32::try_from(target).map_err(|_| AsmError::InvalidImmediate {
                    line,
                    token: operands[0].to_string(),
                })?,
            }
        }
        Opcode::Nop => {
            expect(0)?;
            Instruction::Nop
        }
    };
    Ok(Some(inst))
}

fn parse_reg(token: &str, line: usize) -> Result<Reg, AsmError> {
    let invalid = || AsmError::InvalidRegister {
        line,
        token: token.to_string(),
    };
    let digits = token
        .strip_prefix('R')
        .or_else(|| token.strip_prefix('r'))
        .ok_or_else(invalid)?;
    let idx: Reg = digits.parse().map_err(|_| invalid())?;
    if usize::from(idx) < NUM_REGS {
        Ok(idx)
    } else {
        Err(invalid())
    }
}

fn parse_imm(token: &str, line: usize) -> Result<i32, AsmError> {
    let invalid = || AsmError::InvalidImmediate {
        line,
        token: token.to_string(),
    };
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let (negative, body) = if let Some(body) = compact.strip_prefix('-') {
        (true, body)
    } else {
        (false, compact.strip_prefix('+').unwrap_or(&compact))
    };
    let magnitude = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16)
    } else {
        body.parse::<i64>()
    }
    .map_err(|_| invalid())?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| invalid())
}

/// Parses `addr`, `[addr]`, `[Rb]` or `[Rb+off]` / `[Rb-off]` into `(base, offset)`.
fn parse_mem(token: &str, line: usize) -> Result<(Reg, i32), AsmError> {
    let Some(inner) = token.strip_prefix('[') else {
        return Ok((0, parse_imm(token, line)?));
    };
    let inner = inner
        .strip_suffix(']')
        .ok_or_else(|| AsmError::InvalidImmediate {
            line,
            token: token.to_string(),
        })?
        .trim();

    if !inner.starts_with(['R', 'r']) {
        return Ok((0, parse_imm(inner, line)?));
    }
    match inner.find(['+', '-']) {
        Some(split) => {
            let base = parse_reg(inner[..split].trim(), line)?;
            let offset = parse_imm(&inner[split..], line)?;
            Ok((base, offset))
        }
        None => Ok((parse_reg(inner, line)?, 0)),
    }
}
