//! Program Validation Tests.
//!
//! A program is checked as a whole before the first cycle; every offending
//! instruction is reported with its index.

use pipesim_core::common::{IsaError, ValidationIssue};
use pipesim_core::isa::Instruction;
use pipesim_core::Program;
use pretty_assertions::assert_eq;

use crate::common::builder::inst;

const MEM: usize = 1024;

fn program(lines: &[&str]) -> Vec<Instruction> {
    lines.iter().map(|l| inst(l)).collect()
}

#[test]
fn accepts_valid_program() {
    let p = Program::new(program(&["ADD R1, R2, R3", "BEQ R1, R2, -1", "JUMP 3"]), MEM).unwrap();
    assert_eq!(p.len(), 3);
    assert_eq!(p.get(2), Some(Instruction::Jump { target: 3 }));
    assert_eq!(p.get(3), None);
}

#[test]
fn reports_every_invalid_index() {
    let err = Program::new(
        program(&[
            "ADD R1, R2, R3",
            "JUMP 9",
            "NOP",
            "STORE R1, [4096]",
            "BEQ R0, R0, -5",
        ]),
        MEM,
    )
    .unwrap_err();

    assert_eq!(err.indices(), vec![1, 3, 4]);
    assert_eq!(
        err.issues[0].issue,
        ValidationIssue::TargetOutOfRange { target: 9, len: 5 }
    );
    assert_eq!(
        err.issues[1].issue,
        ValidationIssue::AddressOutOfRange {
            addr: 4096,
            size: MEM
        }
    );
    assert_eq!(
        err.issues[2].issue,
        ValidationIssue::TargetOutOfRange { target: -1, len: 5 }
    );
}

#[test]
fn operand_width_is_checked() {
    let err = Program::new(
        vec![
            Instruction::Load {
                rd: 1,
                base: 2,
                offset: 40_000,
            },
            Instruction::Add {
                rd: 40,
                rs1: 0,
                rs2: 0,
            },
        ],
        MEM,
    )
    .unwrap_err();

    assert_eq!(err.indices(), vec![0, 1]);
    assert!(matches!(
        err.issues[0].issue,
        ValidationIssue::Isa(IsaError::InvalidOperand { .. })
    ));
}

#[test]
fn one_instruction_may_carry_several_issues() {
    let err = Program::new(
        vec![Instruction::Load {
            rd: 1,
            base: 0,
            offset: 40_000,
        }],
        MEM,
    )
    .unwrap_err();
    assert_eq!(err.indices(), vec![0, 0]);
}

#[test]
fn target_one_past_end_is_allowed() {
    assert!(Program::new(program(&["NOP", "JUMP 2"]), MEM).is_ok());
    assert!(Program::new(program(&["NOP", "JUMP 3"]), MEM).is_err());
}

#[test]
fn register_based_loads_are_not_statically_checked() {
    assert!(Program::new(program(&["LOAD R1, [R2+1000]"]), 16).is_ok());
    assert!(Program::new(program(&["LOAD R1, [1000]"]), 16).is_err());
}

#[test]
fn message_lists_each_issue() {
    let err = Program::new(program(&["JUMP 7", "NOP"]), MEM).unwrap_err();
    assert_eq!(
        err.to_string(),
        "program rejected with 1 invalid instruction(s):\n  [0] control-flow target 7 outside 0..=2"
    );
}

#[test]
fn word_image_round_trip() {
    let p = Program::new(program(&["ADD R1, R2, R3", "LOAD R4, [R1-2]", "NOP"]), MEM).unwrap();
    let words = p.to_words().unwrap();
    assert_eq!(words[0], 0x0043_0800);
    assert_eq!(Program::from_words(&words, MEM).unwrap(), p);
}

#[test]
fn undecodable_words_are_reported_by_index() {
    let err = Program::from_words(&[0x1C00_0000, 0xFC00_0000, 0x2000_0000], MEM).unwrap_err();
    assert_eq!(err.indices(), vec![1, 2]);
    assert!(matches!(
        err.issues[0].issue,
        ValidationIssue::Isa(IsaError::UnknownOpcode { opcode: 0x3F, .. })
    ));
}
