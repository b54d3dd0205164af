//! Reference Program Tests.
//!
//! Small programs whose final state and cycle-by-cycle behaviour were worked
//! out by hand.

use pipesim_core::core::pipeline::hazards::HazardAction;
use pipesim_core::core::pipeline::trace::{StageState, stage};
use pipesim_core::isa::{Instruction, decode, encode};
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Independent instructions
// ══════════════════════════════════════════════════════════

#[test]
fn independent_add_sub() {
    let (_, report) = TestContext::asm(
        "
        ADD R1, R2, R3
        SUB R4, R5, R6
        ",
    )
    .reg(2, 10)
    .reg(3, 20)
    .reg(5, 30)
    .reg(6, 15)
    .run();

    assert_eq!(report.registers.read(1), 30);
    assert_eq!(report.registers.read(4), 15);
    assert_eq!(report.stats.instructions_completed, 2);
    assert_eq!(report.stats.cycles, 6);
    assert_eq!(report.stats.stalls_inserted, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Hazard chain: forwarding plus one load-use stall
// ══════════════════════════════════════════════════════════

const HAZARD_CHAIN: &str = "
    ADD  R1, R2, R3
    ADD  R4, R1, R5
    SUB  R6, R4, R7
    LOAD R8, [100]
    ADD  R9, R8, R10
";

fn hazard_chain() -> TestContext {
    TestContext::asm(HAZARD_CHAIN)
        .reg(2, 10)
        .reg(3, 20)
        .reg(5, 5)
        .reg(7, 8)
        .reg(10, 15)
        .mem(100, 25)
}

#[test]
fn hazard_chain_values() {
    let (_, report) = hazard_chain().run();

    assert_eq!(report.registers.read(1), 30);
    assert_eq!(report.registers.read(4), 35);
    assert_eq!(report.registers.read(6), 27);
    assert_eq!(report.registers.read(8), 25);
    // The loaded R8 must reach the dependent ADD, giving 25 + 15.
    assert_eq!(report.registers.read(9), 40);
}

#[test]
fn hazard_chain_counters() {
    let (_, report) = hazard_chain().run();
    let stats = &report.stats;

    assert_eq!(stats.instructions_completed, 5);
    assert_eq!(stats.stalls_inserted, 1);
    assert_eq!(stats.cycles, 10);
    assert_eq!(stats.forwards_ex_mem, 2);
    assert_eq!(stats.forwards_mem_wb, 1);
    assert_eq!(stats.branches_taken, 0);
    assert!((stats.cpi().unwrap() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn hazard_chain_stall_cycle() {
    let (_, report) = hazard_chain().run();

    let stall = &report.traces[5];
    assert_eq!(stall.action, HazardAction::Stall);
    assert!(matches!(stall.stage(stage::ID), StageState::Stalled { pc: 4, .. }));
    assert!(matches!(stall.stage(stage::EX), StageState::Active { pc: 3, .. }));

    assert_eq!(report.traces[6].stage(stage::EX), StageState::Bubble);
    assert!(matches!(
        report.traces[7].stage(stage::EX),
        StageState::Active { pc: 4, .. }
    ));
    assert_eq!(
        report
            .traces
            .iter()
            .filter(|t| t.action == HazardAction::Stall)
            .count(),
        1
    );
}

// ══════════════════════════════════════════════════════════
// 3. Encoding reference word
// ══════════════════════════════════════════════════════════

#[test]
fn add_reference_word() {
    let add = Instruction::Add { rd: 1, rs1: 2, rs2: 3 };
    assert_eq!(encode(&add).unwrap(), 0x0043_0800);
    assert_eq!(decode(0x0043_0800).unwrap(), add);
}

// ══════════════════════════════════════════════════════════
// 4. Determinism and edge programs
// ══════════════════════════════════════════════════════════

#[test]
fn replays_are_identical() {
    let (_, first) = hazard_chain().run();
    let (_, second) = hazard_chain().run();
    assert_eq!(first, second);
}

#[test]
fn empty_program_takes_no_cycles() {
    let (sim, report) = TestContext::new(Vec::new()).run();
    assert!(sim.is_done());
    assert_eq!(report.stats.cycles, 0);
    assert!(report.stats.cpi().is_err());
    assert!(report.traces.is_empty());
}

#[test]
fn nops_retire_without_side_effects() {
    let (_, report) = TestContext::asm("NOP\nNOP\nNOP").reg(1, 3).run();
    assert_eq!(report.stats.instructions_completed, 3);
    assert_eq!(report.stats.inst_nop, 3);
    assert_eq!(report.registers.read(1), 3);
    assert_eq!(report.stats.cycles, 7);
}

#[test]
fn arithmetic_wraps() {
    let (_, report) = TestContext::asm(
        "
        ADD R3, R1, R2
        MUL R4, R1, R1
        SUB R5, R0, R6
        ",
    )
    .reg(1, i64::MAX)
    .reg(2, 1)
    .reg(6, i64::MIN)
    .run();

    assert_eq!(report.registers.read(3), i64::MIN);
    assert_eq!(report.registers.read(4), 1);
    assert_eq!(report.registers.read(5), i64::MIN);
}

#[test]
fn base_plus_offset_load() {
    let (_, report) = TestContext::asm(
        "
        LOAD R1, [R2+4]
        LOAD R3, [R2-4]
        ",
    )
    .reg(2, 50)
    .mem(54, 11)
    .mem(46, 22)
    .run();

    assert_eq!(report.registers.read(1), 11);
    assert_eq!(report.registers.read(3), 22);
}

#[test]
fn stepping_matches_run() {
    let ctx = hazard_chain();
    let (_, report) = ctx.run();

    let mut sim = ctx.build();
    let mut traces = Vec::new();
    while !sim.is_done() {
        traces.push(sim.tick().unwrap());
    }
    assert_eq!(traces, report.traces);
    assert_eq!(sim.report(), report);
}
