//! Load-Use Hazard Detection Tests.
//!
//! Verifies that `need_stall_load_use` fires exactly when the instruction in
//! Decode reads the register a `LOAD` in Execute is about to fill, and that a
//! full run inserts one bubble per such pair.

use pipesim_core::core::pipeline::hazards::{
    HazardAction, PipelineView, decide, need_stall_load_use,
};
use pipesim_core::core::pipeline::latches::{Latch, PipelineLatches};
use pipesim_core::core::pipeline::trace::{StageState, stage};
use rstest::rstest;

use crate::common::builder::{IdExBuilder, if_id};
use crate::common::harness::TestContext;

fn latches(ex: &str, id: &str) -> PipelineLatches {
    PipelineLatches {
        if_id: Latch::Occupied(if_id(1, id)),
        id_ex: Latch::Occupied(IdExBuilder::new(ex).build()),
        ..PipelineLatches::default()
    }
}

// ══════════════════════════════════════════════════════════
// 1. Pure detection
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("LOAD R5, [100]", "ADD R1, R5, R2", true)]
#[case("LOAD R5, [100]", "ADD R1, R2, R5", true)]
#[case("LOAD R5, [100]", "SUB R1, R5, R5", true)]
#[case("LOAD R5, [100]", "LOAD R1, [R5+4]", true)]
#[case("LOAD R5, [100]", "STORE R5, [200]", true)]
#[case("LOAD R5, [100]", "BEQ R5, R0, +2", true)]
#[case("LOAD R5, [100]", "ADD R1, R2, R3", false)]
#[case("LOAD R5, [100]", "ADD R5, R2, R3", false)]
#[case("LOAD R5, [100]", "JUMP 0", false)]
#[case("LOAD R5, [100]", "NOP", false)]
#[case("ADD R5, R1, R2", "ADD R1, R5, R2", false)]
#[case("LOAD R0, [100]", "ADD R1, R0, R0", false)]
fn detects_load_use(#[case] ex: &str, #[case] id: &str, #[case] stall: bool) {
    let l = latches(ex, id);
    assert_eq!(
        need_stall_load_use(&l.id_ex, &l.if_id),
        stall,
        "EX: {ex} / ID: {id}"
    );
}

#[test]
fn no_stall_without_both_instructions() {
    let l = PipelineLatches {
        id_ex: Latch::Occupied(IdExBuilder::new("LOAD R5, [100]").build()),
        if_id: Latch::Bubble,
        ..PipelineLatches::default()
    };
    assert!(!need_stall_load_use(&l.id_ex, &l.if_id));

    let l = PipelineLatches {
        id_ex: Latch::Bubble,
        if_id: Latch::Occupied(if_id(1, "ADD R1, R5, R5")),
        ..PipelineLatches::default()
    };
    assert!(!need_stall_load_use(&l.id_ex, &l.if_id));
}

#[test]
fn decide_reports_stall() {
    let l = latches("LOAD R5, [100]", "ADD R1, R5, R2");
    assert_eq!(decide(&PipelineView::of(&l), None), HazardAction::Stall);
}

#[test]
fn flush_wins_over_stall() {
    let l = latches("LOAD R5, [100]", "ADD R1, R5, R2");
    assert_eq!(
        decide(&PipelineView::of(&l), Some(7)),
        HazardAction::Flush { target: 7 }
    );
}

// ══════════════════════════════════════════════════════════
// 2. Stall insertion in a running pipeline
// ══════════════════════════════════════════════════════════

#[test]
fn dependent_add_waits_one_cycle() {
    let (_, report) = TestContext::asm(
        "
        LOAD R1, [10]
        ADD  R2, R1, R1
        ",
    )
    .mem(10, 7)
    .run();

    assert_eq!(report.registers.read(2), 14);
    assert_eq!(report.stats.stalls_inserted, 1);
    assert_eq!(report.stats.forwards_mem_wb, 2);
    assert_eq!(report.stats.cycles, 7);
}

#[test]
fn independent_instruction_hides_the_load() {
    let (_, report) = TestContext::asm(
        "
        LOAD R1, [10]
        ADD  R3, R4, R4
        ADD  R2, R1, R3
        ",
    )
    .mem(10, 7)
    .reg(4, 1)
    .run();

    assert_eq!(report.registers.read(2), 9);
    assert_eq!(report.stats.stalls_inserted, 0);
    assert_eq!(report.stats.forwards_mem_wb, 1);
    assert_eq!(report.stats.forwards_ex_mem, 1);
}

#[test]
fn store_of_loaded_value_stalls() {
    let (mut sim, report) = TestContext::asm(
        "
        LOAD  R1, [10]
        STORE R1, [20]
        ",
    )
    .mem(10, 99)
    .run();

    assert_eq!(report.stats.stalls_inserted, 1);
    assert_eq!(sim.read_memory(20), Some(99));
}

#[test]
fn stall_holds_decode_and_fetch() {
    let (_, report) = TestContext::asm(
        "
        LOAD R1, [10]
        ADD  R2, R1, R1
        NOP
        ",
    )
    .run();

    // Cycle 3: LOAD in EX, ADD in ID, NOP in IF.
    let stalled = &report.traces[2];
    assert_eq!(stalled.action, HazardAction::Stall);
    assert!(matches!(
        stalled.stage(stage::ID),
        StageState::Stalled { pc: 1, .. }
    ));
    assert!(matches!(
        stalled.stage(stage::IF),
        StageState::Stalled { pc: 2, .. }
    ));

    let after = &report.traces[3];
    assert_eq!(after.stage(stage::EX), StageState::Bubble);
    assert!(matches!(
        after.stage(stage::ID),
        StageState::Active { pc: 1, .. }
    ));
    assert!(matches!(
        after.stage(stage::IF),
        StageState::Active { pc: 2, .. }
    ));
    assert_eq!(after.pc, 2);
}
