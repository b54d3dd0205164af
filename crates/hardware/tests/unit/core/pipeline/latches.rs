//! Latch Slot Tests.

use pipesim_core::common::EngineError;
use pipesim_core::core::pipeline::latches::{Latch, PipelineLatches};

use crate::common::builder::{if_id, mem_wb};

#[test]
fn put_fills_empty_and_bubble_slots() {
    let mut slot = Latch::Empty;
    slot.put(if_id(0, "NOP"), "IF/ID").unwrap();
    assert!(slot.is_occupied());

    let mut slot = Latch::Bubble;
    slot.put(if_id(0, "NOP"), "IF/ID").unwrap();
    assert_eq!(slot.entry().map(|e| e.pc), Some(0));
}

#[test]
fn second_put_overflows() {
    let mut slot = Latch::Empty;
    slot.put(if_id(0, "NOP"), "IF/ID").unwrap();
    let err = slot.put(if_id(1, "NOP"), "IF/ID").unwrap_err();
    assert_eq!(err, EngineError::Overflow { stage: "IF/ID" });
    assert_eq!(slot.entry().map(|e| e.pc), Some(0));
}

#[test]
fn bubble_never_displaces_an_entry() {
    let mut slot = Latch::Occupied(if_id(4, "NOP"));
    slot.bubble();
    assert!(slot.is_occupied());

    let mut empty: Latch<()> = Latch::Empty;
    empty.bubble();
    assert!(empty.is_bubble());
    assert!(empty.entry().is_none());
}

#[test]
fn drained_ignores_bubbles() {
    let mut latches = PipelineLatches {
        if_id: Latch::Bubble,
        id_ex: Latch::Bubble,
        ex_mem: Latch::Bubble,
        mem_wb: Latch::Bubble,
    };
    assert!(latches.is_drained());

    latches.mem_wb = Latch::Occupied(mem_wb("ADD R1, R2, R3", 5));
    assert!(!latches.is_drained());
}

#[test]
fn mem_wb_result_selects_load_data() {
    assert_eq!(mem_wb("LOAD R1, [4]", 77).result(), 77);
    assert_eq!(mem_wb("ADD R1, R2, R3", 12).result(), 12);
}
