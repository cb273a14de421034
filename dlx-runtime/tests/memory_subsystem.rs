//! Integration tests for the memory subsystem
//!
//! Tests direct and indirect addressing through LW/SW and the host accessors.

use dlx_runtime::{Cell, Fault, Machine, RunOutcome, RuntimeError};
use dlx_spec::SpecError;
use proptest::prelude::*;

fn machine(source: &str) -> Machine {
    let mut m = Machine::new();
    m.load_program(source).unwrap();
    m
}

#[test]
fn test_store_then_load() {
    let mut m = machine("SW 1000(R0), R1\nLW R2, 1000(R0)\nHALT");
    m.set_register("R1", 42).unwrap();
    assert!(matches!(m.execute(), Ok(RunOutcome::Completed { .. })));
    assert_eq!(m.register("R2"), Ok(Some(42)));
    assert_eq!(m.memory(1000), Ok(Some(42)));
}

#[test]
fn test_indirect_with_negative_offset() {
    let mut m = machine("LW R2, -4(R1)\nHALT");
    m.set_register("R1", 1004).unwrap();
    m.set_memory(1000, 7).unwrap();
    assert!(m.execute().is_ok());
    assert_eq!(m.register("R2"), Ok(Some(7)));
}

#[test]
fn test_load_from_empty_cell() {
    let mut m = machine("LW R2, 2000(R0)\nHALT");
    let err = m.execute().unwrap_err();
    assert_eq!(
        err,
        RuntimeError::Fault {
            line: 0,
            fault: Fault::NoValue(Cell::Memory(2000)),
        }
    );
    assert_eq!(
        err.to_string(),
        "Error in line 1: Memory entry \"2000\" does not contain a number"
    );
}

#[test]
fn test_misaligned_effective_address() {
    let mut m = machine("SW 1(R1), R1\nHALT");
    m.set_register("R1", 1000).unwrap();
    let err = m.execute().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error in line 1: The memory address \"1001\" is not valid. It was calculated from \"1(R1)\""
    );
    assert!(m.memory_store().is_empty());
}

#[test]
fn test_unset_base_register() {
    let mut m = machine("LW R2, 0(R9)\nHALT");
    assert!(matches!(
        m.execute(),
        Err(RuntimeError::Fault { fault: Fault::NoValue(Cell::Register(_)), .. })
    ));
}

#[test]
fn test_array_sum() {
    let source = "\
        ADDI R1, R0, #1000   // cursor
        ADDI R2, R0, #0      // sum
        ADDI R3, R0, #4      // remaining
Loop:   LW   R4, 0(R1)
        ADD  R2, R2, R4
        ADDI R1, R1, #4
        SUBI R3, R3, #1
        BNEZ R3, Loop
        SW   2000(R0), R2
        HALT";
    let mut m = machine(source);
    for (i, v) in [3, 5, 7, 11].iter().enumerate() {
        m.set_memory(1000 + 4 * i as i32, *v).unwrap();
    }
    assert!(m.execute().is_ok());
    assert_eq!(m.memory_at("2000"), Ok(Some(26)));
}

#[test]
fn test_host_accessors_validate_addresses() {
    let mut m = Machine::new();
    assert_eq!(
        m.memory(6),
        Err(RuntimeError::Spec(SpecError::MisalignedAddress(6)))
    );
    assert_eq!(
        m.set_memory_at("12(R0)", 1),
        Err(RuntimeError::InvalidAddress("12(R0)".to_string()))
    );
    assert_eq!(
        m.memory_at("1002"),
        Err(RuntimeError::InvalidAddress("1002".to_string()))
    );
}

#[test]
fn test_snapshot_is_sorted() {
    let mut m = Machine::new();
    m.set_memory(16, 1).unwrap();
    m.set_memory(-16, 2).unwrap();
    m.set_memory(0, 3).unwrap();
    let addresses: Vec<i32> = m.memory_store().iter().map(|(a, _)| a).collect();
    assert_eq!(addresses, vec![-16, 0, 16]);
}

proptest! {
    #[test]
    fn prop_store_load_round_trip(word in (i32::MIN / 4)..=(i32::MAX / 4), value in any::<i32>()) {
        let address = word * 4;
        let mut m = machine("SW 0(R1), R2\nLW R3, 0(R1)\nHALT");
        m.set_register("R1", address).unwrap();
        m.set_register("R2", value).unwrap();

        prop_assert!(m.execute().is_ok());
        prop_assert_eq!(m.register("R3").unwrap(), Some(value));
        prop_assert_eq!(m.memory(address).unwrap(), Some(value));
    }

    #[test]
    fn prop_misaligned_never_stored(word in -1000i32..1000, off in 1i32..4, value in any::<i32>()) {
        let mut m = machine("SW 0(R1), R2\nHALT");
        m.set_register("R1", word * 4 + off).unwrap();
        m.set_register("R2", value).unwrap();

        let is_invalid_address = matches!(
            m.execute(),
            Err(RuntimeError::Fault { fault: Fault::InvalidDirectAddress { .. }, .. })
        );
        prop_assert!(is_invalid_address);
        prop_assert!(m.memory_store().is_empty());
    }
}
