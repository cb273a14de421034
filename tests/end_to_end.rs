//! End-to-end integration tests for the DLX toolchain
//!
//! These tests verify the complete workflow:
//! 1. Load source text into a machine (assemble + validate)
//! 2. Run or single-step the program
//! 3. Inspect registers, memory and the program counter

use dlx_assembler::ParseError;
use dlx_runtime::{Fault, Machine, RunOutcome, RuntimeError};
use dlx_spec::Limits;
use proptest::prelude::*;

fn load(source: &str) -> Machine {
    let mut m = Machine::new();
    m.load_program(source).expect("Assembly failed");
    m
}

// ============================================================================
// Load -> Execute Tests
// ============================================================================

#[test]
fn test_simple_addition() {
    let mut m = load(
        "ADDI R1, R0, #10
         ADDI R2, R0, #20
         ADD  R3, R1, R2
         HALT",
    );
    m.execute().expect("Execution failed");
    assert_eq!(m.register("R3"), Ok(Some(30)));
}

#[test]
fn test_add_from_preset_registers() {
    let mut m = load("ADD R1, R2, R3\nHALT");
    m.set_register("R2", 2).unwrap();
    m.set_register("R3", 3).unwrap();
    m.execute().unwrap();
    assert_eq!(m.register("R1"), Ok(Some(5)));
}

#[test]
fn test_add_with_missing_operand_leaves_destination() {
    let mut m = load("ADD R1, R2, R3\nHALT");
    m.set_register("R3", 3).unwrap();
    let err = m.execute().unwrap_err();
    assert!(matches!(err, RuntimeError::Fault { line: 0, fault: Fault::NoValue(_) }));
    assert_eq!(m.register("R1"), Ok(None));
}

#[test]
fn test_addi_ignores_previous_destination() {
    let mut m = load("ADDI R1, R0, #1000\nHALT");
    m.set_register("R1", 12345).unwrap();
    m.execute().unwrap();
    assert_eq!(m.register("R1"), Ok(Some(1000)));
}

#[test]
fn test_factorial() {
    let source = "\
        // R1 = 5!, using R2 as the counter
        ADDI R1, R0, #1
        ADDI R2, R0, #5
Loop:   MULT R1, R1, R2
        SUBI R2, R2, #1
        BNEZ R2, Loop
        SW   1000(R0), R1
        HALT";
    let mut m = load(source);
    m.execute().unwrap();
    assert_eq!(m.memory(1000), Ok(Some(120)));
}

#[test]
fn test_jal_jr_returns_after_call() {
    let source = "\
        JAL  Target
        ADDI R2, R0, #7
        HALT
Target: ADDI R1, R0, #1
        JR   R31";
    let mut m = load(source);
    m.execute().unwrap();
    assert_eq!(m.register("R31"), Ok(Some(1)));
    assert_eq!(m.register("R1"), Ok(Some(1)));
    assert_eq!(m.register("R2"), Ok(Some(7)));
}

// ============================================================================
// Load Errors
// ============================================================================

#[test]
fn test_duplicate_label_reports_first_definition() {
    let mut m = Machine::new();
    let err = m.load_program("a: HALT\n\na: HALT").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(
        err.error,
        ParseError::DuplicateLabel { label: "a".to_string(), first_line: 0 }
    );
    assert!(m.program().is_none());
}

#[test]
fn test_writing_r0_is_rejected_everywhere() {
    let mut m = Machine::new();
    let err = m.load_program("ADD R0, R1, R2").unwrap_err();
    assert_eq!(err.error, ParseError::ReadOnly);
    assert_eq!(m.set_register("R0", 1), Err(RuntimeError::ReadOnly));
    assert_eq!(m.register("R0"), Ok(Some(0)));
}

// ============================================================================
// Loop Guards
// ============================================================================

#[test]
fn test_too_many_jumps_on_sixth_jump() {
    let mut m = load("Loop: J Loop");
    m.configure(Limits::new(10_000, 5).unwrap()).unwrap();
    let err = m.execute().unwrap_err();
    assert_eq!(
        err,
        RuntimeError::Fault { line: 0, fault: Fault::TooManyJumps { from: 0, to: 0 } }
    );
    assert!(err.to_string().starts_with("Error in line 1: The interpreter jumped from line 1 to line 1"));
}

#[test]
fn test_no_halt_exact_and_short_budget() {
    let n = 6;
    let source = "\n".repeat(n);

    let mut m = load(&source);
    m.configure(Limits::new(n as u32, 1).unwrap()).unwrap();
    assert_eq!(m.execute(), Err(RuntimeError::HaltNotFound));

    let mut m = load(&source);
    m.configure(Limits::new(n as u32 - 1, 1).unwrap()).unwrap();
    assert!(matches!(m.execute(), Err(RuntimeError::TooManySteps { .. })));
}

// ============================================================================
// Debugging Workflow
// ============================================================================

#[test]
fn test_breakpoint_then_step_then_resume() {
    let source = "\
        ADDI R1, R0, #1
      > ADDI R2, R0, #2
        ADDI R3, R0, #3
        HALT";
    let mut m = load(source);

    assert_eq!(m.execute(), Ok(RunOutcome::PausedAtBreakpoint { line: 1 }));
    m.step().unwrap();
    assert_eq!(m.register("R2"), Ok(Some(2)));
    assert_eq!(m.program_counter(), 2);

    assert!(matches!(m.execute(), Ok(RunOutcome::Completed { .. })));
    assert_eq!(m.register("R3"), Ok(Some(3)));
}

proptest! {
    #[test]
    fn prop_sw_lw_round_trip(word in (i32::MIN / 4)..=(i32::MAX / 4), value in any::<i32>()) {
        let address = word * 4;
        let mut m = load("SW 0(R1), R2\nLW R3, 0(R1)\nHALT");
        m.set_register("R1", address).unwrap();
        m.set_register("R2", value).unwrap();
        prop_assert!(m.execute().is_ok());
        prop_assert_eq!(m.register("R3").unwrap(), Some(value));
    }

    #[test]
    fn prop_direct_sw_lw_round_trip(word in 0i32..100_000, value in any::<i32>()) {
        let address = word * 4;
        let source = format!("SW {a}(R0), R1\nLW R2, {a}(R0)\nHALT", a = address);
        let mut m = load(&source);
        m.set_register("R1", value).unwrap();
        prop_assert!(m.execute().is_ok());
        prop_assert_eq!(m.register("R2").unwrap(), Some(value));
        prop_assert_eq!(m.memory(address).unwrap(), Some(value));
    }

    #[test]
    fn prop_addi_matches_wrapping_add(a in any::<i32>(), imm in any::<i32>()) {
        let mut m = load(&format!("ADDI R2, R1, #{}\nHALT", imm));
        m.set_register("R1", a).unwrap();
        prop_assert!(m.execute().is_ok());
        prop_assert_eq!(m.register("R2").unwrap(), Some(a.wrapping_add(imm)));
    }
}
