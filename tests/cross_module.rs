//! Cross-module interaction tests
//!
//! Tests the integration between the instruction set, assembler and runtime.

use dlx_assembler::{assemble, validate};
use dlx_runtime::{alu, Machine, RunOutcome};
use dlx_spec::{Instruction, Opcode, OpcodeClass, Program, SourceLine};

// ============================================================================
// Assembler -> Runtime Tests
// ============================================================================

#[test]
fn test_assembled_program_runs() {
    let program = assemble("ADDI R1, R0, #42\nHALT").unwrap();
    let mut m = Machine::new();
    m.load(program).unwrap();
    assert!(matches!(m.execute(), Ok(RunOutcome::Completed { steps: 2 })));
    assert_eq!(m.register("R1"), Ok(Some(42)));
}

#[test]
fn test_hand_built_program_runs() {
    let add = validate("ADDI", &["R1", "R0", "#9"]).unwrap();
    let program: Program = vec![SourceLine::new(add), SourceLine::new(Instruction::Halt)]
        .into_iter()
        .collect();
    let mut m = Machine::new();
    m.load(program).unwrap();
    m.execute().unwrap();
    assert_eq!(m.register("R1"), Ok(Some(9)));
}

#[test]
fn test_displayed_program_behaves_the_same() {
    let source = "\
        ADDI R1, R0, #6
Loop:   SUBI R1, R1, #2
        BNEZ R1, Loop
        SW   8(R0), R1
        HALT";
    let program = assemble(source).unwrap();
    let text = program.to_string();

    let mut a = Machine::new();
    a.load(program).unwrap();
    let mut b = Machine::new();
    b.load_program(&text).unwrap();

    assert_eq!(a.execute(), b.execute());
    assert_eq!(a.memory(8), b.memory(8));
}

// ============================================================================
// Every ALU opcode end to end
// ============================================================================

#[test]
fn test_every_alu_opcode_matches_alu() {
    let (x, y) = (-23, 5);
    for op in Opcode::ALL {
        let third = match op.class() {
            OpcodeClass::Reg => "R2",
            OpcodeClass::Imm => "#5",
            _ => continue,
        };
        let source = format!("{} R3, R1, {}\nHALT", op, third);
        let mut m = Machine::new();
        m.load_program(&source).unwrap();
        m.set_register("R1", x).unwrap();
        m.set_register("R2", y).unwrap();
        m.execute().unwrap();

        let expected = alu(op.alu_op().unwrap(), x, y);
        assert_eq!(m.register("R3"), Ok(Some(expected)), "{}", op);
    }
}
