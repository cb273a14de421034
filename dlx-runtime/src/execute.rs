//! Instruction execution for the DLX machine
//!
//! The caller advances `state.pc` to the next line before dispatching; control
//! transfers overwrite it.

use crate::error::{Cell, Fault};
use crate::jumps::JumpCounter;
use crate::state::MachineState;
use dlx_spec::{is_direct_address, Address, AluOp, Instruction, Program, Register, Word};

/// What the engine does after an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue at `state.pc`
    Next,
    /// HALT reached
    Halt,
}

/// Jump accounting for run mode; step mode passes `None`
pub type JumpBudget<'a> = Option<(&'a mut JumpCounter, u32)>;

/// Execute single instruction located at `line`
pub fn execute(
    inst: &Instruction,
    line: usize,
    state: &mut MachineState,
    program: &Program,
    jumps: JumpBudget<'_>,
) -> Result<Flow, Fault> {
    match inst {
        // ========== Data transfer ==========
        Instruction::Load { rd, base, offset } => {
            let address = effective_address(state, *base, *offset)?;
            let value = state
                .memory
                .read(address)
                .ok_or(Fault::NoValue(Cell::Memory(address)))?;
            state.registers.write(*rd, value);
        }

        Instruction::Store { base, offset, rs } => {
            let address = effective_address(state, *base, *offset)?;
            let value = read_reg(state, *rs)?;
            state
                .memory
                .write(address, value)
                .map_err(|_| invalid_address(address as i64, *offset, *base))?;
        }

        // ========== ALU ==========
        Instruction::Reg { op, rd, rs1, rs2 } => {
            let a = read_reg(state, *rs1)?;
            let b = read_reg(state, *rs2)?;
            state.registers.write(*rd, alu(*op, a, b));
        }

        Instruction::Imm { op, rd, rs1, imm } => {
            let a = read_reg(state, *rs1)?;
            state.registers.write(*rd, alu(*op, a, *imm));
        }

        // ========== Control ==========
        Instruction::Branch { cond, rs, label } => {
            let target = resolve(program, label)?;
            let value = read_reg(state, *rs)?;
            if cond.holds(value) {
                transfer(state, line, target, false, jumps)?;
            }
        }

        Instruction::Jump { link, label } => {
            let target = resolve(program, label)?;
            transfer(state, line, target, *link, jumps)?;
        }

        Instruction::JumpRegister { link, rs } => {
            let value = read_reg(state, *rs)?;
            let target = usize::try_from(value)
                .ok()
                .filter(|&t| t <= program.len())
                .ok_or(Fault::JumpOutOfRange { target: value })?;
            transfer(state, line, target, *link, jumps)?;
        }

        Instruction::Halt => return Ok(Flow::Halt),
    }

    Ok(Flow::Next)
}

/// Evaluate an ALU operation on two words
pub fn alu(op: AluOp, a: Word, b: Word) -> Word {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mult => a.wrapping_mul(b),
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        // Shift amounts use the low 5 bits
        AluOp::Sll => a.wrapping_shl(b as u32),
        AluOp::Sra => a.wrapping_shr(b as u32),
        AluOp::Srl => (a as u32).wrapping_shr(b as u32) as Word,
        AluOp::Slt => Word::from(a < b),
        AluOp::Sle => Word::from(a <= b),
        AluOp::Seq => Word::from(a == b),
        AluOp::Sne => Word::from(a != b),
    }
}

#[inline]
fn read_reg(state: &MachineState, reg: Register) -> Result<Word, Fault> {
    state
        .registers
        .read(reg)
        .ok_or(Fault::NoValue(Cell::Register(reg)))
}

fn resolve(program: &Program, label: &str) -> Result<usize, Fault> {
    program
        .resolve(label)
        .ok_or_else(|| Fault::LabelNotFound(label.to_string()))
}

fn invalid_address(address: i64, offset: i32, base: Register) -> Fault {
    Fault::InvalidDirectAddress {
        address,
        operand: format!("{}({})", offset, base),
    }
}

/// `offset + value(base)`, which must be a direct address
fn effective_address(state: &MachineState, base: Register, offset: i32) -> Result<Address, Fault> {
    let base_value = read_reg(state, base)?;
    let address = i64::from(offset) + i64::from(base_value);
    Address::try_from(address)
        .ok()
        .filter(|&a| is_direct_address(a))
        .ok_or_else(|| invalid_address(address, offset, base))
}

/// Take a control transfer from `line` to `target`
fn transfer(
    state: &mut MachineState,
    line: usize,
    target: usize,
    link: bool,
    jumps: JumpBudget<'_>,
) -> Result<(), Fault> {
    if let Some((counter, limit)) = jumps {
        counter.record(line, target, limit)?;
    }
    if link {
        let ret = Word::try_from(line + 1).unwrap_or(Word::MAX);
        state.registers.write(Register::LINK, ret);
    }
    state.pc = target;
    Ok(())
}
