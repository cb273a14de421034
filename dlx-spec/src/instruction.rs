//! DLX Instruction Set
//!
//! Typed instructions, one variant per opcode class. Operands are resolved to
//! registers and integers when a line is validated; label references stay
//! symbolic and are resolved against the program's label map at execution
//! time.

use crate::error::SpecError;
use crate::opcode::Opcode;
use crate::register::Register;
use serde::{Deserialize, Serialize};

/// ALU operation shared by the register and immediate forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    Add,
    Sub,
    Mult,
    And,
    Or,
    Xor,
    /// Shift left logical
    Sll,
    /// Shift right arithmetic
    Sra,
    /// Shift right logical
    Srl,
    /// Set less than (signed)
    Slt,
    /// Set less than or equal (signed)
    Sle,
    Seq,
    Sne,
}

impl AluOp {
    /// Opcode of the register-register form
    pub fn reg_opcode(self) -> Opcode {
        match self {
            AluOp::Add => Opcode::Add,
            AluOp::Sub => Opcode::Sub,
            AluOp::Mult => Opcode::Mult,
            AluOp::And => Opcode::And,
            AluOp::Or => Opcode::Or,
            AluOp::Xor => Opcode::Xor,
            AluOp::Sll => Opcode::Sll,
            AluOp::Sra => Opcode::Sra,
            AluOp::Srl => Opcode::Srl,
            AluOp::Slt => Opcode::Slt,
            AluOp::Sle => Opcode::Sle,
            AluOp::Seq => Opcode::Seq,
            AluOp::Sne => Opcode::Sne,
        }
    }

    /// Opcode of the register-immediate form, if the ISA has one
    pub fn imm_opcode(self) -> Option<Opcode> {
        let op = match self {
            AluOp::Add => Opcode::Addi,
            AluOp::Sub => Opcode::Subi,
            AluOp::Mult => return None,
            AluOp::And => Opcode::Andi,
            AluOp::Or => Opcode::Ori,
            AluOp::Xor => Opcode::Xori,
            AluOp::Sll => Opcode::Slli,
            AluOp::Sra => Opcode::Srai,
            AluOp::Srl => Opcode::Srli,
            AluOp::Slt => Opcode::Slti,
            AluOp::Sle => Opcode::Slei,
            AluOp::Seq => Opcode::Seqi,
            AluOp::Sne => Opcode::Snei,
        };
        Some(op)
    }
}

/// Condition tested by a conditional branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchCond {
    /// BEQZ
    Zero,
    /// BNEZ
    NotZero,
}

impl BranchCond {
    #[inline]
    pub fn holds(self, value: i32) -> bool {
        match self {
            BranchCond::Zero => value == 0,
            BranchCond::NotZero => value != 0,
        }
    }
}

/// DLX Instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// LW: rd = mem[offset + base]
    Load { rd: Register, base: Register, offset: i32 },

    /// SW: mem[offset + base] = rs
    Store { base: Register, offset: i32, rs: Register },

    /// Register-register ALU: rd = rs1 op rs2
    Reg { op: AluOp, rd: Register, rs1: Register, rs2: Register },

    /// Register-immediate ALU: rd = rs1 op imm
    Imm { op: AluOp, rd: Register, rs1: Register, imm: i32 },

    /// BEQZ / BNEZ: if cond(rs) jump to label
    Branch { cond: BranchCond, rs: Register, label: String },

    /// J / JAL
    Jump { link: bool, label: String },

    /// JR / JALR: jump to the line index held in rs
    JumpRegister { link: bool, rs: Register },

    /// HALT
    Halt,
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Load { .. } => Opcode::Lw,
            Instruction::Store { .. } => Opcode::Sw,
            Instruction::Reg { op, .. } => op.reg_opcode(),
            // MULT has no immediate form; the register mnemonic is the closest name
            Instruction::Imm { op, .. } => op.imm_opcode().unwrap_or_else(|| op.reg_opcode()),
            Instruction::Branch { cond: BranchCond::Zero, .. } => Opcode::Beqz,
            Instruction::Branch { cond: BranchCond::NotZero, .. } => Opcode::Bnez,
            Instruction::Jump { link: false, .. } => Opcode::J,
            Instruction::Jump { link: true, .. } => Opcode::Jal,
            Instruction::JumpRegister { link: false, .. } => Opcode::Jr,
            Instruction::JumpRegister { link: true, .. } => Opcode::Jalr,
            Instruction::Halt => Opcode::Halt,
        }
    }

    /// Reject shapes the assembler never produces, such as `MULT` with an
    /// immediate operand
    pub fn validate(&self) -> Result<(), SpecError> {
        match self {
            Instruction::Imm { op, .. } if op.imm_opcode().is_none() => {
                Err(SpecError::NoImmediateForm(op.reg_opcode()))
            }
            _ => Ok(()),
        }
    }

    #[inline]
    pub fn mnemonic(&self) -> &'static str {
        self.opcode().mnemonic()
    }

    /// Check if this instruction may transfer control
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Instruction::Branch { .. } | Instruction::Jump { .. } | Instruction::JumpRegister { .. }
        )
    }

    /// Label referenced by this instruction, if any
    pub fn label(&self) -> Option<&str> {
        match self {
            Instruction::Branch { label, .. } | Instruction::Jump { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Get destination register if present
    pub fn rd(&self) -> Option<Register> {
        match self {
            Instruction::Load { rd, .. }
            | Instruction::Reg { rd, .. }
            | Instruction::Imm { rd, .. } => Some(*rd),
            Instruction::Jump { link: true, .. } | Instruction::JumpRegister { link: true, .. } => {
                Some(Register::LINK)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = self.mnemonic();
        match self {
            Instruction::Load { rd, base, offset } => write!(f, "{} {}, {}({})", m, rd, offset, base),
            Instruction::Store { base, offset, rs } => write!(f, "{} {}({}), {}", m, offset, base, rs),
            Instruction::Reg { rd, rs1, rs2, .. } => write!(f, "{} {}, {}, {}", m, rd, rs1, rs2),
            Instruction::Imm { rd, rs1, imm, .. } => write!(f, "{} {}, {}, #{}", m, rd, rs1, imm),
            Instruction::Branch { rs, label, .. } => write!(f, "{} {}, {}", m, rs, label),
            Instruction::Jump { label, .. } => write!(f, "{} {}", m, label),
            Instruction::JumpRegister { rs, .. } => write!(f, "{} {}", m, rs),
            Instruction::Halt => f.write_str(m),
        }
    }
}
