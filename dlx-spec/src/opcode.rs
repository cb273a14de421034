//! # DLX Opcode Table
//!
//! The closed set of mnemonics the interpreter understands, grouped by class.
//! Each opcode has a fixed arity and a fixed operand signature.
//!
//! ## Classes
//! - Load:  LW
//! - Store: SW
//! - Reg:   ADD, SUB, MULT, AND, OR, XOR, SLL, SRA, SRL, SLT, SLE, SEQ, SNE
//! - Imm:   ADDI, SUBI, ANDI, ORI, XORI, SLLI, SRAI, SRLI, SLTI, SLEI, SEQI, SNEI
//! - Jump:  BEQZ, BNEZ, J, JR, JAL, JALR
//! - Halt:  HALT

use crate::error::SpecError;
use crate::instruction::AluOp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opcode class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpcodeClass {
    Load,
    Store,
    Reg,
    Imm,
    Jump,
    Halt,
}

/// Syntactic class of a single operand position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandKind {
    /// `R<digits>`
    Register,
    /// `<signed-digits>(R<digits>)`
    Indirect,
    /// `#<signed-digits>`
    Immediate,
    /// Any label name, resolved at execution time
    Label,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperandKind::Register => "register",
            OperandKind::Indirect => "memory",
            OperandKind::Immediate => "immediate",
            OperandKind::Label => "label",
        };
        f.write_str(name)
    }
}

use self::OperandKind::{Immediate as IMM, Indirect as IND, Label as LBL, Register as REG};

const SIG_LOAD: &[OperandKind] = &[REG, IND];
const SIG_STORE: &[OperandKind] = &[IND, REG];
const SIG_REG: &[OperandKind] = &[REG, REG, REG];
const SIG_IMM: &[OperandKind] = &[REG, REG, IMM];
const SIG_BRANCH: &[OperandKind] = &[REG, LBL];
const SIG_LABEL: &[OperandKind] = &[LBL];
const SIG_JUMP_REG: &[OperandKind] = &[REG];
const SIG_NONE: &[OperandKind] = &[];

/// DLX opcode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Data transfer ==========
    /// LW: rd = mem[offset + rs]
    Lw,
    /// SW: mem[offset + rd] = rs
    Sw,

    // ========== Register-register ==========
    Add,
    Sub,
    Mult,
    And,
    Or,
    Xor,
    Sll,
    Sra,
    Srl,
    Slt,
    Sle,
    Seq,
    Sne,

    // ========== Register-immediate ==========
    Addi,
    Subi,
    Andi,
    Ori,
    Xori,
    Slli,
    Srai,
    Srli,
    Slti,
    Slei,
    Seqi,
    Snei,

    // ========== Control ==========
    /// BEQZ: if rs == 0 jump to label
    Beqz,
    /// BNEZ: if rs != 0 jump to label
    Bnez,
    /// J: jump to label
    J,
    /// JR: jump to the line held in rs
    Jr,
    /// JAL: R31 = next line; jump to label
    Jal,
    /// JALR: R31 = next line; jump to the line held in rs
    Jalr,
    /// HALT: stop execution
    Halt,
}

impl Opcode {
    /// Every opcode, in table order
    pub const ALL: [Opcode; 34] = [
        Opcode::Lw,
        Opcode::Sw,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mult,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Sll,
        Opcode::Sra,
        Opcode::Srl,
        Opcode::Slt,
        Opcode::Sle,
        Opcode::Seq,
        Opcode::Sne,
        Opcode::Addi,
        Opcode::Subi,
        Opcode::Andi,
        Opcode::Ori,
        Opcode::Xori,
        Opcode::Slli,
        Opcode::Srai,
        Opcode::Srli,
        Opcode::Slti,
        Opcode::Slei,
        Opcode::Seqi,
        Opcode::Snei,
        Opcode::Beqz,
        Opcode::Bnez,
        Opcode::J,
        Opcode::Jr,
        Opcode::Jal,
        Opcode::Jalr,
        Opcode::Halt,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Lw => "LW",
            Opcode::Sw => "SW",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mult => "MULT",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Sll => "SLL",
            Opcode::Sra => "SRA",
            Opcode::Srl => "SRL",
            Opcode::Slt => "SLT",
            Opcode::Sle => "SLE",
            Opcode::Seq => "SEQ",
            Opcode::Sne => "SNE",
            Opcode::Addi => "ADDI",
            Opcode::Subi => "SUBI",
            Opcode::Andi => "ANDI",
            Opcode::Ori => "ORI",
            Opcode::Xori => "XORI",
            Opcode::Slli => "SLLI",
            Opcode::Srai => "SRAI",
            Opcode::Srli => "SRLI",
            Opcode::Slti => "SLTI",
            Opcode::Slei => "SLEI",
            Opcode::Seqi => "SEQI",
            Opcode::Snei => "SNEI",
            Opcode::Beqz => "BEQZ",
            Opcode::Bnez => "BNEZ",
            Opcode::J => "J",
            Opcode::Jr => "JR",
            Opcode::Jal => "JAL",
            Opcode::Jalr => "JALR",
            Opcode::Halt => "HALT",
        }
    }

    /// Look up an opcode by its (case-sensitive) mnemonic
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.mnemonic() == mnemonic)
    }

    pub fn class(self) -> OpcodeClass {
        match self {
            Opcode::Lw => OpcodeClass::Load,
            Opcode::Sw => OpcodeClass::Store,
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mult
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Sll
            | Opcode::Sra
            | Opcode::Srl
            | Opcode::Slt
            | Opcode::Sle
            | Opcode::Seq
            | Opcode::Sne => OpcodeClass::Reg,
            Opcode::Addi
            | Opcode::Subi
            | Opcode::Andi
            | Opcode::Ori
            | Opcode::Xori
            | Opcode::Slli
            | Opcode::Srai
            | Opcode::Srli
            | Opcode::Slti
            | Opcode::Slei
            | Opcode::Seqi
            | Opcode::Snei => OpcodeClass::Imm,
            Opcode::Beqz
            | Opcode::Bnez
            | Opcode::J
            | Opcode::Jr
            | Opcode::Jal
            | Opcode::Jalr => OpcodeClass::Jump,
            Opcode::Halt => OpcodeClass::Halt,
        }
    }

    /// Operand signature, one entry per argument position
    pub fn operands(self) -> &'static [OperandKind] {
        match self {
            Opcode::Beqz | Opcode::Bnez => SIG_BRANCH,
            Opcode::J | Opcode::Jal => SIG_LABEL,
            Opcode::Jr | Opcode::Jalr => SIG_JUMP_REG,
            _ => match self.class() {
                OpcodeClass::Load => SIG_LOAD,
                OpcodeClass::Store => SIG_STORE,
                OpcodeClass::Reg => SIG_REG,
                OpcodeClass::Imm => SIG_IMM,
                OpcodeClass::Jump | OpcodeClass::Halt => SIG_NONE,
            },
        }
    }

    /// Number of arguments
    #[inline]
    pub fn arity(self) -> usize {
        self.operands().len()
    }

    /// Whether argument 0 names a destination register that may not be R0
    pub fn writes_first_operand(self) -> bool {
        matches!(
            self.class(),
            OpcodeClass::Load | OpcodeClass::Reg | OpcodeClass::Imm
        )
    }

    /// ALU operation for register and immediate forms
    pub fn alu_op(self) -> Option<AluOp> {
        let op = match self {
            Opcode::Add | Opcode::Addi => AluOp::Add,
            Opcode::Sub | Opcode::Subi => AluOp::Sub,
            Opcode::Mult => AluOp::Mult,
            Opcode::And | Opcode::Andi => AluOp::And,
            Opcode::Or | Opcode::Ori => AluOp::Or,
            Opcode::Xor | Opcode::Xori => AluOp::Xor,
            Opcode::Sll | Opcode::Slli => AluOp::Sll,
            Opcode::Sra | Opcode::Srai => AluOp::Sra,
            Opcode::Srl | Opcode::Srli => AluOp::Srl,
            Opcode::Slt | Opcode::Slti => AluOp::Slt,
            Opcode::Sle | Opcode::Slei => AluOp::Sle,
            Opcode::Seq | Opcode::Seqi => AluOp::Seq,
            Opcode::Sne | Opcode::Snei => AluOp::Sne,
            _ => return None,
        };
        Some(op)
    }
}

impl FromStr for Opcode {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::from_mnemonic(s).ok_or_else(|| SpecError::UnknownOpcode(s.to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
