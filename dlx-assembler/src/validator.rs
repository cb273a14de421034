//! Instruction validator
//!
//! Checks arity and the operand class of every argument position against the
//! opcode table, then builds the typed [`Instruction`].

use crate::error::{ParseError, Result};
use crate::lexer::{classify, Token};
use dlx_spec::{BranchCond, Instruction, Opcode, OpcodeClass, OperandKind, Register};

/// A classified argument
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Register(Register),
    Indirect { offset: i32, base: Register },
    Immediate(i32),
    Label(String),
}

/// Validate `args` against the signature of `opcode`
pub fn validate<S: AsRef<str>>(opcode: &str, args: &[S]) -> Result<Instruction> {
    let op = Opcode::from_mnemonic(opcode)
        .ok_or_else(|| ParseError::UnknownOpcode(opcode.to_string()))?;

    let signature = op.operands();
    if args.len() != signature.len() {
        return Err(ParseError::ArgumentCount {
            opcode: opcode.to_string(),
            expected: signature.len(),
            found: args.len(),
        });
    }

    let operands = signature
        .iter()
        .zip(args)
        .enumerate()
        .map(|(i, (&kind, arg))| operand(kind, i + 1, arg.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    if op.writes_first_operand() {
        if let Some(Operand::Register(rd)) = operands.first() {
            if rd.is_zero() {
                return Err(ParseError::ReadOnly);
            }
        }
    }

    build(op, operands)
}

fn register(index: u32, text: &str) -> Result<Register> {
    usize::try_from(index)
        .ok()
        .and_then(Register::from_index)
        .ok_or_else(|| ParseError::InvalidRegister(text.to_string()))
}

fn operand(kind: OperandKind, position: usize, text: &str) -> Result<Operand> {
    let token = classify(text);
    match (kind, token) {
        (OperandKind::Register, Some(Token::Register(n))) => {
            Ok(Operand::Register(register(n, text)?))
        }
        (OperandKind::Indirect, Some(Token::Indirect((offset, base)))) => Ok(Operand::Indirect {
            offset,
            base: register(base, text)?,
        }),
        (OperandKind::Immediate, Some(Token::Immediate(imm))) => Ok(Operand::Immediate(imm)),
        (OperandKind::Immediate, _) => Err(ParseError::ImmediateExpected {
            position,
            found: text.to_string(),
        }),
        (OperandKind::Label, _) if text.is_empty() => Err(ParseError::LabelExpected { position }),
        (OperandKind::Label, _) => Ok(Operand::Label(text.to_string())),
        (kind, _) => Err(ParseError::OperandExpected {
            kind,
            position,
            found: text.to_string(),
        }),
    }
}

fn build(op: Opcode, operands: Vec<Operand>) -> Result<Instruction> {
    use Operand as O;

    // Operand shapes already match the signature here
    let inst = match (op.class(), op.alu_op(), operands.as_slice()) {
        (OpcodeClass::Load, _, [O::Register(rd), O::Indirect { offset, base }]) => Instruction::Load {
            rd: *rd,
            base: *base,
            offset: *offset,
        },
        (OpcodeClass::Store, _, [O::Indirect { offset, base }, O::Register(rs)]) => Instruction::Store {
            base: *base,
            offset: *offset,
            rs: *rs,
        },
        (OpcodeClass::Reg, Some(alu), [O::Register(rd), O::Register(rs1), O::Register(rs2)]) => {
            Instruction::Reg {
                op: alu,
                rd: *rd,
                rs1: *rs1,
                rs2: *rs2,
            }
        }
        (OpcodeClass::Imm, Some(alu), [O::Register(rd), O::Register(rs1), O::Immediate(imm)]) => {
            Instruction::Imm {
                op: alu,
                rd: *rd,
                rs1: *rs1,
                imm: *imm,
            }
        }
        (OpcodeClass::Jump, _, [O::Register(rs), O::Label(label)]) => Instruction::Branch {
            cond: if op == Opcode::Beqz {
                BranchCond::Zero
            } else {
                BranchCond::NotZero
            },
            rs: *rs,
            label: label.clone(),
        },
        (OpcodeClass::Jump, _, [O::Label(label)]) => Instruction::Jump {
            link: op == Opcode::Jal,
            label: label.clone(),
        },
        (OpcodeClass::Jump, _, [O::Register(rs)]) => Instruction::JumpRegister {
            link: op == Opcode::Jalr,
            rs: *rs,
        },
        (OpcodeClass::Halt, _, []) => Instruction::Halt,
        _ => return Err(ParseError::UnknownOpcode(op.mnemonic().to_string())),
    };
    Ok(inst)
}
