//! Runtime error types for the DLX machine

use dlx_assembler::AssemblerError;
use dlx_spec::{Address, Register, SpecError};
use std::fmt;
use thiserror::Error;

/// A storage cell that can hold "no value"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Register(Register),
    Memory(Address),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Register(reg) => write!(f, "Register entry \"{}\"", reg),
            Cell::Memory(address) => write!(f, "Memory entry \"{}\"", address),
        }
    }
}

/// Failure of a single instruction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("{0} does not contain a number")]
    NoValue(Cell),

    /// `address` is wide enough to hold an overflowing `offset + base`
    #[error("The memory address \"{address}\" is not valid. It was calculated from \"{operand}\"")]
    InvalidDirectAddress { address: i64, operand: String },

    #[error("Label \"{0}\" not found")]
    LabelNotFound(String),

    /// Lines are 0-based
    #[error(
        "The interpreter jumped from line {} to line {} too many times. You are probably in a loop. \
         If not, raise the maximum jumps in the options",
        .from + 1, .to + 1
    )]
    TooManyJumps { from: usize, to: usize },

    #[error("Jump target {target} is outside the program")]
    JumpOutOfRange { target: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An instruction failed; `line` is 0-based
    #[error("Error in line {}: {fault}", .line + 1)]
    Fault {
        line: usize,
        #[source]
        fault: Fault,
    },

    #[error("The interpreter ran out of lines because it has not reached a \"HALT\" opcode")]
    HaltNotFound,

    #[error(
        "The interpreter interpreted more than {limit} lines. You are probably in a loop. \
         If not, raise the maximum steps in the options"
    )]
    TooManySteps { limit: u32 },

    #[error("R0 is read-only")]
    ReadOnly,

    #[error("Register address expected, got \"{0}\"")]
    InvalidRegister(String),

    #[error("Memory address expected, got \"{0}\"")]
    InvalidAddress(String),

    #[error("Line {} is outside the program, which has only {len} lines", .line + 1)]
    LineOutOfRange { line: usize, len: usize },

    #[error("No program loaded")]
    NoProgram,

    /// A hand-built program holds an instruction with no source form
    #[error("Error in line {}: {error}", .line + 1)]
    InvalidInstruction {
        line: usize,
        #[source]
        error: SpecError,
    },

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Assembler(#[from] AssemblerError),
}

impl RuntimeError {
    /// Line the error is attached to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            RuntimeError::Fault { line, .. } | RuntimeError::InvalidInstruction { line, .. } => {
                Some(*line)
            }
            RuntimeError::Assembler(e) => Some(e.line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
