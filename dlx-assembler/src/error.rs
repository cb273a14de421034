//! Assembler errors

use dlx_spec::OperandKind;
use thiserror::Error;

/// Why a single source line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Label \"{0}\" does contain whitespace")]
    LabelContainsWhitespace(String),

    #[error("Empty label before ':'")]
    EmptyLabel,

    /// `first_line` is the 0-based index of the earlier definition
    #[error("You used \"{label}\" at line {} before", .first_line + 1)]
    DuplicateLabel { label: String, first_line: usize },

    #[error("Opcode \"{0}\" not found")]
    UnknownOpcode(String),

    #[error("{opcode} needs {expected} arguments, but got {found}")]
    ArgumentCount {
        opcode: String,
        expected: usize,
        found: usize,
    },

    /// A register or memory operand was expected; `position` is 1-based
    #[error("A {kind} address was expected as {} argument, but got \"{found}\"", ordinal(.position))]
    OperandExpected {
        kind: OperandKind,
        position: usize,
        found: String,
    },

    #[error("An immediate value was expected as {} argument, but got \"{found}\"", ordinal(.position))]
    ImmediateExpected { position: usize, found: String },

    #[error("A label was expected as {} argument, but got an empty argument", ordinal(.position))]
    LabelExpected { position: usize },

    #[error("Invalid register \"{0}\" (valid range: R0-R31)")]
    InvalidRegister(String),

    #[error("R0 is read-only")]
    ReadOnly,
}

/// A rejected program: the failing line (0-based) and the reason
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error in line {}: {error}", .line + 1)]
pub struct AssemblerError {
    pub line: usize,
    #[source]
    pub error: ParseError,
}

impl AssemblerError {
    pub fn new(line: usize, error: ParseError) -> Self {
        Self { line, error }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

fn ordinal(position: &usize) -> &'static str {
    match *position {
        1 => "first",
        2 => "second",
        3 => "third",
        _ => "an extra",
    }
}
