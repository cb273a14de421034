//! # Error Types for the DLX instruction set

use crate::config::ConfigError;
use crate::opcode::Opcode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    // Operand errors
    #[error("Invalid register index: {0} (valid range: 0-31)")]
    InvalidRegister(u32),

    #[error("Register address expected, got \"{0}\"")]
    MalformedRegister(String),

    #[error("Memory address {0} is not a multiple of 4")]
    MisalignedAddress(i32),

    #[error("Opcode \"{0}\" not found")]
    UnknownOpcode(String),

    /// An immediate instruction built around an ALU op that has no `I` form
    #[error("\"{0}\" has no immediate form")]
    NoImmediateForm(Opcode),
}
