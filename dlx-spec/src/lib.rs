//! # DLX Instruction Set Specification
//!
//! Core types shared by the assembler and the runtime of a small didactic
//! DLX-style RISC machine.
//!
//! ## Key Features
//! - 32 general-purpose registers, R0 hardwired to zero, R31 as link register
//! - Signed 32-bit words
//! - Sparse word-addressed memory (addresses are multiples of 4)
//! - Line-addressed programs: the program counter is a source line index
//! - Per-run step and jump budgets against runaway loops

pub mod register;
pub mod opcode;
pub mod instruction;
pub mod error;
pub mod config;
pub mod program;

pub use register::{Register, NUM_REGISTERS};
pub use opcode::{Opcode, OpcodeClass, OperandKind};
pub use instruction::{AluOp, BranchCond, Instruction};
pub use error::SpecError;
pub use config::{ConfigError, Limits};
pub use program::{Program, SourceLine};

/// Word size in bytes; every direct address is a multiple of it
pub const WORD_SIZE: i32 = 4;

/// Data word
pub type Word = i32;

/// Memory address
pub type Address = i32;

/// Whether `address` is a direct (word-aligned) memory address
#[inline]
pub fn is_direct_address(address: Address) -> bool {
    address % WORD_SIZE == 0
}

/// Validate a direct memory address
pub fn check_direct_address(address: Address) -> Result<Address, SpecError> {
    if is_direct_address(address) {
        Ok(address)
    } else {
        Err(SpecError::MisalignedAddress(address))
    }
}
