//! # DLX Runtime
//!
//! Bounded execution engine for assembled DLX programs.
//!
//! ## Features
//!
//! - **Sparse state**: registers and memory cells hold "no value" until written
//! - **Run mode**: stops at HALT, at breakpoints, or when a step or jump budget is exhausted
//! - **Step mode**: one line at a time, no budgets
//! - **Resumable faults**: a failing line keeps the program counter so the caller can fix
//!   state and continue
//!
//! ## Example
//!
//! ```rust
//! use dlx_runtime::{Machine, RunOutcome};
//!
//! let mut machine = Machine::new();
//! machine.load_program("ADDI R1, R0, #1000\nHALT").unwrap();
//!
//! assert!(matches!(machine.execute(), Ok(RunOutcome::Completed { .. })));
//! assert_eq!(machine.register("R1").unwrap(), Some(1000));
//! ```

pub mod error;
pub mod registers;
pub mod memory;
pub mod state;
pub mod jumps;
pub mod execute;
pub mod vm;

pub use error::{Cell, Fault, Result, RuntimeError};
pub use registers::RegisterFile;
pub use memory::Memory;
pub use state::MachineState;
pub use jumps::JumpCounter;
pub use execute::{alu, Flow};
pub use vm::{Machine, RunOutcome, StepOutcome};

/// Simple execution helper
///
/// Assembles `source`, runs it to completion with default limits and returns
/// the final machine.
pub fn run(source: &str) -> Result<Machine> {
    let mut machine = Machine::new();
    machine.load_program(source)?;
    loop {
        match machine.execute()? {
            RunOutcome::Completed { .. } => return Ok(machine),
            RunOutcome::PausedAtBreakpoint { .. } => continue,
        }
    }
}
