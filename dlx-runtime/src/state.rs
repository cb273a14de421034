//! Machine state for the DLX interpreter

use crate::memory::Memory;
use crate::registers::RegisterFile;

/// Architectural state touched by instructions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineState {
    pub registers: RegisterFile,

    pub memory: Memory,

    /// Program counter: index of the next line to run
    pub pc: usize,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear registers and memory and rewind the program counter
    pub fn reset(&mut self) {
        self.registers.clear();
        self.memory.clear();
        self.pc = 0;
    }
}
