//! Register file
//!
//! Every register is either set or holds "no value". R0 always reads 0 and
//! ignores writes.

use dlx_spec::{Register, Word, NUM_REGISTERS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    values: [Option<Word>; NUM_REGISTERS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Create a register file with every register except R0 unset
    pub fn new() -> Self {
        Self {
            values: [None; NUM_REGISTERS],
        }
    }

    /// Read register (R0 always returns 0)
    #[inline]
    pub fn read(&self, reg: Register) -> Option<Word> {
        if reg.is_zero() {
            Some(0)
        } else {
            self.values[reg.index()]
        }
    }

    /// Write register (writes to R0 are ignored)
    #[inline]
    pub fn write(&mut self, reg: Register, value: Word) {
        if !reg.is_zero() {
            self.values[reg.index()] = Some(value);
        }
    }

    /// Clear a register back to "no value"
    pub fn unset(&mut self, reg: Register) {
        if !reg.is_zero() {
            self.values[reg.index()] = None;
        }
    }

    pub fn clear(&mut self) {
        self.values = [None; NUM_REGISTERS];
    }

    /// Set registers in index order, R0 included
    pub fn iter(&self) -> impl Iterator<Item = (Register, Word)> + '_ {
        Register::all().filter_map(move |reg| self.read(reg).map(|value| (reg, value)))
    }
}
