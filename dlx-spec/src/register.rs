//! Register definitions for the DLX register file

use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of registers
pub const NUM_REGISTERS: usize = 32;

/// Register (R0-R31)
///
/// R0 is hardwired to zero. R31 receives the return address of `JAL`/`JALR`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Register(u8);

impl Register {
    pub const R0: Self = Self(0);
    pub const ZERO: Self = Self::R0;
    pub const LINK: Self = Self(31);

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_REGISTERS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// All registers in index order
    pub fn all() -> impl Iterator<Item = Register> {
        (0..NUM_REGISTERS as u8).map(Register)
    }
}

impl TryFrom<u8> for Register {
    type Error = SpecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Register::from_index(value as usize).ok_or(SpecError::InvalidRegister(value as u32))
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg.0
    }
}

/// Parses the textual form `R<digits>`.
impl FromStr for Register {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('R')
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| SpecError::MalformedRegister(s.to_string()))?;
        let index: u32 = digits
            .parse()
            .map_err(|_| SpecError::MalformedRegister(s.to_string()))?;
        Register::from_index(index as usize).ok_or(SpecError::InvalidRegister(index))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}
