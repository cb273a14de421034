//! # Execution Limits
//!
//! The two budgets that stop runaway programs: a per-run step budget and a
//! per-edge jump budget. Both are checked only while running with
//! `execute`; single-stepping is not bounded by either.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource limits for a single `execute` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum number of lines interpreted in one run
    pub max_steps: u32,
    /// Maximum number of taken transfers along one (from, to) line pair in one run
    pub max_jumps: u32,
}

impl Limits {
    /// Default limits: 10,000 steps and 1,000 jumps per edge
    pub const DEFAULT: Self = Self {
        max_steps: 10_000,
        max_jumps: 1_000,
    };

    /// Create new limits with validation
    pub const fn new(max_steps: u32, max_jumps: u32) -> Result<Self, ConfigError> {
        if max_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if max_jumps == 0 {
            return Err(ConfigError::ZeroJumps);
        }

        Ok(Self {
            max_steps,
            max_jumps,
        })
    }

    /// Validate limits that were built field by field or deserialized
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.max_steps, self.max_jumps).map(|_| ())
    }

    pub fn with_max_steps(self, max_steps: u32) -> Result<Self, ConfigError> {
        Self::new(max_steps, self.max_jumps)
    }

    pub fn with_max_jumps(self, max_jumps: u32) -> Result<Self, ConfigError> {
        Self::new(self.max_steps, max_jumps)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Limits {{ max_steps: {}, max_jumps: {} }}",
            self.max_steps, self.max_jumps
        )
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The step budget must be at least 1
    ZeroSteps,
    /// The jump budget must be at least 1
    ZeroJumps,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSteps => {
                write!(f, "max_steps must be greater than 0")
            }
            ConfigError::ZeroJumps => {
                write!(f, "max_jumps must be greater than 0")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
