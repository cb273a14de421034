//! Jump counting
//!
//! Counts taken control transfers per (from, to) line pair during one run.
//! Valid lines are `0..=len` so that the line one past the end is a valid
//! target. Only edges actually taken are stored.

use crate::error::Fault;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct JumpCounter {
    /// Number of addressable lines, `len + 1`
    dim: usize,
    counts: HashMap<(usize, usize), u32>,
}

impl JumpCounter {
    /// Create an empty counter for a program of `len` lines
    pub fn new(len: usize) -> Self {
        Self {
            dim: len.saturating_add(1),
            counts: HashMap::new(),
        }
    }

    /// Count a jump from `from` to `to`, failing once the edge has been taken
    /// more than `limit` times
    pub fn record(&mut self, from: usize, to: usize, limit: u32) -> Result<(), Fault> {
        if from >= self.dim || to >= self.dim {
            return Err(Fault::JumpOutOfRange {
                target: i32::try_from(to).unwrap_or(i32::MAX),
            });
        }

        let count = self.counts.entry((from, to)).or_insert(0);
        *count = count.saturating_add(1);
        if *count > limit {
            return Err(Fault::TooManyJumps { from, to });
        }
        Ok(())
    }

    /// Times the edge was taken so far
    pub fn count(&self, from: usize, to: usize) -> u32 {
        self.counts.get(&(from, to)).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// Total number of jumps recorded
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Number of distinct edges taken
    pub fn edges(&self) -> usize {
        self.counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_inclusive() {
        let mut jumps = JumpCounter::new(2);
        for _ in 0..5 {
            jumps.record(1, 0, 5).unwrap();
        }
        assert_eq!(jumps.count(1, 0), 5);
        assert_eq!(
            jumps.record(1, 0, 5),
            Err(Fault::TooManyJumps { from: 1, to: 0 })
        );
    }

    #[test]
    fn test_edges_are_independent() {
        let mut jumps = JumpCounter::new(3);
        jumps.record(0, 1, 1).unwrap();
        jumps.record(1, 0, 1).unwrap();
        jumps.record(2, 0, 1).unwrap();
        assert_eq!(jumps.total(), 3);
        assert!(jumps.record(0, 1, 1).is_err());
    }

    #[test]
    fn test_one_past_end_is_valid_target() {
        let mut jumps = JumpCounter::new(3);
        assert!(jumps.record(0, 3, 10).is_ok());
        assert_eq!(
            jumps.record(0, 4, 10),
            Err(Fault::JumpOutOfRange { target: 4 })
        );
    }

    #[test]
    fn test_huge_program_stores_only_taken_edges() {
        let mut jumps = JumpCounter::new(1_000_000);
        assert_eq!(jumps.edges(), 0);
        jumps.record(999_999, 0, 2).unwrap();
        jumps.record(999_999, 0, 2).unwrap();
        jumps.record(5, 1_000_000, 2).unwrap();
        assert_eq!(jumps.edges(), 2);
        assert_eq!(jumps.count(999_999, 0), 2);
        assert_eq!(jumps.count(0, 999_999), 0);
        assert_eq!(
            jumps.record(999_999, 0, 2),
            Err(Fault::TooManyJumps { from: 999_999, to: 0 })
        );
    }

    #[test]
    fn test_reset() {
        let mut jumps = JumpCounter::new(1);
        jumps.record(0, 0, 1).unwrap();
        jumps.reset();
        assert_eq!(jumps.count(0, 0), 0);
        assert_eq!(jumps.edges(), 0);
        assert!(jumps.record(0, 0, 1).is_ok());
    }
}
