//! Memory subsystem
//!
//! Sparse word memory keyed by direct (word-aligned) addresses. Cells that
//! were never written hold "no value".

use dlx_spec::{check_direct_address, Address, SpecError, Word};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    data: BTreeMap<Address, Word>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a word; misaligned addresses never hold a value
    #[inline]
    pub fn read(&self, address: Address) -> Option<Word> {
        self.data.get(&address).copied()
    }

    pub fn write(&mut self, address: Address, value: Word) -> Result<(), SpecError> {
        let address = check_direct_address(address)?;
        self.data.insert(address, value);
        Ok(())
    }

    /// Clear a cell back to "no value"
    pub fn unset(&mut self, address: Address) -> Option<Word> {
        self.data.remove(&address)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Set cells in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = (Address, Word)> + '_ {
        self.data.iter().map(|(&address, &value)| (address, value))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
