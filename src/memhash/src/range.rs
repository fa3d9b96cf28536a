//! Validated address ranges

use crate::error::{Error, Result};

/// A `(start, length)` pair identifying bytes to fingerprint.
///
/// Construction guarantees `start + length` fits in a `u64`, so the exclusive
/// end address is always representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRange {
    start: u64,
    length: u64,
}

impl MemoryRange {
    /// Create a range of `length` bytes starting at `start`
    pub fn new(start: u64, length: u64) -> Result<Self> {
        if start.checked_add(length).is_none() {
            return Err(Error::InvalidRange(format!(
                "{:#x} + {:#x} overflows the address space",
                start, length
            )));
        }
        Ok(MemoryRange { start, length })
    }

    /// Create a range from a start address and an exclusive end address
    pub fn from_bounds(start: u64, end: u64) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidRange(format!(
                "end address {:#x} is below start address {:#x}",
                end, start
            )));
        }
        Ok(MemoryRange {
            start,
            length: end - start,
        })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Exclusive end address
    pub fn end(&self) -> u64 {
        // Cannot overflow, checked at construction
        self.start + self.length
    }

    /// Address of the last byte, or `None` for an empty range
    pub fn last_address(&self) -> Option<u64> {
        if self.is_empty() {
            None
        } else {
            Some(self.end() - 1)
        }
    }
}
