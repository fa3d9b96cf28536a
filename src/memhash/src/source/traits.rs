//! Memory Source Trait
//!
//! The byte-read primitive every fingerprint is computed from.

use super::MemoryRegion;
use crate::error::Result;

/// Trait for reading memory from a target (live process, dump file, etc.)
///
/// A source is the opaque handle the host passes into every fingerprint
/// operation. Implementations must be all-or-nothing: either the returned
/// buffer holds exactly `size` bytes read from `address` onward, or the call
/// fails with a typed error.
pub trait MemorySource: Send + Sync {
    /// Read `size` bytes starting at a virtual address
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Memory regions known for this target
    fn regions(&self) -> &[MemoryRegion];

    /// Check if this is a live process (as opposed to a snapshot)
    fn is_live(&self) -> bool;

    /// Pointer width of the target in bytes
    fn address_width(&self) -> usize {
        8
    }

    /// Exclusive upper bound of the target's address space, `None` when it
    /// spans the full `u64` range
    fn address_limit(&self) -> Option<u64> {
        match self.address_width() {
            width if width >= 8 => None,
            width => Some(1u64 << (width * 8)),
        }
    }

    /// Find a region containing the given address
    fn find_region(&self, address: u64) -> Option<&MemoryRegion> {
        self.regions().iter().find(|r| r.contains(address))
    }

    /// Check if an address is readable
    fn is_readable(&self, address: u64) -> bool {
        self.find_region(address)
            .map(|r| r.is_readable())
            .unwrap_or(false)
    }
}
