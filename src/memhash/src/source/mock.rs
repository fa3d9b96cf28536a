//! Mock Memory Source
//!
//! An in-memory target for testing readers and hashers.

use super::{ensure_readable, MemoryRegion, MemorySource};
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A mock memory source with a read counter and a detach switch
pub struct MockMemorySource {
    /// Raw memory data (contiguous, starting at base_address)
    pub data: Vec<u8>,
    /// Base virtual address for the data
    pub base_address: u64,
    /// Memory regions, checked for readability on every read
    pub regions: Vec<MemoryRegion>,
    /// Pointer width reported to readers
    pub address_width: usize,
    attached: bool,
    reads: AtomicUsize,
}

impl MockMemorySource {
    /// Create a new mock with data at given base address
    pub fn new(data: Vec<u8>, base_address: u64) -> Self {
        let end = base_address + data.len() as u64;
        Self::with_regions(
            data,
            base_address,
            vec![MemoryRegion {
                start: base_address,
                end,
                perms: "rw-p".to_string(),
                offset: 0,
                path: None,
            }],
        )
    }

    /// Create with explicit regions
    pub fn with_regions(data: Vec<u8>, base_address: u64, regions: Vec<MemoryRegion>) -> Self {
        Self {
            data,
            base_address,
            regions,
            address_width: 8,
            attached: true,
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of `read_bytes` calls that reached this source
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Overwrite bytes at an address, as the running target would
    pub fn poke(&mut self, address: u64, bytes: &[u8]) {
        let offset = (address - self.base_address) as usize;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Simulate the target exiting or the debugger detaching
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl MemorySource for MockMemorySource {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if !self.attached {
            return Err(Error::ProcessUnavailable("mock target detached".to_string()));
        }

        ensure_readable(&self.regions, address, size as u64)?;

        if address < self.base_address {
            return Err(Error::unreadable(
                address,
                size as u64,
                format!("below base {:#x}", self.base_address),
            ));
        }

        let offset = (address - self.base_address) as usize;
        if offset + size > self.data.len() {
            return Err(Error::unreadable(
                address,
                size as u64,
                format!("exceeds data size {}", self.data.len()),
            ));
        }

        Ok(self.data[offset..offset + size].to_vec())
    }

    fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    fn is_live(&self) -> bool {
        self.attached
    }

    fn address_width(&self) -> usize {
        self.address_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_source_read_bytes() {
        let data = vec![0x41, 0x42, 0x43, 0x44]; // "ABCD"
        let source = MockMemorySource::new(data, 0x1000);

        let result = source.read_bytes(0x1000, 4).unwrap();
        assert_eq!(result, vec![0x41, 0x42, 0x43, 0x44]);

        let partial = source.read_bytes(0x1001, 2).unwrap();
        assert_eq!(partial, vec![0x42, 0x43]);
        assert_eq!(source.read_count(), 2);
    }

    #[test]
    fn test_mock_source_read_out_of_bounds() {
        let data = vec![0x41, 0x42, 0x43, 0x44];
        let source = MockMemorySource::new(data, 0x1000);

        // Reading past end should fail
        assert!(matches!(
            source.read_bytes(0x1002, 10),
            Err(Error::UnreadableMemory { .. })
        ));

        // Reading before base should fail
        assert!(matches!(
            source.read_bytes(0x500, 4),
            Err(Error::UnreadableMemory { .. })
        ));
    }

    #[test]
    fn test_mock_source_poke() {
        let mut source = MockMemorySource::new(vec![0; 8], 0x1000);
        source.poke(0x1002, &[0xAA, 0xBB]);
        assert_eq!(
            source.read_bytes(0x1000, 4).unwrap(),
            vec![0x00, 0x00, 0xAA, 0xBB]
        );
    }

    #[test]
    fn test_mock_source_detach() {
        let mut source = MockMemorySource::new(vec![0; 8], 0x1000);
        assert!(source.is_live());
        source.detach();
        assert!(!source.is_live());
        assert!(matches!(
            source.read_bytes(0x1000, 4),
            Err(Error::ProcessUnavailable(_))
        ));
    }

    #[test]
    fn test_mock_source_find_region() {
        let source = MockMemorySource::with_regions(
            vec![0; 0x2000],
            0x1000,
            vec![
                MemoryRegion {
                    start: 0x1000,
                    end: 0x2000,
                    perms: "r--p".to_string(),
                    offset: 0,
                    path: None,
                },
                MemoryRegion {
                    start: 0x2000,
                    end: 0x3000,
                    perms: "-w-p".to_string(),
                    offset: 0x1000,
                    path: None,
                },
            ],
        );

        assert_eq!(source.find_region(0x1500).unwrap().start, 0x1000);
        assert_eq!(source.find_region(0x2500).unwrap().start, 0x2000);
        assert!(source.find_region(0x5000).is_none());

        assert!(source.is_readable(0x1500));
        assert!(!source.is_readable(0x2500));
        assert!(!source.is_readable(0x5000));
    }

    #[test]
    fn test_address_limit() {
        let mut source = MockMemorySource::new(vec![0; 4], 0x1000);
        assert_eq!(source.address_limit(), None);
        source.address_width = 4;
        assert_eq!(source.address_limit(), Some(0x1_0000_0000));
    }
}
