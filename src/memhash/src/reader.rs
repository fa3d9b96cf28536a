//! Range reads with boundary validation

use crate::error::{Error, Result};
use crate::range::MemoryRange;
use crate::source::MemorySource;

/// Bytes read for one [`MemoryRange`], owned by the call that read them
#[derive(Debug)]
pub struct ByteRegion {
    range: MemoryRange,
    bytes: Vec<u8>,
}

impl ByteRegion {
    pub fn range(&self) -> MemoryRange {
        self.range
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Read exactly `range.length()` bytes from `source`.
///
/// An empty range never touches the source. A source that returns fewer
/// bytes than requested is treated as unreadable; partial data is never
/// handed back.
pub fn read(source: &dyn MemorySource, range: MemoryRange) -> Result<ByteRegion> {
    if range.is_empty() {
        return Ok(ByteRegion {
            range,
            bytes: Vec::new(),
        });
    }

    if let Some(limit) = source.address_limit() {
        if range.end() > limit {
            return Err(Error::InvalidRange(format!(
                "{:#x}-{:#x} exceeds the target's {}-bit address space",
                range.start(),
                range.end(),
                source.address_width() * 8
            )));
        }
    }

    let size = usize::try_from(range.length()).map_err(|_| {
        Error::InvalidRange(format!(
            "length {:#x} does not fit in host memory",
            range.length()
        ))
    })?;

    let bytes = source.read_bytes(range.start(), size)?;
    if bytes.len() != size {
        return Err(Error::unreadable(
            range.start(),
            range.length(),
            format!("short read of {} bytes", bytes.len()),
        ));
    }

    Ok(ByteRegion { range, bytes })
}
