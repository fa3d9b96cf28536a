//! Memory Region Types
//!
//! Data structures for representing memory regions from /proc/pid/maps
//! or a dump file's range table.

use crate::error::{Error, Result};
use std::path::Path;

/// A mapped memory region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    pub start: u64,
    pub end: u64,
    pub perms: String,
    /// File offset of `start` (backing file for process maps, dump file for dumps)
    pub offset: u64,
    pub path: Option<String>,
}

impl MemoryRegion {
    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    pub fn contains(&self, address: u64) -> bool {
        address >= self.start && address < self.end
    }

    pub fn is_readable(&self) -> bool {
        self.perms.starts_with('r')
    }

    /// File name of the backing path (`libc.so.6` for `/usr/lib/libc.so.6`)
    pub fn file_name(&self) -> Option<&str> {
        let path = self.path.as_deref()?;
        // Windows paths show up in Wine/Proton maps and minidump module lists
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Whether this region is backed by the named module.
    ///
    /// Matches the exact file name, or the name followed by an extension,
    /// ignoring ASCII case: `kernel32` matches `KERNEL32.DLL`, `libc`
    /// matches `libc.so.6`.
    pub fn belongs_to(&self, module: &str) -> bool {
        let Some(name) = self.file_name() else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        let module = module.to_ascii_lowercase();
        match name.strip_prefix(&module) {
            Some("") => true,
            Some(rest) => rest.starts_with('.'),
            None => false,
        }
    }
}

/// Check that every byte of `[address, address + size)` lies in a readable region.
///
/// Regions may be adjacent; a gap or a non-readable mapping anywhere in the
/// range fails the whole check.
pub fn ensure_readable(regions: &[MemoryRegion], address: u64, size: u64) -> Result<()> {
    let end = address.checked_add(size).ok_or_else(|| {
        Error::InvalidRange(format!(
            "{:#x} + {:#x} overflows the address space",
            address, size
        ))
    })?;

    let mut cursor = address;
    while cursor < end {
        let region = regions
            .iter()
            .find(|r| r.contains(cursor))
            .ok_or_else(|| Error::unreadable(address, size, format!("{:#x} is unmapped", cursor)))?;

        if !region.is_readable() {
            return Err(Error::unreadable(
                address,
                size,
                format!(
                    "{:#x} lies in {:#x}-{:#x} without read permission ({})",
                    cursor, region.start, region.end, region.perms
                ),
            ));
        }

        cursor = region.end;
    }

    Ok(())
}

/// Parse one line of /proc/pid/maps
///
/// `7f0000000000-7f0000001000 r-xp 00000000 08:01 1234 /usr/lib/libc.so.6`
pub fn parse_maps_line(line: &str) -> Option<MemoryRegion> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (start, end) = parts.first()?.split_once('-')?;

    let start = u64::from_str_radix(start, 16).ok()?;
    let end = u64::from_str_radix(end, 16).ok()?;
    let perms = parts.get(1).unwrap_or(&"").to_string();
    let offset = parts
        .get(2)
        .and_then(|s| u64::from_str_radix(s, 16).ok())
        .unwrap_or(0);
    // Paths may contain spaces; everything after the inode column is the path
    let path = if parts.len() > 5 {
        Some(parts[5..].join(" "))
    } else {
        None
    };

    Some(MemoryRegion {
        start,
        end,
        perms,
        offset,
        path,
    })
}

/// Parse a whole /proc/pid/maps file
pub fn parse_maps_file(path: &Path) -> Result<Vec<MemoryRegion>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents.lines().filter_map(parse_maps_line).collect())
}
