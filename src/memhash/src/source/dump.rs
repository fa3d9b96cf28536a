//! Dump File Memory Source
//!
//! Memory source implementation for reading from dump files (MDMP and gcore formats).

use super::{parse_maps_line, MemoryRegion, MemorySource};
use crate::error::{Error, Result};

use byteorder::{ByteOrder, LE};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Memory dump file source
///
/// Regions map virtual addresses to file offsets. A dump is a snapshot, so
/// fingerprints taken from it never tear.
pub struct DumpFile {
    /// Memory-mapped dump file
    mmap: Mmap,
    /// Virtual address regions parsed from dump or maps file
    regions: Vec<MemoryRegion>,
    /// Path to the dump file
    pub path: PathBuf,
}

impl DumpFile {
    /// MDMP signature "MDMP" in little-endian
    const MDMP_SIGNATURE: u32 = 0x504D444D;

    /// MDMP stream types
    const MEMORY_64_LIST_STREAM: u32 = 9;

    /// Open a memory dump file
    ///
    /// Supports:
    /// - Windows Minidump (MDMP) format - auto-detected by "MDMP" signature
    /// - Raw/gcore dumps with a `.maps` file next to them
    /// - Anything else as a flat image starting at address 0
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mmap = map_file(&path)?;

        if mmap.len() >= 4 && LE::read_u32(&mmap[0..4]) == Self::MDMP_SIGNATURE {
            let regions = Self::parse_mdmp(&mmap)?;
            return Ok(DumpFile {
                mmap,
                regions,
                path,
            });
        }

        let maps_path = path.with_extension("maps");
        let regions = if maps_path.exists() {
            parse_dump_maps(&maps_path)?
        } else {
            vec![MemoryRegion {
                start: 0,
                end: mmap.len() as u64,
                perms: "r--p".to_string(),
                offset: 0,
                path: None,
            }]
        };

        Ok(DumpFile {
            mmap,
            regions,
            path,
        })
    }

    /// Open a dump with an explicit maps file
    pub fn open_with_maps<P, Q>(dump_path: P, maps_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let path = dump_path.as_ref().to_path_buf();
        let mmap = map_file(&path)?;
        let regions = parse_dump_maps(maps_path.as_ref())?;

        Ok(DumpFile {
            mmap,
            regions,
            path,
        })
    }

    /// Size of the dump file in bytes
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Parse the Memory64List stream of a Windows Minidump
    fn parse_mdmp(mmap: &[u8]) -> Result<Vec<MemoryRegion>> {
        if mmap.len() < 32 {
            return Err(Error::InvalidDump("MDMP file too small for header".into()));
        }

        let num_streams = LE::read_u32(&mmap[0x08..0x0C]) as usize;
        let stream_dir_rva = LE::read_u32(&mmap[0x0C..0x10]) as usize;

        for i in 0..num_streams {
            let entry_offset = stream_dir_rva + i * 12;
            if entry_offset + 12 > mmap.len() {
                break;
            }

            let stream_type = LE::read_u32(&mmap[entry_offset..entry_offset + 4]);
            let rva = LE::read_u32(&mmap[entry_offset + 8..entry_offset + 12]) as usize;

            if stream_type != Self::MEMORY_64_LIST_STREAM {
                continue;
            }

            if rva + 16 > mmap.len() {
                return Err(Error::InvalidDump(
                    "Memory64ListStream header out of bounds".into(),
                ));
            }

            let num_ranges = LE::read_u64(&mmap[rva..rva + 8]) as usize;
            let mut file_offset = LE::read_u64(&mmap[rva + 8..rva + 16]);
            let mut regions = Vec::with_capacity(num_ranges.min(4096));

            for j in 0..num_ranges {
                let desc = rva + 16 + j * 16;
                if desc + 16 > mmap.len() {
                    break;
                }

                let start = LE::read_u64(&mmap[desc..desc + 8]);
                let size = LE::read_u64(&mmap[desc + 8..desc + 16]);
                let end = start.checked_add(size).ok_or_else(|| {
                    Error::InvalidDump(format!("range {:#x}+{:#x} overflows", start, size))
                })?;

                regions.push(MemoryRegion {
                    start,
                    end,
                    // Memory64List does not record protection; captured means readable
                    perms: "r--p".to_string(),
                    offset: file_offset,
                    path: None,
                });
                file_offset = file_offset.saturating_add(size);
            }

            return Ok(regions);
        }

        Err(Error::InvalidDump(
            "No Memory64ListStream found in MDMP - dump may be incomplete".into(),
        ))
    }

    /// File offset range backing `[address, address + len)` within one region
    fn backing(&self, region: &MemoryRegion, address: u64, len: u64) -> Option<(usize, usize)> {
        let start = region.offset.checked_add(address - region.start)?;
        let end = start.checked_add(len)?;
        if end > self.mmap.len() as u64 {
            return None;
        }
        Some((start as usize, end as usize))
    }
}

impl MemorySource for DumpFile {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let total = size as u64;
        let end = address.checked_add(total).ok_or_else(|| {
            Error::InvalidRange(format!(
                "{:#x} + {:#x} overflows the address space",
                address, total
            ))
        })?;

        let mut buffer = Vec::with_capacity(size);
        let mut cursor = address;

        // A range may span adjacent regions; every piece must be captured in the file
        while cursor < end {
            let region = self
                .find_region(cursor)
                .filter(|r| r.is_readable())
                .ok_or_else(|| {
                    Error::unreadable(
                        address,
                        total,
                        format!("{:#x} is not captured in the dump", cursor),
                    )
                })?;

            let chunk = region.end.min(end) - cursor;
            let (from, to) = self.backing(region, cursor, chunk).ok_or_else(|| {
                Error::unreadable(
                    address,
                    total,
                    format!("{:#x} is past the end of the dump file", cursor),
                )
            })?;

            buffer.extend_from_slice(&self.mmap[from..to]);
            cursor += chunk;
        }

        Ok(buffer)
    }

    fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    fn is_live(&self) -> bool {
        false
    }
}

fn map_file(path: &Path) -> Result<Mmap> {
    let file = File::open(path)?;
    // SAFETY: the dump is opened read-only and is not expected to change while mapped
    let mmap = unsafe { Mmap::map(&file) }?;
    Ok(mmap)
}

/// Parse a maps file (supports both /proc/pid/maps and custom dump format)
///
/// Custom format lines are `0xSTART 0xEND SIZE 0xFILE_OFFSET`.
///
/// The offset column of a /proc/pid/maps line refers to the mapped file, not
/// the dump. Readable regions from such lines are taken to be stored back to
/// back in line order (the layout of a dump made by copying each readable
/// mapping in turn), so each one starts where the previous one ended.
fn parse_dump_maps(path: &Path) -> Result<Vec<MemoryRegion>> {
    let contents = std::fs::read_to_string(path)?;
    let mut regions = Vec::new();
    let mut packed: u64 = 0;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with("0x") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return Err(Error::InvalidDump(format!("malformed maps line: {}", line)));
            }
            let start = parse_hex(parts[0])?;
            let end = parse_hex(parts[1])?;
            let offset = parse_hex(parts[3])?;
            if end < start {
                return Err(Error::InvalidDump(format!("inverted range: {}", line)));
            }

            regions.push(MemoryRegion {
                start,
                end,
                perms: "r--p".to_string(),
                offset,
                path: None,
            });
        } else if let Some(mut region) = parse_maps_line(line) {
            region.offset = packed;
            if region.is_readable() {
                packed = packed.checked_add(region.size()).ok_or_else(|| {
                    Error::InvalidDump(format!("dump offsets overflow at: {}", line))
                })?;
            }
            regions.push(region);
        }
    }

    Ok(regions)
}

fn parse_hex(s: &str) -> Result<u64> {
    u64::from_str_radix(s.trim_start_matches("0x"), 16)
        .map_err(|_| Error::InvalidDump(format!("invalid hex value: {}", s)))
}
