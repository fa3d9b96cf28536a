//! Live Process Memory Source
//!
//! Memory source implementation for reading from a running process through
//! `/proc/<pid>/mem`.

use super::{ensure_readable, parse_maps_file, MemoryRegion, MemorySource};
use crate::error::{Error, Result};

use std::fs::File;
use std::io::ErrorKind;
use std::os::unix::fs::FileExt;
use std::path::PathBuf;

/// A process attached by PID
///
/// Reads are point-in-time copies. If the target keeps running while a
/// range is copied the bytes may be torn; pause it first when that matters.
pub struct LiveProcess {
    pub pid: u32,
    pub exe_path: PathBuf,
    /// Mappings at attach time
    pub maps: Vec<MemoryRegion>,
    mem: File,
}

impl MemorySource for LiveProcess {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        // Mappings change while the target runs; check against the current ones
        let maps = self.current_maps()?;
        ensure_readable(&maps, address, size as u64)?;

        let mut buffer = vec![0u8; size];
        let mut filled = 0;

        // A mapping listed as readable can still fault (e.g. file-backed pages
        // past the end of the file), which shows up as a short read here
        while filled < size {
            match self.mem.read_at(&mut buffer[filled..], address + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    if !self.is_alive() {
                        return Err(self.gone());
                    }
                    return Err(Error::unreadable(
                        address,
                        size as u64,
                        format!("read failed at {:#x}: {}", address + filled as u64, e),
                    ));
                }
            }
        }

        if filled < size {
            if !self.is_alive() {
                return Err(self.gone());
            }
            return Err(Error::unreadable(
                address,
                size as u64,
                format!(
                    "only {} of {} bytes readable, stopped at {:#x}",
                    filled,
                    size,
                    address + filled as u64
                ),
            ));
        }

        Ok(buffer)
    }

    fn regions(&self) -> &[MemoryRegion] {
        &self.maps
    }

    fn is_live(&self) -> bool {
        true
    }
}

impl LiveProcess {
    /// Attach to a running process by PID
    pub fn attach(pid: u32) -> Result<Self> {
        let proc_dir = proc_path(pid, "");
        if !proc_dir.exists() {
            return Err(Error::ProcessUnavailable(format!(
                "no process with PID {}",
                pid
            )));
        }

        let mem = File::open(proc_path(pid, "mem")).map_err(|e| {
            Error::ProcessUnavailable(format!("failed to open memory of PID {}: {}", pid, e))
        })?;

        let mut process = LiveProcess {
            pid,
            exe_path: PathBuf::new(),
            maps: Vec::new(),
            mem,
        };
        process.maps = process.current_maps()?;
        process.exe_path =
            std::fs::read_link(proc_path(pid, "exe")).unwrap_or_else(|_| PathBuf::from("unknown"));

        Ok(process)
    }

    /// Re-read /proc/pid/maps
    pub fn current_maps(&self) -> Result<Vec<MemoryRegion>> {
        match parse_maps_file(&proc_path(self.pid, "maps")) {
            Ok(maps) => Ok(maps),
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound || !self.is_alive() => {
                Err(self.gone())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether the PID still refers to a running process
    pub fn is_alive(&self) -> bool {
        proc_path(self.pid, "").exists()
    }

    fn gone(&self) -> Error {
        Error::ProcessUnavailable(format!("process {} has exited", self.pid))
    }
}

fn proc_path(pid: u32, entry: &str) -> PathBuf {
    let dir = PathBuf::from(format!("/proc/{}", pid));
    if entry.is_empty() {
        dir
    } else {
        dir.join(entry)
    }
}
