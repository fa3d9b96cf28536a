//! Memory Source Abstraction
//!
//! Core abstractions for reading memory from various targets:
//! - Live process attachment via `LiveProcess` (Linux, through /proc)
//! - Memory dump files via `DumpFile` (MDMP and gcore formats)
//! - Mock sources for testing

mod dump;
#[cfg(test)]
mod mock;
#[cfg(target_os = "linux")]
mod process;
mod region;
mod traits;

pub use dump::DumpFile;
#[cfg(test)]
pub use mock::MockMemorySource;
#[cfg(target_os = "linux")]
pub use process::LiveProcess;
pub use region::{ensure_readable, parse_maps_file, parse_maps_line, MemoryRegion};
pub use traits::MemorySource;
