//! # memhash
//!
//! Content fingerprints over byte ranges of a target's address space.
//!
//! This library provides functionality to:
//! - Read an exact byte range from a live process or a memory dump
//! - Digest it (MD5 by default) into a stable lowercase-hex fingerprint
//! - Fingerprint every mapping of a loaded module
//!
//! Comparing two fingerprints of the same range taken at different points in
//! execution tells whether that memory changed. Reads of a running target are
//! not atomic; pause it first if a torn snapshot would matter.
//!
//! ## Example
//!
//! ```no_run
//! use memhash::{fingerprint, render, Algorithm, LiveProcess};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let process = LiveProcess::attach(1234)?;
//!
//! let before = fingerprint(&process, 0x0040_0000, 0x1000, Algorithm::Md5.id())?;
//! // ... let the target run ...
//! let after = fingerprint(&process, 0x0040_0000, 0x1000, Algorithm::Md5.id())?;
//!
//! println!("{}", render(&after));
//! if before.digest() != after.digest() {
//!     println!("memory changed");
//! }
//! # Ok(())
//! # }
//! ```

pub mod digest;
pub mod error;
pub mod fingerprint;
pub mod range;
pub mod reader;
pub mod source;

#[doc(inline)]
pub use digest::{Algorithm, Digest};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use fingerprint::{
    compute_fingerprint, fingerprint, fingerprint_module, render, FingerprintResult,
    ModuleFingerprint,
};
#[doc(inline)]
pub use range::MemoryRange;
#[doc(inline)]
pub use reader::ByteRegion;
#[doc(inline)]
pub use source::{DumpFile, MemoryRegion, MemorySource};
#[cfg(target_os = "linux")]
#[doc(inline)]
pub use source::LiveProcess;
