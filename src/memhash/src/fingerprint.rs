//! Range fingerprints
//!
//! Every function here is stateless: it reads, digests, and returns. Nothing
//! is cached between calls and nothing is logged.

use crate::digest::{Algorithm, Digest};
use crate::error::{Error, Result};
use crate::range::MemoryRange;
use crate::reader;
use crate::source::{MemoryRegion, MemorySource};
use std::fmt;

/// A digest together with the range it was computed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintResult {
    range: MemoryRange,
    digest: Digest,
}

impl FingerprintResult {
    pub fn range(&self) -> MemoryRange {
        self.range
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn algorithm(&self) -> Algorithm {
        self.digest.algorithm()
    }
}

impl fmt::Display for FingerprintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.range.start();
        let last = self.range.last_address().unwrap_or(start);
        write!(
            f,
            "{:#010x} .. {:#010x} : {} {}",
            start,
            last,
            self.digest.algorithm().name(),
            self.digest.to_hex()
        )
    }
}

/// Render a fingerprint as a single line:
/// `<hex start> .. <hex last byte> : <algorithm> <hex digest>`
pub fn render(result: &FingerprintResult) -> String {
    result.to_string()
}

/// Read `range` from `source` and digest it with `algorithm`
pub fn compute_fingerprint(
    source: &dyn MemorySource,
    range: MemoryRange,
    algorithm: Algorithm,
) -> Result<FingerprintResult> {
    let region = reader::read(source, range)?;
    let digest = algorithm.digest(region.as_bytes());
    Ok(FingerprintResult { range, digest })
}

/// Host entry point taking raw inputs.
///
/// The algorithm id is resolved before the range is validated, and both
/// happen before any memory is read.
pub fn fingerprint(
    source: &dyn MemorySource,
    start_address: u64,
    length: u64,
    algorithm_id: u32,
) -> Result<FingerprintResult> {
    let algorithm = Algorithm::try_from(algorithm_id)?;
    let range = MemoryRange::new(start_address, length)?;
    compute_fingerprint(source, range, algorithm)
}

/// Fingerprint of one mapping of a loaded module
#[derive(Debug, Clone)]
pub struct ModuleFingerprint {
    pub region: MemoryRegion,
    pub result: FingerprintResult,
}

/// Fingerprint every readable mapping of `module` separately.
///
/// Mappings without read permission (guard pages, reserved space) are
/// skipped. Fails with [`Error::ModuleNotFound`] when no readable mapping
/// belongs to the module.
pub fn fingerprint_module(
    source: &dyn MemorySource,
    module: &str,
    algorithm: Algorithm,
) -> Result<Vec<ModuleFingerprint>> {
    let regions: Vec<MemoryRegion> = source
        .regions()
        .iter()
        .filter(|r| r.is_readable() && r.belongs_to(module))
        .cloned()
        .collect();

    if regions.is_empty() {
        return Err(Error::ModuleNotFound(module.to_string()));
    }

    regions
        .into_iter()
        .map(|region| {
            let range = MemoryRange::from_bounds(region.start, region.end)?;
            let result = compute_fingerprint(source, range, algorithm)?;
            Ok(ModuleFingerprint { region, result })
        })
        .collect()
}
