//! Range command handler
//!
//! Hashes `start..end` or `start` plus `--length` bytes.

use super::fingerprint_json;
use super::parse::{parse_address, parse_length};
use anyhow::{Context, Result};
use memhash::{compute_fingerprint, Algorithm, FingerprintResult, MemoryRange, MemorySource};

/// Build a validated range from operator input
pub fn resolve_range(start: &str, end: Option<&str>, length: Option<&str>) -> Result<MemoryRange> {
    let start = parse_address(start)?;
    let range = match (end, length) {
        (Some(end), _) => MemoryRange::from_bounds(start, parse_address(end)?)?,
        (None, Some(length)) => MemoryRange::new(start, parse_length(length)?)?,
        (None, None) => anyhow::bail!("Either an end address or --length is required"),
    };
    Ok(range)
}

/// Compute the fingerprint for a range, with operator-facing error context
pub fn fingerprint_range(
    source: &dyn MemorySource,
    range: MemoryRange,
    algorithm: Algorithm,
) -> Result<FingerprintResult> {
    tracing::debug!(
        "Hashing {} bytes at {:#x} with {}",
        range.length(),
        range.start(),
        algorithm
    );
    if source.is_live() {
        tracing::debug!("Target is live; pause it first if the range may change during the read");
    }

    compute_fingerprint(source, range, algorithm).with_context(|| {
        format!(
            "Could not read memory for {:#x}..{:#x}",
            range.start(),
            range.end()
        )
    })
}

/// Handle the Range command
pub fn handle(
    source: &dyn MemorySource,
    range: MemoryRange,
    algorithm: Algorithm,
    json: bool,
) -> Result<()> {
    let result = fingerprint_range(source, range, algorithm)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&fingerprint_json(&result))?);
    } else {
        println!("{}", memhash::render(&result));
    }

    Ok(())
}
