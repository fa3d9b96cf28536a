//! Operator input parsing
//!
//! Addresses follow debugger convention and are always hexadecimal; lengths
//! are decimal unless prefixed with 0x.

use anyhow::{bail, Context, Result};

/// Parse a hex address, with or without a 0x prefix
pub fn parse_address(address: &str) -> Result<u64> {
    let trimmed = address.trim();
    let digits = strip_hex_prefix(trimmed).unwrap_or(trimmed).replace('_', "");
    if digits.is_empty() {
        bail!("Invalid address '{}'", address);
    }
    u64::from_str_radix(&digits, 16).with_context(|| format!("Invalid hex address '{}'", address))
}

/// Parse a byte count: decimal, or hex with a 0x prefix
pub fn parse_length(length: &str) -> Result<u64> {
    let trimmed = length.trim();
    if let Some(hex) = strip_hex_prefix(trimmed) {
        return u64::from_str_radix(&hex.replace('_', ""), 16)
            .with_context(|| format!("Invalid hex length '{}'", length));
    }
    trimmed
        .replace('_', "")
        .parse::<u64>()
        .with_context(|| format!("Invalid length '{}'", length))
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}
