//! Command handlers for memhash CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod algorithms;
pub mod configure;
pub mod info;
pub mod module;
pub mod parse;
pub mod range;

use crate::cli::TargetArgs;
use crate::config::Config;
use anyhow::{bail, Context, Result};
use memhash::{DumpFile, FingerprintResult, MemorySource};

/// Open the memory source selected by the target flags.
///
/// A dump takes precedence over a PID; with neither, the configured default
/// PID is used.
pub fn open_target(target: &TargetArgs, config: &Config) -> Result<Box<dyn MemorySource>> {
    if let Some(dump_path) = &target.dump {
        let dump = match &target.maps {
            Some(maps_path) => DumpFile::open_with_maps(dump_path, maps_path)
                .context("Failed to open dump file with maps")?,
            None => DumpFile::open(dump_path).context("Failed to open dump file")?,
        };
        tracing::info!(
            "Opened dump {} ({} bytes, {} regions)",
            dump_path.display(),
            dump.len(),
            dump.regions().len()
        );
        return Ok(Box::new(dump));
    }

    let Some(pid) = target.pid.or(config.default_pid) else {
        bail!("No target given. Use --pid, --dump, or `memhash configure --pid`.");
    };

    attach(pid)
}

#[cfg(target_os = "linux")]
fn attach(pid: u32) -> Result<Box<dyn MemorySource>> {
    let process = memhash::LiveProcess::attach(pid)
        .with_context(|| format!("Failed to attach to process {}", pid))?;
    tracing::info!(
        "Attached to PID {} ({}, {} regions)",
        pid,
        process.exe_path.display(),
        process.maps.len()
    );
    Ok(Box::new(process))
}

#[cfg(not(target_os = "linux"))]
fn attach(pid: u32) -> Result<Box<dyn MemorySource>> {
    bail!(
        "Cannot attach to PID {}: live processes are only supported on Linux. Use --dump.",
        pid
    )
}

/// JSON view of a fingerprint
///
/// `end` is the last byte, as in the rendered line.
pub fn fingerprint_json(result: &FingerprintResult) -> serde_json::Value {
    let range = result.range();
    serde_json::json!({
        "start": format!("{:#x}", range.start()),
        "end": format!("{:#x}", range.last_address().unwrap_or(range.start())),
        "length": range.length(),
        "algorithm": result.algorithm().name(),
        "digest": result.digest().to_hex(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use memhash::{compute_fingerprint, Algorithm, MemoryRange};
    use std::io::Write;

    #[test]
    fn test_open_target_requires_something() {
        let err = open_target(&TargetArgs::default(), &Config::default()).err().expect("expected error");
        assert!(err.to_string().contains("No target"));
    }

    #[test]
    fn test_open_target_prefers_dump() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("image.bin");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[1, 2, 3, 4])
            .unwrap();

        let target = TargetArgs {
            pid: Some(u32::MAX - 1),
            dump: Some(path),
            maps: None,
        };
        let source = open_target(&target, &Config::default()).unwrap();
        assert!(!source.is_live());
        assert_eq!(source.read_bytes(0, 4).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_open_target_missing_pid() {
        let target = TargetArgs {
            pid: Some(u32::MAX - 1),
            ..Default::default()
        };
        assert!(open_target(&target, &Config::default()).is_err());
    }

    #[test]
    fn test_fingerprint_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("image.bin");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();
        let target = TargetArgs {
            dump: Some(path),
            ..Default::default()
        };
        let source = open_target(&target, &Config::default()).unwrap();

        let range = MemoryRange::new(0, 4).unwrap();
        let result = compute_fingerprint(source.as_ref(), range, Algorithm::Md5).unwrap();
        let json = fingerprint_json(&result);
        assert_eq!(json["start"], "0x0");
        assert_eq!(json["end"], "0x3");
        assert_eq!(json["length"], 4);
        assert_eq!(json["algorithm"], "MD5");
        assert_eq!(json["digest"], Algorithm::Md5.digest(&[1, 2, 3, 4]).to_hex());

        // Same end address as the rendered line
        assert!(memhash::render(&result).contains("0x00000003"));
    }

    #[test]
    fn test_fingerprint_json_empty_range() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("image.bin");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();
        let source = DumpFile::open(&path).unwrap();

        let range = MemoryRange::new(2, 0).unwrap();
        let result = compute_fingerprint(&source, range, Algorithm::Md5).unwrap();
        let json = fingerprint_json(&result);
        assert_eq!(json["start"], "0x2");
        assert_eq!(json["end"], "0x2");
        assert_eq!(json["length"], 0);
    }
}
