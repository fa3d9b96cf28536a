//! Module command handler
//!
//! Hashes each readable mapping of a loaded module, one line per mapping.

use super::fingerprint_json;
use anyhow::{Context, Result};
use memhash::{fingerprint_module, Algorithm, MemorySource, ModuleFingerprint};

/// Handle the Module command
pub fn handle(
    source: &dyn MemorySource,
    name: &str,
    algorithm: Algorithm,
    json: bool,
) -> Result<()> {
    let sections = fingerprint_module(source, name, algorithm)
        .with_context(|| format!("Could not hash module {}", name))?;

    tracing::info!("Hashed {} mappings of {}", sections.len(), name);

    if json {
        println!("{}", serde_json::to_string_pretty(&module_json(&sections))?);
        return Ok(());
    }

    for section in &sections {
        let module = section.region.file_name().unwrap_or(name);
        println!(
            "{} {} {}",
            module,
            section.region.perms,
            memhash::render(&section.result)
        );
    }

    Ok(())
}

/// JSON view of a module's fingerprints, with each mapping's perms and path
pub fn module_json(sections: &[ModuleFingerprint]) -> Vec<serde_json::Value> {
    sections
        .iter()
        .map(|s| {
            let mut entry = fingerprint_json(&s.result);
            entry["perms"] = s.region.perms.clone().into();
            entry["path"] = s.region.path.clone().into();
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use memhash::DumpFile;

    #[test]
    fn test_module_json_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dump_path = temp_dir.path().join("proc.raw");
        let maps_path = temp_dir.path().join("proc.maps");

        let mut data = vec![0x11u8; 16];
        data.extend_from_slice(&[0x22u8; 16]);
        std::fs::write(&dump_path, &data).unwrap();
        std::fs::write(
            &maps_path,
            "1000-1010 r-xp 00000000 08:01 42 /usr/lib/libdemo.so.1\n\
             1010-1020 ---p 00010000 08:01 42 /usr/lib/libdemo.so.1\n\
             2000-2010 rw-p 00020000 08:01 42 /usr/lib/libdemo.so.1\n",
        )
        .unwrap();

        let dump = DumpFile::open_with_maps(&dump_path, &maps_path).unwrap();
        let sections = fingerprint_module(&dump, "libdemo", Algorithm::Md5).unwrap();
        let entries = module_json(&sections);

        // The guard mapping is skipped
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["start"], "0x1000");
        assert_eq!(entries[0]["perms"], "r-xp");
        assert_eq!(entries[0]["path"], "/usr/lib/libdemo.so.1");
        assert_eq!(entries[0]["digest"], Algorithm::Md5.digest(&[0x11; 16]).to_hex());
        assert_eq!(entries[1]["perms"], "rw-p");
        assert_eq!(entries[1]["digest"], Algorithm::Md5.digest(&[0x22; 16]).to_hex());
    }

    #[test]
    fn test_handle_unknown_module() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dump_path = temp_dir.path().join("flat.bin");
        std::fs::write(&dump_path, [0u8; 8]).unwrap();
        let dump = DumpFile::open(&dump_path).unwrap();

        let err = handle(&dump, "libmissing", Algorithm::Md5, true).unwrap_err();
        assert!(err.to_string().contains("Could not hash module libmissing"));
        assert!(matches!(
            err.downcast_ref::<memhash::Error>(),
            Some(memhash::Error::ModuleNotFound(_))
        ));
    }
}
