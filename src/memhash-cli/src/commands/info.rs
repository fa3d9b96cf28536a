//! Info command handler

use anyhow::Result;
use memhash::MemorySource;

/// Handle the Info command
pub fn handle(source: &dyn MemorySource) -> Result<()> {
    let regions = source.regions();
    let readable = regions.iter().filter(|r| r.is_readable()).count();

    println!(
        "Source: {}",
        if source.is_live() { "live process" } else { "dump file" }
    );
    println!("Address width: {} bits", source.address_width() * 8);
    println!("Regions: {} ({} readable)", regions.len(), readable);

    for region in regions {
        println!(
            "  {:#014x}-{:#014x} {} {}",
            region.start,
            region.end,
            region.perms,
            region.path.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
