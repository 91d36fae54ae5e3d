//! Version and snapshot downloads.
//!
//! All downloads must succeed before normalization starts; a partial set of
//! regional snapshots would silently corrupt the region-merge passes, so
//! any failure here aborts the whole run.

use anyhow::{Context, Result};
use redive::Region;
use std::fs;
use std::io;
use std::path::Path;

/// Mirror publishing the per-region snapshots and the version manifest
const DATABASE_REPO: &str = "https://raw.githubusercontent.com/Expugn/priconne-database/master";

/// Fetch the upstream version manifest body, used as an opaque token
pub fn latest_version() -> Result<String> {
    let url = format!("{DATABASE_REPO}/version.json");
    ureq::get(&url)
        .call()
        .context("Failed to fetch version manifest")?
        .into_string()
        .context("Failed to read version manifest body")
}

/// Download one region's snapshot to `dest`
pub fn download_snapshot(region: Region, dest: &Path) -> Result<()> {
    let url = format!("{DATABASE_REPO}/master_{}.db", region.file_tag());
    let response = ureq::get(&url)
        .call()
        .with_context(|| format!("Failed to download {region} snapshot"))?;

    let mut reader = response.into_reader();
    let mut file = fs::File::create(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;
    io::copy(&mut reader, &mut file)
        .with_context(|| format!("Failed to write {}", dest.display()))?;

    println!("downloaded master_{}.db", region.file_tag());
    Ok(())
}

/// Snapshot file name for a region
pub fn snapshot_name(region: Region) -> String {
    format!("master_{}.db", region.file_tag())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_names() {
        assert_eq!(snapshot_name(Region::Jp), "master_jp.db");
        assert_eq!(snapshot_name(Region::Tw), "master_tw.db");
    }
}
