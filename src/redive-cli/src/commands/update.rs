//! Full update pipeline: version check, snapshot downloads, normalization,
//! catalog output, and the missing-asset report.

use super::build;
use crate::config::Config;
use crate::fetch;
use anyhow::{Context, Result};
use redive::{missing_assets, version, Region};
use std::fs;

/// Handle `redive update`
pub fn handle(force: bool, readable: bool) -> Result<()> {
    let config = Config::load()?;
    let output_dir = config.output_dir();
    let database_dir = config.database_dir();
    let regions = config.secondary_regions()?;

    let latest = fetch::latest_version()?;
    let persisted = version::current(&output_dir).context("Failed to read version marker")?;
    if !force && version::is_current(persisted.as_deref(), &latest) {
        println!("No updates available.");
        return Ok(());
    }
    println!("Updates available; downloading {} snapshots...", regions.len() + 1);

    fs::create_dir_all(&database_dir)
        .with_context(|| format!("Failed to create {}", database_dir.display()))?;

    // Every region must download before normalization starts; a partial set
    // would corrupt the merge passes.
    fetch::download_snapshot(
        Region::PRIMARY,
        &database_dir.join(fetch::snapshot_name(Region::PRIMARY)),
    )?;
    for region in &regions {
        fetch::download_snapshot(*region, &database_dir.join(fetch::snapshot_name(*region)))?;
    }

    let catalog = build::normalize_snapshots(&database_dir, &regions)?;
    build::write_catalog(&catalog, &output_dir, readable)?;
    build::report_missing(&missing_assets(&catalog, &output_dir.join("images")));

    // Persisted only now, so a failed run retries from scratch
    version::persist(&output_dir, &latest).context("Failed to persist version marker")?;
    println!("Update complete.");
    Ok(())
}
