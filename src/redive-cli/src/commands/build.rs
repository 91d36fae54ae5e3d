//! Catalog normalization from local snapshots and JSON output.

use crate::config::Config;
use crate::fetch;
use anyhow::{bail, Context, Result};
use redive::store::{RecordStore, SqliteStore};
use redive::{build_catalog, missing_assets, AssetRequest, Catalog, Region};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Handle `redive build`
pub fn handle(database_dir: &Path, output: &Path, readable: bool) -> Result<()> {
    let config = Config::load()?;
    let regions = config.secondary_regions()?;

    let catalog = normalize_snapshots(database_dir, &regions)?;
    write_catalog(&catalog, output, readable)?;
    report_missing(&missing_assets(&catalog, &output.join("images")));
    Ok(())
}

/// Open every region's snapshot and run the normalization pass.
///
/// All configured snapshots must be present; merging a partial region set
/// would leave overlay data inconsistent between runs.
pub fn normalize_snapshots(database_dir: &Path, secondaries: &[Region]) -> Result<Catalog> {
    let primary_path = database_dir.join(fetch::snapshot_name(Region::PRIMARY));
    if !primary_path.exists() {
        bail!("Missing primary snapshot: {}", primary_path.display());
    }
    let primary = SqliteStore::open(&primary_path)
        .with_context(|| format!("Failed to open {}", primary_path.display()))?;

    let mut stores = Vec::new();
    for region in secondaries {
        let path = database_dir.join(fetch::snapshot_name(*region));
        if !path.exists() {
            bail!("Missing {} snapshot: {}", region, path.display());
        }
        let store = SqliteStore::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        stores.push((*region, store));
    }

    let overlays: Vec<(Region, &dyn RecordStore)> = stores
        .iter()
        .map(|(region, store)| (*region, store as &dyn RecordStore))
        .collect();

    let catalog = build_catalog(&primary, &overlays)?;
    println!(
        "normalized {} equipment, {} characters, {} quests",
        catalog.equipment.len(),
        catalog.character.len(),
        catalog.quest.len()
    );
    Ok(catalog)
}

/// Write the three catalog files into the output directory
pub fn write_catalog(catalog: &Catalog, output_dir: &Path, readable: bool) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    write_json(&output_dir.join("equipment_data.json"), &catalog.equipment, readable)?;
    write_json(&output_dir.join("character_data.json"), &catalog.character, readable)?;
    write_json(&output_dir.join("quest_data.json"), &catalog.quest, readable)?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T, readable: bool) -> Result<()> {
    let json = if readable {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize catalog")?;

    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

/// Print the asset requests the image pipeline still has to resolve
pub fn report_missing(requests: &[AssetRequest]) {
    if requests.is_empty() {
        println!("No missing images.");
        return;
    }
    println!("{} missing images:", requests.len());
    for request in requests {
        println!("  {}", request.bundle_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_requires_primary_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let result = normalize_snapshots(dir.path(), &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_catalog_produces_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::default();

        write_catalog(&catalog, dir.path(), false).unwrap();
        for file in ["equipment_data.json", "character_data.json", "quest_data.json"] {
            assert!(dir.path().join(file).exists());
        }
    }

    #[test]
    fn test_readable_output_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::default();
        catalog.quest.insert(
            "3-1".to_string(),
            redive::QuestEntry {
                key: "3-1".to_string(),
                name: "3-1 街道".to_string(),
                stamina: 10,
                memory_piece: redive::ItemDrop::none(),
                drops: vec![],
                subdrops: vec![],
            },
        );

        write_catalog(&catalog, dir.path(), true).unwrap();
        let contents = fs::read_to_string(dir.path().join("quest_data.json")).unwrap();
        assert!(contents.contains('\n'));
    }
}
