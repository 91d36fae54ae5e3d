//! Configuration command handlers

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
pub fn handle(
    output_dir: Option<PathBuf>,
    database_dir: Option<PathBuf>,
    regions: Option<Vec<String>>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    let mut changed = false;
    if let Some(dir) = output_dir {
        config.output_dir = Some(dir);
        changed = true;
    }
    if let Some(dir) = database_dir {
        config.database_dir = Some(dir);
        changed = true;
    }
    if let Some(tags) = regions {
        // Validate before persisting
        let parsed = Config {
            regions: tags.clone(),
            ..Config::default()
        };
        parsed.secondary_regions()?;
        config.regions = tags;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved.");
        if let Ok(path) = Config::config_path() {
            println!("Config file: {}", path.display());
        }
    } else {
        show_usage();
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Output dir:   {}", config.output_dir().display());
    println!("Database dir: {}", config.database_dir().display());
    println!("Regions:      {}", config.regions.join(", "));

    if let Ok(path) = Config::config_path() {
        println!("Config file:  {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: redive configure --output-dir DIR");
    println!("   or: redive configure --regions CN,EN,KR,TW");
    println!("   or: redive configure --show");
}
