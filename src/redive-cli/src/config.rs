//! Configuration management for the redive CLI

use anyhow::{Context, Result};
use redive::Region;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    pub database_dir: Option<PathBuf>,
    /// Secondary regions merged on top of the primary snapshot
    pub regions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            database_dir: None,
            regions: Region::SECONDARY.iter().map(Region::to_string).collect(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("redive");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Catalog output directory, `public` by default
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("public"))
    }

    /// Snapshot download directory, `database` by default
    pub fn database_dir(&self) -> PathBuf {
        self.database_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("database"))
    }

    /// Parsed secondary regions, in merge order
    pub fn secondary_regions(&self) -> Result<Vec<Region>> {
        self.regions
            .iter()
            .map(|tag| {
                tag.parse::<Region>()
                    .with_context(|| format!("Invalid region in config: {tag}"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_regions_parse() {
        let config = Config::default();
        let regions = config.secondary_regions().unwrap();
        assert_eq!(regions, Region::SECONDARY.to_vec());
    }

    #[test]
    fn test_invalid_region_rejected() {
        let config = Config {
            regions: vec!["XX".to_string()],
            ..Config::default()
        };
        assert!(config.secondary_regions().is_err());
    }

    #[test]
    fn test_config_path_exists() {
        assert!(Config::config_path().is_ok());
    }
}
