//! CLI argument definitions for redive
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redive")]
#[command(about = "Princess Connect Re:Dive catalog updater", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the latest snapshots and rebuild the catalog
    #[command(visible_alias = "u")]
    Update {
        /// Rebuild even when the persisted version marker is current
        #[arg(long)]
        force: bool,

        /// Pretty-print the catalog JSON output
        #[arg(long)]
        readable: bool,
    },

    /// Rebuild the catalog from already-downloaded snapshots
    #[command(visible_alias = "b")]
    Build {
        /// Directory containing master_<region>.db snapshots
        #[arg(long, default_value = "database")]
        database_dir: PathBuf,

        /// Output directory for catalog JSON
        #[arg(long, default_value = "public")]
        output: PathBuf,

        /// Pretty-print the catalog JSON output
        #[arg(long)]
        readable: bool,
    },

    /// Decode a composite equipment or quest id
    Decode {
        /// Equipment id (6 digits) or quest id (8 digits)
        id: String,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the catalog output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set the snapshot download directory
        #[arg(long)]
        database_dir: Option<PathBuf>,

        /// Set the secondary regions to merge (e.g. "CN,EN,KR,TW")
        #[arg(long, value_delimiter = ',')]
        regions: Option<Vec<String>>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
