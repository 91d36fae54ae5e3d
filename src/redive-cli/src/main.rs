mod cli;
mod commands;
mod config;
mod fetch;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Update { force, readable } => {
            commands::update::handle(force, readable)?;
        }

        Commands::Build {
            database_dir,
            output,
            readable,
        } => {
            commands::build::handle(&database_dir, &output, readable)?;
        }

        Commands::Decode { id } => {
            commands::decode::handle(&id)?;
        }

        Commands::Configure {
            output_dir,
            database_dir,
            regions,
            show,
        } => {
            commands::configure::handle(output_dir, database_dir, regions, show)?;
        }
    }

    Ok(())
}
