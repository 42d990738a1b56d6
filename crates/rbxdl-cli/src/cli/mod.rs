//! CLI for rbxdl, the Roblox asset downloader.

mod commands;
mod terminal;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rbxdl_core::config;
use std::path::{Path, PathBuf};

use commands::{run_categories, run_checksum, run_count, run_get, run_id, GetOptions};

/// Top-level CLI for rbxdl.
#[derive(Debug, Parser)]
#[command(name = "rbxdl")]
#[command(about = "rbxdl: download Roblox assets by URL or ID", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download one asset and save it to disk.
    Get {
        /// Asset page URL (e.g. https://www.roblox.com/library/123/Name) or a bare numeric ID.
        reference: String,

        /// Asset type: sound, decal, plugin, accessory, clothing, mesh, model.
        /// Falls back to `default_category` from the config file.
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        category: Option<String>,

        /// Directory to save into (default: config `download_dir`, else the current directory).
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Fetch from the asset host directly instead of through the relay.
        #[arg(long)]
        direct: bool,

        /// Try to name the file after the display name on the asset page.
        #[arg(long)]
        scrape_names: bool,
    },

    /// Print the asset ID found in a URL (no network access).
    Id {
        /// Asset page URL or bare numeric ID.
        reference: String,
    },

    /// Show the total download count reported by the relay.
    Count {
        /// Keep polling at `stats.refresh_interval_secs` until interrupted.
        #[arg(long)]
        watch: bool,
    },

    /// Compute SHA-256 of a file (e.g. after download).
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// List asset types with the suffix and fetch route of each.
    Categories,

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            clap_complete::generate(shell, &mut Cli::command(), "rbxdl", &mut std::io::stdout());
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                reference,
                category,
                output,
                direct,
                scrape_names,
            } => run_get(
                &cfg,
                GetOptions {
                    reference,
                    category,
                    output,
                    direct,
                    scrape_names,
                },
            )?,
            CliCommand::Id { reference } => run_id(&cfg, &reference)?,
            CliCommand::Count { watch } => run_count(&cfg, watch)?,
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
            CliCommand::Categories => run_categories(),
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
