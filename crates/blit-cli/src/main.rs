//! Blit
//!
//! Query and maintain documentation search data, and evaluate raster
//! operations.
//!
//! # Usage
//!
//! ```bash
//! blit search <QUERY> [--index PATH] [--substring] [--limit N] [--json]
//! blit validate [--index PATH] [--json]
//! blit fmt [--index PATH] [--check | --json]
//! blit show <KEY> [--index PATH] [--json]
//! blit rop <NAME> [-s BYTE] [-d BYTE] | blit rop --table
//! blit pattern [--width W] [--height H]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/blit/config.toml)
//! 3. `--config` file
//! 4. Environment variables (BLIT_*)
//! 5. CLI flags

use std::io;

use anyhow::Result;
use clap::Parser;

use blit_cli::{
    handle_fmt, handle_pattern, handle_rop, handle_search, handle_show, handle_validate,
    init_logging, load_settings, Cli, Commands,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings.log_level)?;

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Search {
            query,
            index,
            substring,
            limit,
            json,
        } => {
            handle_search(&settings, &query, index.as_deref(), substring, limit, json, &mut out)?;
        }
        Commands::Validate { index, json } => {
            handle_validate(&settings, index.as_deref(), json, &mut out)?;
        }
        Commands::Fmt { index, check, json } => {
            handle_fmt(&settings, index.as_deref(), check, json, &mut out)?;
        }
        Commands::Show { key, index, json } => {
            handle_show(&settings, &key, index.as_deref(), json, &mut out)?;
        }
        Commands::Rop {
            name,
            source,
            destination,
            table,
        } => {
            handle_rop(name.as_deref(), source, destination, table, &mut out)?;
        }
        Commands::Pattern { width, height } => {
            handle_pattern(width, height, &mut out)?;
        }
    }

    Ok(())
}
