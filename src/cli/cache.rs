//! Cache command implementation
//!
//! Inspects (or clears) the per-user LOC cache file without touching the network.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{load_config, merge_cli_with_config, require_user_name, CliOverrides};
use crate::loc::CacheFile;
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct CacheArgs {
    /// Config file (TOML or YAML). Defaults to readme-stats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the per-user LOC cache file
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Delete the cache file so the next run walks every repository
    #[arg(long)]
    pub clear: bool,
}

pub fn run(args: CacheArgs) -> Result<()> {
    let root = std::env::current_dir()?;
    let config = load_config(&root, args.config.as_deref())?;
    let config = merge_cli_with_config(
        config,
        CliOverrides { cache_dir: args.cache_dir, ..Default::default() },
    )?;
    let user = require_user_name(&config)?;
    let path = CacheFile::path_for(&config.cache_dir, user);

    if args.clear {
        return clear(&path);
    }

    println!("Cache file: {}", path.display());
    if !path.exists() {
        println!("  {}", style("not created yet").dim());
        return Ok(());
    }

    let file = CacheFile::load(&path, config.comment_size)?;
    let totals = file.totals();
    println!("  Repositories: {}", file.rows().len());
    println!("  Commits: {}", format_with_commas(totals.commits));
    println!(
        "  Lines of code: {} ({} added, {} deleted)",
        format_with_commas(totals.net()),
        format_with_commas(totals.added),
        format_with_commas(totals.deleted)
    );
    Ok(())
}

fn clear(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed removing cache file: {}", path.display()))?;
        println!("Removed {}", path.display());
    } else {
        println!("Nothing to clear at {}", path.display());
    }
    Ok(())
}
