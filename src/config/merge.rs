//! CLI argument overrides applied on top of the loaded config

use crate::domain::{Affiliation, Config};
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Values given on the command line. `None` and empty lists leave the config untouched.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub cache_dir: Option<PathBuf>,
    pub force_refresh: bool,
    pub affiliations: Option<Vec<String>>,
    pub templates: Vec<PathBuf>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Result<Config> {
    if let Some(dir) = cli.cache_dir {
        config.cache_dir = dir;
    }
    if cli.force_refresh {
        config.force_refresh = true;
    }
    if let Some(raw) = cli.affiliations {
        let parsed = raw.iter().map(|s| s.parse()).collect::<Result<Vec<Affiliation>>>()?;
        if parsed.is_empty() {
            bail!("--affiliations needs at least one value");
        }
        config.affiliations = parsed;
    }
    if !cli.templates.is_empty() {
        config.templates = cli.templates;
    }
    Ok(config)
}
