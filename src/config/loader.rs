//! Config loading
//!
//! Layers, later wins: built-in defaults, the config file (TOML or YAML), variables
//! prefixed `README_STATS_` (nested keys split on `__`), then the bare `ACCESS_TOKEN`
//! and `USER_NAME` variables.

use crate::domain::Config;
use anyhow::{bail, Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "README_STATS_";
pub const TOKEN_VAR: &str = "ACCESS_TOKEN";
pub const USER_VAR: &str = "USER_NAME";

const CANDIDATES: [&str; 4] =
    ["readme-stats.toml", ".readme-stats.toml", "readme-stats.yml", "readme-stats.yaml"];

pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config = match config_path {
        Some(path) => {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            extract(Some(path))
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => match discover_config(root) {
            Some(path) => match extract(Some(&path)) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Loaded config file");
                    config
                }
                Err(e) => {
                    // Auto-discovered: warn and fall back to env and defaults
                    tracing::warn!(
                        "Failed to parse auto-discovered config {}: {}",
                        path.display(),
                        e
                    );
                    extract(None)?
                }
            },
            None => extract(None)?,
        },
    };

    validate(&config)?;
    Ok(config)
}

fn extract(file: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = file {
        figment = match extension(path).as_str() {
            "toml" => figment.merge(Toml::file(path)),
            "yaml" | "yml" => figment.merge(Yaml::file(path)),
            other => bail!("Unsupported config extension '.{}' for file {}", other, path.display()),
        };
    }
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Env::raw().only(&[TOKEN_VAR, USER_VAR]))
        .extract()
        .map_err(anyhow::Error::from)
}

fn extension(path: &Path) -> String {
    path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase()
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|name| root.join(name)).find(|path| path.is_file())
}

fn validate(config: &Config) -> Result<()> {
    if config.affiliations.is_empty() {
        bail!("At least one repository affiliation is required");
    }
    Ok(())
}

/// Token and login required for any GitHub call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user_name: String,
}

pub fn credentials(config: &Config) -> Result<Credentials> {
    let Some(token) = non_empty(config.access_token.as_deref()) else {
        bail!("{TOKEN_VAR} is not set. Export a GitHub personal access token or set access_token in the config file");
    };
    Ok(Credentials { token: token.to_string(), user_name: require_user_name(config)?.to_string() })
}

pub fn require_user_name(config: &Config) -> Result<&str> {
    match non_empty(config.user_name.as_deref()) {
        Some(user) => Ok(user),
        None => bail!(
            "{USER_VAR} is not set. Export your GitHub login or set user_name in the config file"
        ),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
