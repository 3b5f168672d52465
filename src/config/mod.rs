//! Configuration loading and merging
//!
//! Precedence: CLI > Env > File > Defaults.

pub mod loader;
pub mod merge;

pub use loader::{credentials, load_config, require_user_name, Credentials};
pub use merge::{merge_cli_with_config, CliOverrides};
