//! Configuration file discovery and loading.
//!
//! The discovery order is:
//! 1. The `--config` flag.
//! 2. `PARLEY_CONFIG` environment variable.
//! 3. `~/.parley/config.json`
//! 4. If none found, built-in defaults.
//!
//! A path given explicitly (flag or environment) that does not exist
//! falls back to defaults with a warning. A file that exists but does not
//! parse or validate is an error.

use std::path::{Path, PathBuf};

use anyhow::Context;
use parley_types::Config;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PARLEY_CONFIG";

/// Discover the config file path using the fallback chain.
///
/// Returns `None` if nothing was given explicitly and no file exists in
/// the home directory.
pub fn discover_config_path(
    explicit: Option<&str>,
    env_path: Option<String>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let home_path = home_dir?.join(".parley").join("config.json");
    home_path.exists().then_some(home_path)
}

/// Load configuration using the discovery algorithm.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<Config> {
    let path = discover_config_path(explicit, std::env::var(CONFIG_ENV).ok(), dirs::home_dir());

    let Some(path) = path else {
        tracing::info!("no config file found, using defaults");
        return Ok(Config::default());
    };

    load_config_from(&path)
}

/// Load configuration from a specific file.
pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "config path does not exist, using defaults"
        );
        return Ok(Config::default());
    }

    tracing::debug!(path = %path.display(), "loading config file");
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let config = Config::from_json(&contents)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        scripts = config.commands.scripts.len(),
        disabled = config.commands.disabled.len(),
        "config loaded"
    );
    Ok(config)
}
