//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use shotflash_core::{AnimationConfig, BackendDescriptor, Counts};

/// Name of the configuration file inside the state directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Load counts from a JSON file.
pub fn load_counts(path: &Path) -> Result<Counts> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Counts::from_json_file(path)
        .with_context(|| format!("Failed to read counts from {}", path.display()))
}

/// Load a backend descriptor from a JSON file.
pub fn load_backend(path: &Path) -> Result<BackendDescriptor> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    BackendDescriptor::from_json_file(path)
        .with_context(|| format!("Failed to read backend descriptor from {}", path.display()))
}

/// Return the default shotflash state directory (~/.shotflash/).
pub fn default_state_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.join(".shotflash"))
}

/// Load the animation configuration.
///
/// An explicit file must exist. Without one, `~/.shotflash/config.yaml` is
/// used when present, and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<AnimationConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => match default_state_dir() {
            Ok(dir) if dir.join(CONFIG_FILE).is_file() => dir.join(CONFIG_FILE),
            _ => {
                debug!("no config file, using defaults");
                return Ok(AnimationConfig::default());
            }
        },
    };

    debug!(config = %path.display(), "loading config");
    AnimationConfig::from_yaml_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}
