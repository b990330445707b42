pub mod types;

use std::path::{Path, PathBuf};

use crate::error::{ListerError, Result};
use types::ListerConfig;

/// Load config from the XDG path, falling back to defaults.
pub fn load_config() -> Result<ListerConfig> {
    load_config_from(&config_path())
}

/// Load config from an explicit path. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<ListerConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ListerConfig::default());
        }
        Err(e) => {
            return Err(ListerError::Config(format!(
                "cannot read {}: {}",
                path.display(),
                e
            )));
        }
    };

    toml::from_str(&contents)
        .map_err(|e| ListerError::Config(format!("invalid {}: {}", path.display(), e)))
}

/// Return XDG config dir (~/.config/notebook-lister/)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("notebook-lister")
}

/// Return the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}
