//! Persisted configuration
//!
//! The config file is TOML with two groups:
//!
//! ```toml
//! [general]
//! directory = "$HOME/screenshots"
//! count = 3
//!
//! [symlinks]
//! directory = "/home/me/Desktop"
//! format = "latest-{rank}"
//! ```
//!
//! Paths are stored exactly as written so variables like `$HOME` survive a save.
//! Expansion happens when a [`RunConfig`] is resolved.

pub mod resolve;

pub use resolve::{resolve, Action, ConfigRequest, Overrides, RunConfig};

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_COUNT, DEFAULT_DIRECTORY, DEFAULT_LINK_FORMAT};
use crate::error::{Result, ScranError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub general: GeneralSettings,
    pub symlinks: SymlinkSettings,
}

/// Where to look and how many files to pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralSettings {
    pub directory: String,
    pub count: usize,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            count: DEFAULT_COUNT,
        }
    }
}

/// Where links go and how they are named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymlinkSettings {
    /// Defaults to the general directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    pub format: String,
}

impl Default for SymlinkSettings {
    fn default() -> Self {
        Self {
            directory: None,
            format: DEFAULT_LINK_FORMAT.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, returning `None` if the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ScranError::from_io(path, e)),
        };

        let settings: Settings = toml::from_str(&content)
            .map_err(|e| ScranError::Config(format!("invalid config file {}: {e}", path.display())))?;

        debug!(path = %path.display(), ?settings, "loaded config file");
        Ok(Some(settings))
    }

    /// Writes settings to `path`, creating its parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ScranError::from_io(parent, e))?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ScranError::Io {
            path: path.to_path_buf(),
            source: io::Error::other(e),
        })?;

        fs::write(path, content).map_err(|e| ScranError::from_io(path, e))?;
        debug!(path = %path.display(), "saved config file");
        Ok(())
    }
}

/// Default config file location, e.g. `~/.config/scranagement/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
