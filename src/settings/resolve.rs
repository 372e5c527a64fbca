//! Builds the single run configuration from defaults, the config file and flags

use std::path::PathBuf;
use tracing::debug;

use super::{default_config_path, Settings};
use crate::error::{Result, ScranError};
use crate::symlink::NameFormat;
use crate::utils::expand_path;

/// The one thing an invocation does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Action {
    /// Print the selected paths
    #[default]
    List,
    /// Persist the merged configuration without selecting anything
    SaveConfig,
    /// Select, then point the rank links at the selection
    UpdateSymlinks,
}

impl Action {
    /// Picks the action from the command line flags; both at once is an error
    pub fn from_flags(save_config: bool, update_symlinks: bool) -> Result<Self> {
        match (save_config, update_symlinks) {
            (true, true) => Err(ScranError::Config(
                "--save-config and --update-symlinks cannot be used together".to_string(),
            )),
            (true, false) => Ok(Action::SaveConfig),
            (false, true) => Ok(Action::UpdateSymlinks),
            (false, false) => Ok(Action::List),
        }
    }
}

/// Values given on the command line, which win over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub directory: Option<String>,
    pub count: Option<usize>,
    pub symlink_dir: Option<String>,
    pub format: Option<String>,
}

impl Overrides {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(directory) = self.directory {
            settings.general.directory = directory;
        }
        if let Some(count) = self.count {
            settings.general.count = count;
        }
        if let Some(symlink_dir) = self.symlink_dir {
            settings.symlinks.directory = Some(symlink_dir);
        }
        if let Some(format) = self.format {
            settings.symlinks.format = format;
        }
    }
}

/// Everything the command line contributes to configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigRequest {
    /// Explicit `--config` path; the platform default is used when absent
    pub config_path: Option<PathBuf>,
    pub overrides: Overrides,
    pub save_config: bool,
    pub update_symlinks: bool,
    pub long: bool,
    pub dry_run: bool,
}

/// Fully validated configuration for one invocation
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub action: Action,
    pub directory: PathBuf,
    pub count: usize,
    pub link_dir: PathBuf,
    pub format: NameFormat,
    pub config_path: Option<PathBuf>,
    /// Merged settings with paths as written, for saving
    pub settings: Settings,
    pub long: bool,
    pub dry_run: bool,
}

/// Resolves defaults, config file and flags into a [`RunConfig`]
///
/// Nothing is written to disk here, so every configuration error surfaces before
/// any side effect.
pub fn resolve(request: ConfigRequest) -> Result<RunConfig> {
    let action = Action::from_flags(request.save_config, request.update_symlinks)?;

    let explicit = request.config_path.is_some();
    let config_path = request.config_path.or_else(default_config_path);

    let mut settings = match &config_path {
        Some(path) => match Settings::load(path)? {
            Some(settings) => settings,
            None if explicit && action != Action::SaveConfig => {
                return Err(ScranError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            None => Settings::default(),
        },
        None => Settings::default(),
    };

    if action == Action::SaveConfig && config_path.is_none() {
        return Err(ScranError::Config(
            "could not determine a config directory, pass --config".to_string(),
        ));
    }

    request.overrides.apply(&mut settings);

    let format = NameFormat::parse(&settings.symlinks.format)?;
    let directory = expand_path(&settings.general.directory)?;
    let link_dir = match &settings.symlinks.directory {
        Some(dir) => expand_path(dir)?,
        None => directory.clone(),
    };

    let config = RunConfig {
        action,
        directory,
        count: settings.general.count,
        link_dir,
        format,
        config_path,
        settings,
        long: request.long,
        dry_run: request.dry_run,
    };
    debug!(?config, "resolved configuration");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn request_with(config_path: PathBuf) -> ConfigRequest {
        ConfigRequest {
            config_path: Some(config_path),
            ..Default::default()
        }
    }

    #[test]
    fn test_action_from_flags() {
        assert_eq!(Action::from_flags(false, false).unwrap(), Action::List);
        assert_eq!(Action::from_flags(true, false).unwrap(), Action::SaveConfig);
        assert_eq!(Action::from_flags(false, true).unwrap(), Action::UpdateSymlinks);
        assert!(matches!(
            Action::from_flags(true, true),
            Err(ScranError::Config(_))
        ));
    }

    #[test]
    fn test_flags_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[general]\ndirectory = \"/from/file\"\ncount = 9\n\n[symlinks]\nformat = \"f-{rank}\"\n",
        )
        .unwrap();

        let mut request = request_with(path);
        request.overrides.count = Some(2);
        let config = resolve(request).unwrap();

        assert_eq!(config.directory, PathBuf::from("/from/file"));
        assert_eq!(config.count, 2);
        assert_eq!(config.format.to_string(), "f-{rank}");
        assert_eq!(config.link_dir, PathBuf::from("/from/file"));
    }

    #[test]
    fn test_symlink_dir_defaults_to_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut request = request_with(temp_dir.path().join("config.toml"));
        request.save_config = true;
        request.overrides.directory = Some("/shots".to_string());

        let config = resolve(request).unwrap();
        assert_eq!(config.link_dir, PathBuf::from("/shots"));

        let mut request = request_with(temp_dir.path().join("config.toml"));
        request.save_config = true;
        request.overrides.directory = Some("/shots".to_string());
        request.overrides.symlink_dir = Some("/links".to_string());
        assert_eq!(resolve(request).unwrap().link_dir, PathBuf::from("/links"));
    }

    #[test]
    fn test_missing_explicit_config_is_error_except_for_save() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let mut request = request_with(path.clone());
        request.overrides.directory = Some("/shots".to_string());
        assert!(matches!(resolve(request), Err(ScranError::Config(_))));

        let mut request = request_with(path);
        request.overrides.directory = Some("/shots".to_string());
        request.save_config = true;
        assert_eq!(resolve(request).unwrap().action, Action::SaveConfig);
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut request = request_with(temp_dir.path().join("config.toml"));
        request.save_config = true;
        request.overrides.directory = Some("/shots".to_string());
        request.overrides.format = Some("no-token".to_string());

        assert!(matches!(resolve(request), Err(ScranError::InvalidArgument(_))));
    }

    #[test]
    fn test_conflicting_actions_fail_before_reading_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "not = [valid").unwrap();

        let mut request = request_with(path);
        request.save_config = true;
        request.update_symlinks = true;
        let err = resolve(request).unwrap_err();
        assert!(err.to_string().contains("cannot be used together"));
    }

    #[test]
    fn test_settings_keep_unexpanded_paths() {
        let Ok(home) = std::env::var("HOME") else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let mut request = request_with(temp_dir.path().join("config.toml"));
        request.save_config = true;
        request.overrides.directory = Some("$HOME/shots".to_string());

        let config = resolve(request).unwrap();
        assert_eq!(config.directory, PathBuf::from(home).join("shots"));
        assert_eq!(config.settings.general.directory, "$HOME/shots");
    }
}
