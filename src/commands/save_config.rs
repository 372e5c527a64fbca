//! Persists the merged configuration

use anyhow::{Context, Result};
use std::io::Write;

use super::CommandOutcome;
use crate::settings::RunConfig;

pub fn handle_save_config_command(config: &RunConfig, out: &mut impl Write) -> Result<CommandOutcome> {
    let path = config
        .config_path
        .as_deref()
        .context("no config file location available")?;

    config.settings.save(path)?;
    writeln!(out, "✅ Saved configuration to {}", path.display())?;

    Ok(CommandOutcome::Success)
}
