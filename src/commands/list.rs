//! Prints the latest files, one path per line

use anyhow::Result;
use chrono::{DateTime, Local};
use std::io::Write;
use std::time::SystemTime;
use tracing::info;

use super::CommandOutcome;
use crate::core::{select_latest, NO_FILES_MESSAGE, TIMESTAMP_FORMAT};
use crate::settings::RunConfig;

/// Formats a modification time in local time for `--long` output
pub fn format_modified(modified: SystemTime) -> String {
    DateTime::<Local>::from(modified)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn handle_list_command(config: &RunConfig, out: &mut impl Write) -> Result<CommandOutcome> {
    let selection = select_latest(&config.directory, config.count)?;

    if selection.is_empty() {
        info!(directory = %config.directory.display(), "{NO_FILES_MESSAGE}");
        return Ok(CommandOutcome::NoResults);
    }

    for entry in &selection {
        if config.long {
            writeln!(out, "{}  {}", format_modified(entry.modified), entry.path.display())?;
        } else {
            writeln!(out, "{}", entry.path.display())?;
        }
    }

    Ok(CommandOutcome::Success)
}
