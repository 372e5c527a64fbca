//! Command handlers, one per action
//!
//! Handlers write user-facing output to the given writer and return how the run
//! went. Exit codes are decided by the caller.

pub mod list;
pub mod save_config;
pub mod update_symlinks;

use anyhow::Result;
use std::io::Write;

use crate::settings::{Action, RunConfig};

/// How a command finished when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// The command ran but the selection was empty
    NoResults,
}

/// Runs the handler for the configured action
pub fn dispatch(config: &RunConfig, out: &mut impl Write) -> Result<CommandOutcome> {
    match config.action {
        Action::List => list::handle_list_command(config, out),
        Action::SaveConfig => save_config::handle_save_config_command(config, out),
        Action::UpdateSymlinks => update_symlinks::handle_update_symlinks_command(config, out),
    }
}
