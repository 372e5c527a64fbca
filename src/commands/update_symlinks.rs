//! Points the rank links at the latest files

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use super::CommandOutcome;
use crate::core::{select_latest, NO_FILES_MESSAGE, PATH_DISPLAY_WIDTH};
use crate::error::ScranError;
use crate::settings::RunConfig;
use crate::symlink::{LinkAction, LinkOutcome, SymlinkSpec, SyncReport};
use crate::utils::shorten_path;

fn link_name(link_path: &Path) -> String {
    link_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| link_path.display().to_string())
}

fn write_outcome(out: &mut impl Write, outcome: &LinkOutcome, width: usize) -> std::io::Result<()> {
    writeln!(
        out,
        "{} {:width$}  {:<10} {}",
        outcome.action.symbol(),
        link_name(&outcome.link_path),
        outcome.action.text(),
        shorten_path(&outcome.target, PATH_DISPLAY_WIDTH),
    )
}

/// Generates the one-line summary of a sync
fn generate_summary(report: &SyncReport) -> String {
    let count = |action: LinkAction| report.links.iter().filter(|l| l.action == action).count();

    let mut parts = vec![format!("✅ {} links", report.links.len())];
    for (action, n) in [
        (LinkAction::Created, count(LinkAction::Created)),
        (LinkAction::Replaced, count(LinkAction::Replaced)),
        (LinkAction::Unchanged, count(LinkAction::Unchanged)),
    ] {
        if n > 0 {
            parts.push(format!("{n} {}", action.text()));
        }
    }
    if !report.removed.is_empty() {
        parts.push(format!("{} removed", report.removed.len()));
    }

    parts.join(" • ")
}

pub fn handle_update_symlinks_command(config: &RunConfig, out: &mut impl Write) -> Result<CommandOutcome> {
    let selection = select_latest(&config.directory, config.count)?;
    let spec = SymlinkSpec::resolve(&selection, &config.link_dir, &config.format);
    let width = spec
        .links
        .iter()
        .map(|l| link_name(&l.link_path).len())
        .max()
        .unwrap_or(0);

    if config.dry_run {
        let preview = spec.preview()?;
        for planned in &preview.links {
            writeln!(
                out,
                "{} {:width$}  would be {:<10} → {}",
                planned.action.symbol(),
                link_name(&planned.link_path),
                planned.action.text(),
                planned.target.display(),
            )?;
        }
        if let Some(path) = &preview.conflict {
            writeln!(out, "⚠️  {} is not a symlink, the update would stop here", path.display())?;
        }
        for stale in &preview.stale {
            writeln!(out, "🗑️  {:width$}  would be removed", link_name(stale))?;
        }
        if selection.is_empty() {
            writeln!(out, "{NO_FILES_MESSAGE}")?;
            return Ok(CommandOutcome::NoResults);
        }
        return Ok(CommandOutcome::Success);
    }

    let report = match spec.apply() {
        Ok(report) => report,
        Err(ScranError::Conflict { path, completed }) => {
            for outcome in &completed {
                write_outcome(out, outcome, width)?;
            }
            if !completed.is_empty() {
                writeln!(out, "⚠️  {} links updated before stopping", completed.len())?;
            }
            return Err(ScranError::Conflict { path, completed }.into());
        }
        Err(e) => return Err(e.into()),
    };

    for outcome in &report.links {
        write_outcome(out, outcome, width)?;
    }
    for removed in &report.removed {
        writeln!(out, "🗑️  {:width$}  removed", link_name(removed))?;
    }

    if selection.is_empty() {
        writeln!(out, "{NO_FILES_MESSAGE}")?;
        return Ok(CommandOutcome::NoResults);
    }

    writeln!(out, "{}", generate_summary(&report))?;
    Ok(CommandOutcome::Success)
}
