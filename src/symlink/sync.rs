//! Creates, refreshes and prunes rank-named symlinks

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::format::NameFormat;
use crate::core::{FileEntry, TEMP_LINK_PREFIX};
use crate::error::{Result, ScranError};

/// What happened to a single link during a sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// No link existed at the path
    Created,
    /// A link pointing elsewhere was swapped for a new one
    Replaced,
    /// The link already pointed at the right file
    Unchanged,
}

impl LinkAction {
    /// Returns the emoji symbol for this action
    pub fn symbol(&self) -> &str {
        match self {
            LinkAction::Created | LinkAction::Replaced => "🔗",
            LinkAction::Unchanged => "🟢",
        }
    }

    /// Returns the text representation of this action
    pub fn text(&self) -> &str {
        match self {
            LinkAction::Created => "created",
            LinkAction::Replaced => "updated",
            LinkAction::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub rank: usize,
    pub link_path: PathBuf,
    pub target: PathBuf,
    pub action: LinkAction,
}

/// Result of a completed sync
#[derive(Debug, Default)]
pub struct SyncReport {
    pub links: Vec<LinkOutcome>,
    /// Stale links removed after the new links were in place
    pub removed: Vec<PathBuf>,
}

/// What a sync would do, worked out without touching the link directory
#[derive(Debug, Default)]
pub struct SyncPreview {
    pub links: Vec<LinkOutcome>,
    /// First link path held by something other than a symlink; the sync stops there
    pub conflict: Option<PathBuf>,
    /// Links that would be pruned; empty when a conflict stops the sync first
    pub stale: Vec<PathBuf>,
}

/// One link to create: `link_path` will point at `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLink {
    pub rank: usize,
    pub link_path: PathBuf,
    pub target: PathBuf,
}

/// Every link a sync will create, resolved before the filesystem is touched
#[derive(Debug, Clone)]
pub struct SymlinkSpec {
    pub link_dir: PathBuf,
    pub format: NameFormat,
    pub links: Vec<PlannedLink>,
}

impl SymlinkSpec {
    /// Pairs each selected file with its rank and link path
    pub fn resolve(selection: &[FileEntry], link_dir: impl Into<PathBuf>, format: &NameFormat) -> Self {
        let link_dir = link_dir.into();
        let links = selection
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let rank = index + 1;
                PlannedLink {
                    rank,
                    link_path: link_dir.join(format.render(rank)),
                    target: entry.path.clone(),
                }
            })
            .collect();

        Self {
            link_dir,
            format: format.clone(),
            links,
        }
    }

    /// Reports what [`SymlinkSpec::apply`] would do, reading the filesystem only
    pub fn preview(&self) -> Result<SyncPreview> {
        let mut preview = SyncPreview::default();

        if !fs::metadata(&self.link_dir).is_ok_and(|m| m.is_dir()) {
            // Nothing exists yet, every link would be new
            preview.links = self
                .links
                .iter()
                .map(|planned| outcome(planned, LinkAction::Created))
                .collect();
            return Ok(preview);
        }

        for planned in &self.links {
            match planned_action(planned) {
                Ok(action) => preview.links.push(outcome(planned, action)),
                Err(ScranError::Conflict { path, .. }) => {
                    preview.conflict = Some(path);
                    return Ok(preview);
                }
                Err(e) => return Err(e),
            }
        }

        preview.stale = stale_links(&self.link_dir, &self.format, self.links.len())?;
        Ok(preview)
    }

    /// Brings the link directory in line with the planned links
    ///
    /// Links are processed in rank order. A non-link file at any link path aborts the
    /// run with [`ScranError::Conflict`], which carries the links already updated.
    /// Stale links are only pruned once every link succeeded.
    pub fn apply(&self) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        if !ensure_link_dir(&self.link_dir, !self.links.is_empty())? {
            return Ok(report);
        }

        for planned in &self.links {
            match update_link(planned) {
                Ok(action) => {
                    debug!(
                        rank = planned.rank,
                        link = %planned.link_path.display(),
                        target = %planned.target.display(),
                        action = action.text(),
                        "link synced"
                    );
                    report.links.push(outcome(planned, action));
                }
                Err(ScranError::Conflict { path, .. }) => {
                    return Err(ScranError::Conflict {
                        path,
                        completed: report.links,
                    });
                }
                Err(e) => {
                    for done in &report.links {
                        warn!(
                            rank = done.rank,
                            link = %done.link_path.display(),
                            action = done.action.text(),
                            "link updated before the sync failed"
                        );
                    }
                    return Err(e);
                }
            }
        }

        report.removed = remove_stale_links(&self.link_dir, &self.format, self.links.len())?;
        Ok(report)
    }
}

/// Points `{format}` links in `link_dir` at the selected files, rank 1 first
///
/// Fails with [`ScranError::InvalidArgument`] if `format` is not a valid name format.
pub fn sync_symlinks(
    selection: &[FileEntry],
    link_dir: impl AsRef<Path>,
    format: &str,
) -> Result<SyncReport> {
    let format = NameFormat::parse(format)?;
    SymlinkSpec::resolve(selection, link_dir.as_ref(), &format).apply()
}

/// Makes sure the link directory exists, creating one level if allowed
/// Returns false when the directory is missing and was not created
fn ensure_link_dir(link_dir: &Path, create: bool) -> Result<bool> {
    match fs::metadata(link_dir) {
        Ok(metadata) if metadata.is_dir() => Ok(true),
        Ok(_) => Err(ScranError::Io {
            path: link_dir.to_path_buf(),
            source: io::Error::other("link directory path exists but is not a directory"),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if !create {
                return Ok(false);
            }
            // Only the last component is created; a missing parent is an error
            fs::create_dir(link_dir).map_err(|e| match e.kind() {
                io::ErrorKind::PermissionDenied => ScranError::PermissionDenied(link_dir.to_path_buf()),
                _ => ScranError::Io {
                    path: link_dir.to_path_buf(),
                    source: e,
                },
            })?;
            debug!(link_dir = %link_dir.display(), "created link directory");
            Ok(true)
        }
        Err(e) => Err(ScranError::from_io(link_dir, e)),
    }
}

fn outcome(planned: &PlannedLink, action: LinkAction) -> LinkOutcome {
    LinkOutcome {
        rank: planned.rank,
        link_path: planned.link_path.clone(),
        target: planned.target.clone(),
        action,
    }
}

/// Decides what a link needs without changing it; a non-link at the path is a conflict
fn planned_action(planned: &PlannedLink) -> Result<LinkAction> {
    let link_path = &planned.link_path;

    let metadata = match fs::symlink_metadata(link_path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkAction::Created),
        Err(e) => return Err(ScranError::from_io(link_path, e)),
    };

    if !metadata.file_type().is_symlink() {
        return Err(ScranError::Conflict {
            path: link_path.clone(),
            completed: Vec::new(),
        });
    }

    let current = fs::read_link(link_path).map_err(|e| ScranError::from_io(link_path, e))?;
    if current == planned.target {
        Ok(LinkAction::Unchanged)
    } else {
        Ok(LinkAction::Replaced)
    }
}

fn update_link(planned: &PlannedLink) -> Result<LinkAction> {
    let action = planned_action(planned)?;
    match action {
        LinkAction::Created => create_symlink(&planned.target, &planned.link_path)
            .map_err(|e| ScranError::from_io(&planned.link_path, e))?,
        LinkAction::Replaced => replace_symlink(planned)?,
        LinkAction::Unchanged => {}
    }
    Ok(action)
}

/// Swaps an existing link by renaming a freshly made one over it
fn replace_symlink(planned: &PlannedLink) -> Result<()> {
    let link_dir = planned
        .link_path
        .parent()
        .ok_or_else(|| ScranError::InvalidArgument(format!("{} has no parent", planned.link_path.display())))?;
    let temp_path = link_dir.join(format!("{TEMP_LINK_PREFIX}{}", planned.rank));

    // Left over by a run that died between create and rename
    if fs::symlink_metadata(&temp_path).is_ok_and(|m| m.file_type().is_symlink()) {
        fs::remove_file(&temp_path).map_err(|e| ScranError::from_io(&temp_path, e))?;
    }

    create_symlink(&planned.target, &temp_path).map_err(|e| ScranError::from_io(&temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, &planned.link_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(ScranError::from_io(&planned.link_path, e));
    }

    Ok(())
}

/// Links named by `format` whose rank is not in `1..=keep`, sorted
///
/// Regular files that happen to match the format are not included.
fn stale_links(link_dir: &Path, format: &NameFormat, keep: usize) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();

    let read_dir = fs::read_dir(link_dir).map_err(|e| ScranError::from_io(link_dir, e))?;
    for entry in read_dir {
        let entry = entry.map_err(|e| ScranError::from_io(link_dir, e))?;
        let file_name = entry.file_name();
        let Some(rank) = file_name.to_str().and_then(|name| format.parse_rank(name)) else {
            continue;
        };
        if (1..=keep).contains(&rank) {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| ScranError::from_io(&path, e))?;
        if !file_type.is_symlink() {
            debug!(path = %path.display(), "matches link format but is not a symlink, keeping");
            continue;
        }
        stale.push(path);
    }

    stale.sort();
    Ok(stale)
}

/// Removes stale links, plus temporary links abandoned by an interrupted replace
///
/// Only the stale links are returned.
fn remove_stale_links(link_dir: &Path, format: &NameFormat, keep: usize) -> Result<Vec<PathBuf>> {
    let read_dir = fs::read_dir(link_dir).map_err(|e| ScranError::from_io(link_dir, e))?;
    for entry in read_dir {
        let entry = entry.map_err(|e| ScranError::from_io(link_dir, e))?;
        if !entry.file_name().to_string_lossy().starts_with(TEMP_LINK_PREFIX) {
            continue;
        }
        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_symlink()) {
            fs::remove_file(&path).map_err(|e| ScranError::from_io(&path, e))?;
            debug!(link = %path.display(), "removed leftover temporary link");
        }
    }

    let stale = stale_links(link_dir, format, keep)?;
    for path in &stale {
        fs::remove_file(path).map_err(|e| ScranError::from_io(path, e))?;
        debug!(link = %path.display(), "removed stale link");
    }
    Ok(stale)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
