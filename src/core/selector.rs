//! Latest-N file selection

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

use crate::error::{Result, ScranError};

/// A regular file and its last modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Files ordered from most to least recently modified. Index 0 is rank 1.
pub type Selection = Vec<FileEntry>;

/// Returns the `n` most recently modified regular files directly inside `directory`
///
/// Symbolic links are never candidates, even when they point at regular files, so a
/// link directory that coincides with the source directory cannot select its own links.
/// Files with identical modification times are ordered by ascending file name.
pub fn select_latest(directory: impl AsRef<Path>, n: usize) -> Result<Selection> {
    let directory = directory.as_ref();
    let directory =
        std::path::absolute(directory).map_err(|e| ScranError::from_io(directory, e))?;

    let read_dir = fs::read_dir(&directory).map_err(|e| ScranError::from_io(&directory, e))?;

    let mut files = Vec::new();
    let mut skipped = 0usize;
    for entry in read_dir {
        let entry = entry.map_err(|e| ScranError::from_io(&directory, e))?;
        let path = entry.path();

        // DirEntry::metadata does not traverse symlinks
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "file disappeared while scanning, skipping");
                continue;
            }
            Err(e) => return Err(ScranError::from_io(&path, e)),
        };

        if !metadata.is_file() {
            skipped += 1;
            continue;
        }

        let modified = metadata
            .modified()
            .map_err(|e| ScranError::from_io(&path, e))?;
        files.push(FileEntry { path, modified });
    }

    debug!(
        directory = %directory.display(),
        files = files.len(),
        skipped,
        requested = n,
        "scanned directory"
    );

    files.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
    });
    files.truncate(n);

    Ok(files)
}
