//! Error taxonomy and process exit codes

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::symlink::LinkOutcome;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for filesystem failures (not found, permission, conflict, I/O)
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for bad, missing or conflicting options
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code when the operation ran but selected no files
pub const EXIT_NO_RESULTS: i32 = 3;

pub type Result<T, E = ScranError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ScranError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{} exists and is not a symbolic link, refusing to overwrite", .path.display())]
    Conflict {
        path: PathBuf,
        /// Links that were updated before the conflict was hit
        completed: Vec<LinkOutcome>,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScranError {
    /// Classifies an I/O error by kind, attaching the path it happened on
    pub fn from_io(path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ScranError::NotFound(path),
            io::ErrorKind::PermissionDenied => ScranError::PermissionDenied(path),
            _ => ScranError::Io { path, source: err },
        }
    }

    /// Maps the error onto the documented process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            ScranError::Config(_) | ScranError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
            ScranError::NotFound(_)
            | ScranError::PermissionDenied(_)
            | ScranError::Conflict { .. }
            | ScranError::Io { .. } => EXIT_FAILURE,
        }
    }
}
