//! # scranagement
//!
//! `scranagement` finds the most recently modified files in a directory (a
//! screenshots folder, typically) and keeps a set of rank-named symbolic links
//! pointing at them. It powers the `scranagement` CLI tool.
//!
//! ## Core Features
//!
//! - **Selection**: the N newest regular files, newest first, with a stable tie-break.
//! - **Symlink sync**: `latest-1`, `latest-2`, ... repointed atomically, stale ranks pruned,
//!   regular files never overwritten.
//! - **Config file**: typed TOML settings, overridden by command line flags.
//!
//! ## Example
//!
//! ```rust,no_run
//! use scranagement::core::select_latest;
//! use scranagement::symlink::sync_symlinks;
//!
//! fn main() -> Result<(), scranagement::ScranError> {
//!     let selection = select_latest("/home/me/screenshots", 3)?;
//!     for entry in &selection {
//!         println!("{}", entry.path.display());
//!     }
//!     sync_symlinks(&selection, "/home/me/Desktop", "latest-{rank}")?;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod error;
pub mod settings;
pub mod symlink;
pub mod utils;

pub use error::{Result, ScranError};
