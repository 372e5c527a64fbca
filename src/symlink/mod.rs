//! Rank-named symbolic links to the latest files
//!
//! A [`NameFormat`] turns a rank into a file name. [`SymlinkSpec`] resolves the
//! full set of links for a selection, and [`sync_symlinks`] applies it: creating
//! missing links, atomically repointing outdated ones, refusing to touch regular
//! files and pruning links for ranks that fell out of the selection.

pub mod format;
pub mod sync;

pub use format::NameFormat;
pub use sync::{sync_symlinks, LinkAction, LinkOutcome, PlannedLink, SymlinkSpec, SyncPreview, SyncReport};
