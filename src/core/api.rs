//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Latest-file selection
//! - Built-in defaults and naming constants
//!
//! Internal implementation details are not exposed through this API.

// Selection
pub use super::selector::{select_latest, FileEntry, Selection};

// Defaults
pub use super::config::{DEFAULT_COUNT, DEFAULT_DIRECTORY, DEFAULT_LINK_FORMAT, RANK_TOKEN};

// Config file location and diagnostics
pub use super::config::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_ENV_VAR};

// User-facing messages and display
pub use super::config::{NO_FILES_MESSAGE, PATH_DISPLAY_WIDTH, TIMESTAMP_FORMAT};

// Internal helpers for the symlink module
pub(crate) use super::config::TEMP_LINK_PREFIX;
