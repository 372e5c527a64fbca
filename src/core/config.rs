//! Configuration constants and defaults

// Built-in defaults, used when neither the config file nor the command line sets a value
pub const DEFAULT_DIRECTORY: &str = "$HOME/screenshots";
pub const DEFAULT_COUNT: usize = 3;

// Symlink naming
//
// The rank token is the only dynamic part of a name format. It is replaced by the
// 1-based rank of the file, so the most recent file becomes `latest-1`.
pub const RANK_TOKEN: &str = "{rank}";
pub const DEFAULT_LINK_FORMAT: &str = "latest-{rank}";

// Prefix for the temporary link created next to a symlink before it is renamed over it
pub const TEMP_LINK_PREFIX: &str = ".scranagement-tmp-";

// Config file location under the platform config directory
pub const CONFIG_DIR_NAME: &str = "scranagement";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// Environment variable holding an EnvFilter directive for diagnostics
pub const LOG_ENV_VAR: &str = "SCRANAGEMENT_LOG";

// UI Constants
pub const NO_FILES_MESSAGE: &str = "No files found.";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 40;
