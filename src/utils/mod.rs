pub(crate) mod fs;

// Public API - utilities used by settings and commands
pub use fs::{expand_path, shorten_path};
