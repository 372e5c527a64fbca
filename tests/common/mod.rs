//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;

pub use self::fixtures::{TestDir, TestDirBuilder};

use std::path::Path;
use std::process::{Command, Output};

/// Runs the built binary against `config_dir/config.toml`, created empty if missing
pub fn run_cli(config_dir: &Path, args: &[&str]) -> Output {
    let config_path = config_dir.join("config.toml");
    if !config_path.exists() {
        std::fs::write(&config_path, "").expect("Failed to create empty config");
    }

    Command::new(env!("CARGO_BIN_EXE_scranagement"))
        .args(["--config", &config_path.display().to_string()])
        .args(args)
        .env_remove("SCRANAGEMENT_LOG")
        .output()
        .expect("Failed to run scranagement binary")
}

/// Runs the built binary with no implicit arguments
pub fn run_cli_raw(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scranagement"))
        .args(args)
        .env_remove("SCRANAGEMENT_LOG")
        .output()
        .expect("Failed to run scranagement binary")
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
