//! Test fixtures and builders

use anyhow::Result;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A scratch directory of files with controlled modification times
pub struct TestDir {
    pub temp_dir: TempDir,
    /// Reference time that file ages are measured from
    pub base_time: SystemTime,
}

impl TestDir {
    /// Get the path to the directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Create a file whose modification time is `age_secs` seconds in the past
    pub fn create_file(&self, name: &str, age_secs: u64) -> Result<PathBuf> {
        let path = self.join(name);
        fs::write(&path, name)?;
        let mtime = self.base_time - Duration::from_secs(age_secs);
        File::options().write(true).open(&path)?.set_modified(mtime)?;
        Ok(path)
    }

    /// Create a subdirectory
    pub fn create_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.join(name);
        fs::create_dir(&path)?;
        Ok(path)
    }

    /// Names of the symlinks currently in the directory, sorted
    pub fn symlink_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.path())? {
            let entry = entry?;
            if entry.file_type()?.is_symlink() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Builder for directories of files, oldest listed first by default
pub struct TestDirBuilder {
    files: Vec<(String, u64)>,
}

impl TestDirBuilder {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a file modified `age_secs` seconds ago
    pub fn with_file(mut self, name: impl Into<String>, age_secs: u64) -> Self {
        self.files.push((name.into(), age_secs));
        self
    }

    /// Add files in order from oldest to newest, one minute apart
    pub fn with_files_oldest_first(mut self, names: &[&str]) -> Self {
        let total = names.len() as u64;
        for (i, name) in names.iter().enumerate() {
            self.files.push((name.to_string(), (total - i as u64) * 60));
        }
        self
    }

    pub fn build(self) -> Result<TestDir> {
        let dir = TestDir {
            temp_dir: TempDir::new()?,
            base_time: SystemTime::now(),
        };
        for (name, age) in &self.files {
            dir.create_file(name, *age)?;
        }
        Ok(dir)
    }
}
