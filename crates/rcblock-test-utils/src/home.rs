//! [`FakeHome`] fixture for startup file scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary home directory with helpers for seeding and asserting on
/// startup files.
///
/// # Example
///
/// ```rust,no_run
/// use rcblock_test_utils::FakeHome;
///
/// let home = FakeHome::new();
/// home.write(".bashrc", "alias ll='ls -l'\n");
/// assert!(home.read(".bashrc").contains("alias"));
/// ```
pub struct FakeHome {
    temp_dir: TempDir,
}

impl Default for FakeHome {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHome {
    /// Create an empty temporary home.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the home directory path.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a home-relative file.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a home-relative file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Read a home-relative file, panicking if it is missing.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("FakeHome::read({relative}): {e}"))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// File names in the home root containing `.bak.`, sorted.
    pub fn backups(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(".bak."))
            .collect();
        names.sort();
        names
    }

    /// Count full-line occurrences of `line`.
    pub fn count_lines(&self, relative: &str, line: &str) -> usize {
        self.read(relative).lines().filter(|l| *l == line).count()
    }
}
