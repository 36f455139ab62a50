//! Document paths and home-relative resolution

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Path of a document managed by rcblock.
///
/// Startup files are usually configured relative to the user's home
/// (`~/.bashrc`), so resolution expands a leading `~` or `$HOME` against an
/// explicit home directory instead of reading the process environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    inner: PathBuf,
}

impl DocumentPath {
    /// Wrap an already resolved path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_path_buf(),
        }
    }

    /// Resolve a configured path against `home`.
    ///
    /// `~`, `~/x`, `$HOME` and `$HOME/x` are expanded. Relative paths without
    /// a home prefix are taken relative to `home` as well, since every
    /// startup file lives there.
    pub fn resolve(raw: &str, home: &Path) -> Self {
        let rest = if raw == "~" || raw == "$HOME" {
            Some("")
        } else {
            raw.strip_prefix("~/")
                .or_else(|| raw.strip_prefix("$HOME/"))
        };

        let inner = match rest {
            Some("") => home.to_path_buf(),
            Some(rest) => home.join(rest),
            None if Path::new(raw).is_absolute() => PathBuf::from(raw),
            None => home.join(raw),
        };
        Self { inner }
    }

    pub fn as_path(&self) -> &Path {
        &self.inner
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.inner.clone()
    }

    /// Path of a sibling file named `<file name>.<suffix>`.
    ///
    /// Used for backups (`~/.bashrc.bak.rcblock`) and temp files.
    pub fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .inner
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(suffix);
        self.inner.with_file_name(name)
    }

    pub fn parent(&self) -> Option<&Path> {
        self.inner.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl AsRef<Path> for DocumentPath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.display())
    }
}

impl From<&str> for DocumentPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for DocumentPath {
    fn from(p: PathBuf) -> Self {
        Self { inner: p }
    }
}

impl From<&Path> for DocumentPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

/// Validate a short identifier that ends up in file names and marker lines.
///
/// Allows ASCII alphanumerics, `-`, `_` and `.`, must not start with `.`.
pub fn validate_identifier(value: &str, what: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidIdentifier {
        what: what.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.starts_with('.') {
        return Err(invalid("must not start with '.'"));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(invalid(&format!("character {c:?} is not allowed")));
    }
    Ok(())
}
