//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{DocumentPath, Error, Result};

/// Removes the temp file unless the rename went through.
struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.armed && fs::remove_file(&self.path).is_ok() {
            tracing::debug!(path = %self.path.display(), "removed leftover temp file");
        }
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers see either the old or the new
/// content, never a partial write. Parent directories are created as needed
/// and the permissions of an existing target are carried over. A symlinked
/// document is written through: the link stays and its target is replaced.
/// The temp file is removed on every error path.
pub fn write_atomic(path: &DocumentPath, content: &[u8]) -> Result<()> {
    let target = resolve_link(path)?;
    let native_path = target.as_path();

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let mut temp = TempFile {
        path: native_path.with_file_name(&temp_name),
        armed: true,
    };

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp.path)
        .map_err(|e| Error::io(&temp.path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp.path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp.path, e))?;

    if let Ok(meta) = fs::metadata(native_path) {
        fs::set_permissions(&temp.path, meta.permissions())
            .map_err(|e| Error::io(&temp.path, e))?;
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.to_path_buf(),
    })?;
    drop(temp_file);

    fs::rename(&temp.path, native_path).map_err(|e| Error::io(native_path, e))?;
    temp.armed = false;

    Ok(())
}

/// Path the bytes of `path` actually live at.
///
/// Regular and missing files resolve to themselves. A dangling link resolves
/// to where it points, so writing it creates the target.
fn resolve_link(document: &DocumentPath) -> Result<DocumentPath> {
    let path = document.as_path();
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => {
                tracing::debug!(link = %path.display(), target = %target.display(), "writing through symlink");
                Ok(DocumentPath::new(target))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let link = fs::read_link(path).map_err(|e| Error::io(path, e))?;
                Ok(match document.parent() {
                    Some(parent) => DocumentPath::new(parent.join(link)),
                    None => DocumentPath::new(link),
                })
            }
            Err(e) => Err(Error::io(path, e)),
        },
        _ => Ok(document.clone()),
    }
}

/// Read a text document, treating a missing file as `None`.
pub fn read_document(path: &DocumentPath) -> Result<Option<String>> {
    match fs::read(path.as_path()) {
        Ok(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| Error::NotText {
                path: path.to_path_buf(),
            }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path.as_path(), e)),
    }
}

/// Read text content from a file that must exist.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &DocumentPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Create `path` with `content` only if nothing exists there yet.
///
/// Returns `false` without touching the file when it already exists.
pub fn create_new(path: &Path, content: &[u8]) -> Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(Error::io(path, e)),
    };

    let written = file.write_all(content).and_then(|_| file.sync_all());
    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(Error::io(path, e));
    }
    Ok(true)
}
