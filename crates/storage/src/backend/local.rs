//! Local filesystem storage backend.

use crate::error::{ErrorKind, Result};
use crate::{StorageBackend, path::validate as validate_path};
use std::fs;
use std::path::{Path, PathBuf};

/// Local filesystem storage backend.
///
/// All paths are relative to the configured root directory, which must
/// already exist. Parent directories are never created on write: a table file
/// pointed at a missing directory is a write error, not a reason to invent
/// directories.
///
/// # Examples
///
/// ```no_run
/// use pdfcat_storage::backend::LocalBackend;
///
/// # fn example() -> pdfcat_storage::error::Result<()> {
/// let backend = LocalBackend::new("local", "/srv/papers")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalBackend {
    name: String,
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if `root` is relative
    /// or is not a directory, and [`NotFound`](ErrorKind::NotFound) if it
    /// does not exist.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        let metadata = fs::metadata(&root).map_err(|e| ErrorKind::from_io(e, &root))?;
        if !metadata.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { name: name.into(), root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path for a relative storage path.
    fn absolute_path(&self, path: &Path) -> Result<PathBuf> {
        Ok(self.root.join(validate_path(path)?))
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        Ok(abs_path.try_exists().map_err(|e| ErrorKind::from_io(e, path))?)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::read(&abs_path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        tracing::debug!(backend = %self.name, path = %abs_path.display(), bytes = data.len(), "Writing file");
        Ok(fs::write(&abs_path, data).map_err(|e| ErrorKind::from_io(e, path))?)
    }
}
