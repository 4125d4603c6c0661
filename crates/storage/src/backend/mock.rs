//! In-memory storage backend for testing.

use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// In-memory storage backend for testing.
///
/// Files are stored in a `HashMap` behind a [`RwLock`], so all trait methods
/// can operate on `&self` without external synchronisation.
///
/// # Examples
///
/// ```
/// use pdfcat_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// let backend = MockBackend::with_files([("csv_data.csv", "ID,PDF Filename\n")]);
/// assert!(backend.exists(Path::new("csv_data.csv")).unwrap());
///
/// backend.write(Path::new("other.csv"), b"ID\n").unwrap();
/// assert_eq!(backend.read(Path::new("other.csv")).unwrap(), b"ID\n");
/// ```
pub struct MockBackend {
    name: String,
    storage: RwLock<HashMap<PathBuf, Vec<u8>>>,
    fail_writes: bool,
    writes: RwLock<usize>,
}

impl MockBackend {
    /// Create a mock backend pre-populated with files.
    ///
    /// Panics if any path fails validation. If test setup is wrong, then the
    /// test should not pass.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let mut map = HashMap::new();
        for (path, data) in files {
            let path = path.into();
            let Ok(validated) = validate_path(&path) else {
                panic!("MockBackend::with_files: invalid path {}", path.display());
            };
            map.insert(validated, data.into());
        }
        Self {
            name: "mock".to_string(),
            storage: RwLock::new(map),
            fail_writes: false,
            writes: RwLock::new(0),
        }
    }

    /// Change the name of the mock backend.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make every subsequent [`write`](StorageBackend::write) fail with an
    /// I/O error without touching the stored contents.
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of write calls that reached the backend (including failed ones).
    pub fn write_count(&self) -> usize {
        *self.writes.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current contents of a file, bypassing path validation errors.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let path = validate_path(path.as_ref()).ok()?;
        self.storage.read().unwrap_or_else(PoisonError::into_inner).get(&path).cloned()
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        let files: [(&str, &str); 0] = [];
        Self::with_files(files)
    }
}

impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.storage.read().unwrap_or_else(PoisonError::into_inner).contains_key(&path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        let guard = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(&path).cloned().ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path)))
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = validate_path(path)?;
        *self.writes.write().unwrap_or_else(PoisonError::into_inner) += 1;
        if self.fail_writes {
            exn::bail!(ErrorKind::Io(std::io::Error::other("mock write failure")));
        }
        self.storage.write().unwrap_or_else(PoisonError::into_inner).insert(path, data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read() {
        let backend = MockBackend::default();
        backend.write(Path::new("test.csv"), b"hello").unwrap();
        assert_eq!(backend.read(Path::new("test.csv")).unwrap(), b"hello");
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn test_with_files() {
        let backend = MockBackend::with_files([("a/table.csv", "one"), ("b.csv", "two")]);
        assert!(backend.exists(Path::new("a/table.csv")).unwrap());
        assert!(backend.exists(Path::new("./b.csv")).unwrap());
        assert!(!backend.exists(Path::new("c.csv")).unwrap());
    }

    #[test]
    fn test_read_not_found() {
        let backend = MockBackend::default();
        let err = backend.read(Path::new("missing.csv")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_failing_writes_leave_contents_alone() {
        let backend = MockBackend::with_files([("csv_data.csv", "original")]).with_failing_writes();
        let err = backend.write(Path::new("csv_data.csv"), b"replacement").unwrap_err();
        assert!(matches!(&*err, ErrorKind::Io(_)));
        assert_eq!(backend.contents("csv_data.csv").unwrap(), b"original");
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let backend = MockBackend::default();
        assert!(backend.read(Path::new("../etc/passwd")).is_err());
        assert!(backend.write(Path::new("../escape"), b"bad").is_err());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    #[should_panic(expected = "invalid path")]
    fn test_with_files_panics_on_bad_path() {
        MockBackend::with_files([("../escape", "bad")]);
    }
}
