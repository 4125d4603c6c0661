//! Storage backend trait and implementations.
//!
//! The catalog table is a single small file that is read whole and written
//! whole, so the [`StorageBackend`] trait is deliberately byte-oriented: no
//! streaming, no listing. Swapping the backend is how the rest of the
//! workspace gets a dry-run mode ([`ReadOnlyBackend`]) and filesystem-free
//! tests ([`MockBackend`], behind the `mock` feature).

mod local;
#[cfg(feature = "mock")]
mod mock;
mod ro;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
pub use self::ro::ReadOnlyBackend;
use crate::error::Result;
use std::path::Path;

/// Unified interface for storage backends.
///
/// All paths are relative to the backend root and must be validated using
/// [`validate_path`](crate::validate_path) before use. Implementations
/// enforce this validation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pdfcat_storage::{backend::StorageBackend, error::Result};
///
/// fn size_of_table(backend: &dyn StorageBackend) -> Result<u64> {
///     let path = Path::new("csv_data.csv");
///     if backend.exists(path)? {
///         Ok(backend.read(path)?.len() as u64)
///     } else {
///         Ok(0)
///     }
/// }
/// ```
pub trait StorageBackend: Send + Sync {
    /// Name of the backend, used for logging only.
    fn name(&self) -> &str;

    /// Check if a file exists.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Read file contents.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write file contents.
    ///
    /// Creates a new file or truncates and overwrites an existing one. There
    /// is no write-then-rename step: a failure part way through can leave a
    /// truncated file behind.
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
}
