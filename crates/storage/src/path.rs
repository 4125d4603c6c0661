//! Path validation for backend-relative store paths.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Normalizes a backend-relative path, refusing anything that would resolve
/// outside the backend root.
///
/// `.` components and repeated separators are dropped and `..` is resolved
/// lexically. Absolute paths are treated as relative to the root. Null bytes
/// and Windows prefixes are rejected, as is any path that normalizes to
/// nothing.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pdfcat_storage::validate_path;
///
/// assert_eq!(validate_path("csv_data.csv").unwrap(), Path::new("csv_data.csv"));
/// assert_eq!(validate_path("./out//csv_data.csv").unwrap(), Path::new("out/csv_data.csv"));
/// assert!(validate_path("../csv_data.csv").is_err());
/// assert!(validate_path(".").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(original.to_path_buf());
    let mut components = Vec::new();
    for component in original.components() {
        match component {
            Component::Normal(s) if s.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(s) => components.push(s),
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if components.is_empty() {
        exn::bail!(invalid());
    }
    Ok(components.into_iter().collect())
}
