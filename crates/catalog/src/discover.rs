//! Recursive file discovery by filename suffix.
//!
//! Walks a directory tree with [`walkdir`] and yields every regular file whose
//! name ends with a configured suffix. Within each directory, entries are
//! visited in byte order of their names with the directory's own files ahead
//! of its subdirectories, so a parent's matches always come before its
//! children's.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

/// Suffix matched when none is configured.
pub const DEFAULT_SUFFIX: &str = ".pdf";

/// Case-sensitive suffix check on a file name's raw bytes.
///
/// ```
/// use std::ffi::OsStr;
/// use pdfcat_catalog::discover::matches_suffix;
///
/// assert!(matches_suffix(OsStr::new("report.pdf"), ".pdf"));
/// assert!(!matches_suffix(OsStr::new("REPORT.PDF"), ".pdf"));
/// ```
pub fn matches_suffix(name: &OsStr, suffix: &str) -> bool {
    name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// A configured directory walk.
#[derive(Clone, Debug)]
pub struct Discovery {
    root: PathBuf,
    suffix: String,
}

impl Discovery {
    pub fn new(root: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self { root: root.into(), suffix: suffix.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Lazily walk the tree.
    ///
    /// Yielded paths are the root joined with each match's relative path.
    /// Traversal problems are yielded as [`ErrorKind::Filesystem`] items; a
    /// root that is missing, unreadable or not a directory is reported on the
    /// first call to `next()`.
    pub fn iter(&self) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(files_first)
            .into_iter()
            .filter_map(move |entry| self.process_entry(entry).transpose())
    }

    /// Walk the whole tree before returning, failing on the first traversal
    /// error.
    #[instrument(level = "debug", skip(self), fields(root = %self.root.display(), suffix = %self.suffix))]
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let paths = self.iter().collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = paths.len(), "Discovery complete");
        Ok(paths)
    }

    fn process_entry(&self, entry: walkdir::Result<DirEntry>) -> Result<Option<PathBuf>> {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(&self.root).to_path_buf();
                return Err(err).or_raise(|| ErrorKind::Filesystem(path.clone()));
            },
        };
        if entry.depth() == 0 {
            // The root itself is never a candidate, but it has to be a directory.
            if !entry.file_type().is_dir() {
                exn::bail!(ErrorKind::Filesystem(self.root.clone()));
            }
            return Ok(None);
        }
        if !is_file(&entry) || !matches_suffix(entry.file_name(), &self.suffix) {
            return Ok(None);
        }
        tracing::trace!(path = %entry.path().display(), "Discovered file");
        Ok(Some(entry.into_path()))
    }
}

/// Regular files, plus symlinks that resolve to one. Symlinked directories are
/// listed but never descended into.
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
}

/// Walk `root` and collect every file ending with `suffix`.
pub fn discover(root: impl Into<PathBuf>, suffix: impl Into<String>) -> Result<Vec<PathBuf>> {
    Discovery::new(root, suffix).discover()
}
