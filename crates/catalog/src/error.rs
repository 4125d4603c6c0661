//! Catalog Error Types
//!
//! Uses [`exn`] for automatic location tracking and error tree construction.
//! Storage and CSV failures are kept as children in the tree; the kinds here
//! only say which stage of the run gave up.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A catalog error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a catalog failure.
///
/// ### Run Errors
/// - [`ErrorKind::Filesystem`] - the directory walk could not continue.
/// - [`ErrorKind::Parse`] - the existing table file could not be understood.
/// - [`ErrorKind::Io`] - the table file could not be read or written.
/// - [`ErrorKind::IdOverflow`] - the batch cannot be numbered.
///
/// ### Table Errors
/// - [`ErrorKind::Malformed`]
/// - [`ErrorKind::Encode`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Traversal or file-access failure during discovery.
    #[display("cannot traverse {}", _0.display())]
    Filesystem(#[error(not(source))] PathBuf),
    /// The existing table file is not valid CSV, or has no header row.
    #[display("malformed table file: {}", _0.display())]
    Parse(#[error(not(source))] PathBuf),
    /// Reading or writing the table file failed.
    #[display("table file I/O failed: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// Continuing after this ID would run past `u64::MAX`.
    #[display("no IDs left after {_0}")]
    IdOverflow(#[error(not(source))] u64),
    /// Table contents violate the CSV shape (details in the message).
    #[display("invalid table data: {_0}")]
    Malformed(#[error(not(source))] String),
    /// Serializing the table to CSV failed.
    #[display("could not encode table as CSV")]
    Encode,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
