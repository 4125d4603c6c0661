use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Header of the sequence number column.
pub const ID_COLUMN: &str = "ID";
/// Header of the file name column.
pub const FILENAME_COLUMN: &str = "PDF Filename";

/// One row of the catalog: a sequence number and a discovered file's base
/// name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "PDF Filename")]
    pub filename: String,
}

/// Where a run's sequence numbers start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdScheme {
    /// Every run numbers its batch from 1, whatever the table already holds.
    /// Repeated runs therefore produce duplicate IDs.
    #[default]
    PerRun,
    /// Continue from the highest numeric ID already in the table.
    Continue,
}

impl IdScheme {
    /// First ID to hand out, given the highest ID already stored.
    ///
    /// Fails with [`ErrorKind::IdOverflow`] when the table already holds
    /// `u64::MAX`.
    pub fn first_id(&self, existing_max: Option<u64>) -> Result<u64> {
        match (self, existing_max) {
            (Self::PerRun, _) | (Self::Continue, None) => Ok(1),
            (Self::Continue, Some(max)) => match max.checked_add(1) {
                Some(first) => Ok(first),
                None => exn::bail!(ErrorKind::IdOverflow(max)),
            },
        }
    }
}

/// Turn discovered paths into records, in the order given.
///
/// IDs are dense and start at `first_id`. Only the last path component is
/// kept; non-UTF-8 names are converted lossily. Running out of IDs is an
/// [`ErrorKind::IdOverflow`] and no records are returned.
pub fn assemble<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>, first_id: u64) -> Result<Vec<CatalogRecord>> {
    let mut records = Vec::new();
    let mut next = Some(first_id);
    for path in paths {
        let Some(id) = next else {
            exn::bail!(ErrorKind::IdOverflow(u64::MAX));
        };
        next = id.checked_add(1);
        records.push(CatalogRecord {
            id,
            filename: path.as_ref().file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default(),
        });
    }
    Ok(records)
}
