//! Loading and saving the table file through a storage backend.

use crate::error::{ErrorKind, Result};
use crate::record::CatalogRecord;
use crate::table::Table;
use exn::ResultExt;
use pdfcat_storage::BackendHandle;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// What persisting a batch did to the table file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persisted {
    /// No table existed; a new one was written with this many data rows.
    Created { rows: usize },
    /// An existing table with `existing` rows gained `added` more.
    Appended { existing: usize, added: usize },
}

/// The table file at `path` inside a backend.
///
/// Reads and writes are whole-file. Nothing guards the gap between
/// [`load`](Self::load) and [`save`](Self::save): two runs against the same
/// file race, and the last writer wins.
#[derive(Clone)]
pub struct TableStore {
    backend: BackendHandle,
    path: PathBuf,
}

impl TableStore {
    pub fn new(backend: BackendHandle, path: impl Into<PathBuf>) -> Self {
        Self { backend, path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Read and parse the table file, or `None` if it doesn't exist yet.
    #[instrument(level = "debug", skip(self), fields(backend = self.backend.name(), path = %self.path.display()))]
    pub fn load(&self) -> Result<Option<Table>> {
        if !self.backend.exists(&self.path).or_raise(|| ErrorKind::Io(self.path.clone()))? {
            return Ok(None);
        }
        let bytes = self.backend.read(&self.path).or_raise(|| ErrorKind::Io(self.path.clone()))?;
        let table = Table::parse(&bytes).or_raise(|| ErrorKind::Parse(self.path.clone()))?;
        tracing::debug!(rows = table.len(), columns = table.headers().len(), "Loaded existing table");
        Ok(Some(table))
    }

    /// Serialize and overwrite the table file.
    #[instrument(level = "debug", skip_all, fields(backend = self.backend.name(), path = %self.path.display(), rows = table.len()))]
    pub fn save(&self, table: &Table) -> Result<()> {
        let bytes = table.to_csv()?;
        self.backend.write(&self.path, &bytes).or_raise(|| ErrorKind::Io(self.path.clone()))
    }

    /// Create the table from `records` if `existing` is `None`, otherwise
    /// append them to `existing` and write the combined table back.
    pub fn persist(&self, existing: Option<Table>, records: &[CatalogRecord]) -> Result<Persisted> {
        match existing {
            None => {
                self.save(&Table::from_records(records))?;
                Ok(Persisted::Created { rows: records.len() })
            },
            Some(mut table) => {
                let existing = table.len();
                table.append(records);
                self.save(&table)?;
                Ok(Persisted::Appended { existing, added: records.len() })
            },
        }
    }

    /// [`load`](Self::load) followed by [`persist`](Self::persist).
    pub fn append(&self, records: &[CatalogRecord]) -> Result<Persisted> {
        let existing = self.load()?;
        self.persist(existing, records)
    }
}
