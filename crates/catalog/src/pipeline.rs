use crate::discover::Discovery;
use crate::error::Result;
use crate::record::{CatalogRecord, IdScheme, assemble};
use crate::store::{Persisted, TableStore};
use tracing::instrument;

/// The result of a successful run.
#[derive(Debug)]
pub struct Summary {
    /// The batch assembled by this run, in traversal order.
    pub records: Vec<CatalogRecord>,
    pub outcome: Persisted,
}

/// Discover, assemble, persist.
///
/// The walk and the numbering both finish before the table file is written,
/// so a traversal error or an ID overflow leaves any existing table exactly
/// as it was.
pub struct Catalog {
    discovery: Discovery,
    store: TableStore,
    ids: IdScheme,
}

impl Catalog {
    pub fn new(discovery: Discovery, store: TableStore) -> Self {
        Self { discovery, store, ids: IdScheme::default() }
    }

    pub fn with_ids(mut self, ids: IdScheme) -> Self {
        self.ids = ids;
        self
    }

    #[instrument(name = "catalog", skip(self), fields(root = %self.discovery.root().display(), store = %self.store.path().display()))]
    pub fn run(&self) -> Result<Summary> {
        let paths = self.discovery.discover()?;
        let existing = self.store.load()?;
        let first_id = self.ids.first_id(existing.as_ref().and_then(|table| table.max_id()))?;
        let records = assemble(&paths, first_id)?;
        let outcome = self.store.persist(existing, &records)?;
        match outcome {
            Persisted::Created { rows } => tracing::info!(rows, "Created table file"),
            Persisted::Appended { existing, added } => tracing::info!(existing, added, "Appended to table file"),
        }
        Ok(Summary { records, outcome })
    }
}
