//! File cataloging: walk a tree for files with a given suffix, number them,
//! and add them to a CSV table file.
//!
//! The pipeline is three synchronous steps run by [`Catalog::run`]:
//!
//! 1. [`discover`] walks the tree ([`Discovery`]).
//! 2. [`assemble`] turns paths into [`CatalogRecord`]s.
//! 3. [`TableStore`] creates the table file or appends to it.
//!
//! ```
//! use pdfcat_catalog::{Catalog, Discovery, TableStore};
//! use pdfcat_storage::BackendHandle;
//!
//! fn catalog_papers(backend: BackendHandle) -> pdfcat_catalog::error::Result<usize> {
//!     let catalog = Catalog::new(Discovery::new("papers", ".pdf"), TableStore::new(backend, "csv_data.csv"));
//!     Ok(catalog.run()?.records.len())
//! }
//! ```

pub mod discover;
pub mod error;
mod pipeline;
mod record;
pub mod store;
pub mod table;

pub use crate::discover::{DEFAULT_SUFFIX, Discovery, discover};
pub use crate::pipeline::{Catalog, Summary};
pub use crate::record::{CatalogRecord, FILENAME_COLUMN, ID_COLUMN, IdScheme, assemble};
pub use crate::store::{Persisted, TableStore};
pub use crate::table::Table;
