//! `pdfcat`: catalog files by suffix into a CSV table.
//!
//! With no arguments, every `*.pdf` under the working directory is appended
//! to `./csv_data.csv` (created with an `ID,PDF Filename` header on first
//! run).

use clap::Parser;
use exn::ResultExt;
use pdfcat_catalog::{Catalog, Discovery, IdScheme, Summary, TableStore};
use pdfcat_config::{Config, Overrides};
use pdfcat_storage::BackendHandle;
use pdfcat_storage::backend::{LocalBackend, ReadOnlyBackend};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod error;

use crate::error::{ErrorKind, Result};

const VERBOSE_FILTER: &str = "pdfcat=debug,pdfcat_catalog=debug,pdfcat_config=debug,pdfcat_storage=debug";

#[derive(Parser, Debug)]
#[command(name = "pdfcat", version, about = "Catalog files by suffix into a CSV table")]
struct Cli {
    /// Directory to catalog [default: .]
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Table file to create or append to [default: csv_data.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Case-sensitive filename suffix to match [default: .pdf]
    #[arg(short, long)]
    suffix: Option<String>,

    /// Number new rows after the highest ID already in the table instead of
    /// starting again from 1
    #[arg(long)]
    continue_ids: bool,

    /// Walk the tree and build the rows, but don't write the table file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            output: self.output.clone(),
            suffix: self.suffix.clone(),
            ids: self.continue_ids.then_some(IdScheme::Continue),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok((output, _)) if !cli.dry_run => {
            println!("CSV data generated and saved to {}", output.display());
            ExitCode::SUCCESS
        },
        Ok((output, summary)) => {
            println!("Dry run: {} row(s) would be added to {}", summary.records.len(), output.display());
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(cli: &Cli) -> Result<(PathBuf, Summary)> {
    let config = Config::load(cli.config.as_deref(), cli.overrides()).or_raise(|| ErrorKind::Config)?;
    tracing::debug!(?config, dry_run = cli.dry_run, "Resolved configuration");
    let store = open_store(&config.output, cli.dry_run)?;
    let catalog = Catalog::new(Discovery::new(&config.root, &config.suffix), store).with_ids(config.ids);
    let summary = catalog.run().or_raise(|| ErrorKind::Catalog)?;
    tracing::info!(records = summary.records.len(), outcome = ?summary.outcome, "Catalog complete");
    Ok((config.output, summary))
}

/// The table file is addressed relative to a backend rooted at its parent
/// directory.
fn open_store(output: &Path, dry_run: bool) -> Result<TableStore> {
    let absolute = std::path::absolute(output).or_raise(|| ErrorKind::Output(output.to_path_buf()))?;
    let (Some(parent), Some(file_name)) = (absolute.parent(), absolute.file_name()) else {
        exn::bail!(ErrorKind::Output(output.to_path_buf()));
    };
    let local = LocalBackend::new("local", parent).or_raise(|| ErrorKind::Output(output.to_path_buf()))?;
    let backend: BackendHandle = match dry_run {
        true => Arc::new(ReadOnlyBackend::new(Arc::new(local))),
        false => Arc::new(local),
    };
    Ok(TableStore::new(backend, file_name))
}
