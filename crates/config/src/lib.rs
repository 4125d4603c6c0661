//! Layered configuration for pdfcat.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults ([`Config::default`]), which reproduce the plain
//!    "catalog `*.pdf` under `.` into `./csv_data.csv`" behaviour.
//! 2. A TOML file: the one passed explicitly, else `pdfcat.toml` in the
//!    working directory, else `config.toml` in the user's config directory.
//! 3. `PDFCAT_*` environment variables (`PDFCAT_ROOT`, `PDFCAT_OUTPUT`,
//!    `PDFCAT_SUFFIX`, `PDFCAT_IDS`). Values are taken verbatim as strings;
//!    other variables with the prefix are ignored.
//! 4. [`Overrides`] from the command line.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::{Dict, Value};
use pdfcat_catalog::{DEFAULT_SUFFIX, IdScheme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "PDFCAT_";
pub const LOCAL_CONFIG_FILE: &str = "pdfcat.toml";
pub const DEFAULT_OUTPUT: &str = "csv_data.csv";
/// Keys read from `PDFCAT_*` variables.
pub const ENV_KEYS: [&str; 4] = ["root", "output", "suffix", "ids"];

/// Resolved settings for one run.
///
/// Relative `root` and `output` paths are resolved against the working
/// directory of the process, including when they come from a configuration
/// file in another directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory to catalog.
    pub root: PathBuf,
    /// Table file to create or append to.
    pub output: PathBuf,
    /// Case-sensitive filename suffix.
    pub suffix: String,
    pub ids: IdScheme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            suffix: DEFAULT_SUFFIX.to_string(),
            ids: IdScheme::default(),
        }
    }
}

/// Command-line values; `None` leaves the lower layers alone.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<IdScheme>,
}

impl Config {
    /// Defaults, then `file` (if any), then the environment.
    pub fn figment(file: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match file {
            Some(file) => figment.merge(Toml::file(file)),
            None => figment,
        };
        figment.merge(env_layer())
    }

    /// Resolve every layer and validate the result.
    ///
    /// An explicit `file` must exist; a discovered one is optional.
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let file = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => discover_file(),
        };
        if let Some(path) = &file {
            tracing::debug!(path = %path.display(), "Using configuration file");
        }
        Self::from_figment(Self::figment(file.as_deref()).merge(Serialized::defaults(overrides)))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.suffix.is_empty() {
            exn::bail!(ErrorKind::Invalid("suffix must not be empty".to_string()));
        }
        if self.root.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("root must not be empty".to_string()));
        }
        if self.output.file_name().is_none() {
            exn::bail!(ErrorKind::Invalid(format!("output `{}` does not name a file", self.output.display())));
        }
        Ok(())
    }
}

/// The `PDFCAT_*` layer. Figment's own [`Env`] provider parses values, which
/// turns a suffix like `.001` into a float, so only the raw strings are kept.
fn env_layer() -> Serialized<Dict> {
    let values: Dict = Env::prefixed(ENV_PREFIX)
        .only(&ENV_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_ascii_lowercase(), Value::from(value)))
        .collect();
    Serialized::defaults(values)
}

fn discover_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    ProjectDirs::from("", "", "pdfcat")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|path| path.is_file())
}
