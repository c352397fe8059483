//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json` and holds the page size, the
//! location of the dataset file and an optional artificial request latency.

use crate::error::{ErrorType, IntoResult, Res};
use crate::model::Dataset;
use crate::store::{parse_dataset, seed_json, DEFAULT_PAGE_SIZE};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATASET_JSON: &str = "dataset.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory along with:
    /// - an initial `config.json` holding default settings
    /// - a `dataset.json` holding the seed dataset
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        create(dir.into()).await.pub_result(ErrorType::Config)
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        load(home.into()).await.pub_result(ErrorType::Config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn page_size(&self) -> usize {
        self.config_file.page_size
    }

    /// The artificial delay added to every request, if any.
    pub fn latency(&self) -> Option<Duration> {
        self.config_file.latency_ms.map(Duration::from_millis)
    }

    /// Returns the configured dataset path if it is absolute, otherwise resolves it against the
    /// home directory.
    pub fn dataset_path(&self) -> PathBuf {
        let p = self
            .config_file
            .dataset_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATASET_JSON));
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// Reads and parses the dataset file.
    pub async fn load_dataset(&self) -> Result<Dataset> {
        load_dataset(&self.dataset_path())
            .await
            .pub_result(ErrorType::Dataset)
    }
}

async fn load_dataset(path: &Path) -> Res<Dataset> {
    let json = utils::read(path).await?;
    parse_dataset(&json).with_context(|| format!("Bad dataset file {}", path.display()))
}

async fn create(maybe_relative: PathBuf) -> Res<Config> {
    utils::make_dir(&maybe_relative)
        .await
        .context("Unable to create the expenses home directory")?;
    let root = utils::canonicalize(&maybe_relative).await?;

    let config_path = root.join(CONFIG_JSON);
    if config_path.exists() {
        bail!("A config file already exists at '{}'", config_path.display())
    }
    let config_file = ConfigFile::default();
    config_file.save(&config_path).await?;

    let config = Config {
        root,
        config_path,
        config_file,
    };
    utils::write(config.dataset_path(), seed_json()).await?;
    Ok(config)
}

async fn load(maybe_relative: PathBuf) -> Res<Config> {
    let root = utils::canonicalize(&maybe_relative)
        .await
        .context("The expenses home directory is missing")?;

    let config_path = root.join(CONFIG_JSON);
    if !config_path.is_file() {
        bail!("The config file is missing '{}'", config_path.display())
    }
    let config_file = ConfigFile::load(&config_path).await?;
    Ok(Config {
        root,
        config_path,
        config_file,
    })
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "page_size": 5,
///   "dataset_path": "dataset.json",
///   "latency_ms": 250
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of transactions per page
    #[serde(default = "default_page_size")]
    page_size: usize,

    /// Path to the dataset (optional, relative to the home directory or absolute)
    /// Defaults to $EXPENSES_HOME/dataset.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dataset_path: Option<PathBuf>,

    /// Delay added to each request, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            page_size: DEFAULT_PAGE_SIZE,
            dataset_path: None,
            latency_ms: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.page_size > 0,
            "Invalid page_size in config file: it must be greater than zero"
        );

        Ok(config)
    }

    /// Saves the ConfigFile to `path`.
    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data).await
    }
}
