//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`config.toml`)
//! 3. Environment variables (`CART_LEDGER_*`)
//! 4. Command-line flags (applied by `lib.rs`)
//!
//! ## Example Config File
//! ```toml
//! [store]
//! name = "Fruit Stand"
//! currency_symbol = "$"
//!
//! [catalog]
//! # Either point at a JSON catalog ...
//! # path = "catalog.json"
//! # ... or list products inline
//! [[catalog.products]]
//! id = 1
//! name = "Cherry"
//! unitPrice = "2.00"
//! imageRef = "./images/cherry.jpg"
//!
//! [output]
//! format = "text"
//! ```
//!
//! Configuration is read-only once the session starts.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ledger_core::{Catalog, ProductSpec};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CliError;

pub const ENV_CATALOG: &str = "CART_LEDGER_CATALOG";
pub const ENV_FORMAT: &str = "CART_LEDGER_FORMAT";
pub const ENV_STORE_NAME: &str = "CART_LEDGER_STORE_NAME";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Store presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Shown in the session banner
    pub name: String,

    /// Prefix for every amount in text output
    pub currency_symbol: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: "Fruit Stand".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// Where the catalog comes from.
///
/// `path` wins over inline `products`; with neither, the built-in
/// fruit-stand catalog is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file
    pub path: Option<PathBuf>,

    /// Inline product records
    pub products: Vec<ProductSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How command results are written to stdout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per command
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::config(format!(
                "unknown output format '{}', expected text or json",
                other
            ))),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// An explicitly given path must exist; the default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, CliError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads and decodes a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `CART_LEDGER_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_CATALOG) {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            match format.parse() {
                Ok(parsed) => self.output.format = parsed,
                Err(_) => warn!(format = %format, "Unknown output format in environment"),
            }
        }

        if let Some(name) = lookup(ENV_STORE_NAME) {
            self.store.name = name;
        }
    }

    /// Builds the catalog this configuration points at.
    pub fn build_catalog(&self) -> Result<Catalog, CliError> {
        if let Some(path) = &self.catalog.path {
            info!(?path, "Loading catalog from file");
            let json = std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
            return Catalog::from_json(&json)
                .map_err(|e| CliError::catalog(format!("{}: {}", path.display(), e)));
        }

        if !self.catalog.products.is_empty() {
            return Ok(Catalog::from_specs(self.catalog.products.clone())?);
        }

        debug!("Using built-in fruit stand catalog");
        Ok(Catalog::default_fruit_stand())
    }

    /// Platform config location, e.g. `~/.config/cart-ledger/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cart-ledger", "cart-ledger")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
