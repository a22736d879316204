//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::link::DEFAULT_CHECKOUT_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog file used when none is given on the command line
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Checkout page that generated links point at
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Quantity requested when none is given
    #[serde(default = "default_quantity")]
    pub default_quantity: u32,
}

fn default_checkout_url() -> String {
    DEFAULT_CHECKOUT_URL.to_string()
}

fn default_quantity() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            checkout_url: default_checkout_url(),
            format: OutputFormat::Table,
            default_quantity: default_quantity(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("poplink.toml");
        if local_config.exists() {
            debug!("Found poplink.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("popmart-deeplink").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(catalog) = std::env::var("POPLINK_CATALOG") {
            self.catalog = Some(PathBuf::from(catalog));
        }

        if let Ok(checkout_url) = std::env::var("POPLINK_CHECKOUT_URL") {
            self.checkout_url = checkout_url;
        }

        if let Ok(format) = std::env::var("POPLINK_FORMAT") {
            if let Ok(f) = format.parse() {
                self.format = f;
            }
        }

        self
    }

    /// Checks that the checkout URL is an absolute http(s) address.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.checkout_url)
            .with_context(|| format!("Invalid checkout URL: {}", self.checkout_url))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("Checkout URL must use http or https: {}", self.checkout_url);
        }

        Ok(())
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
