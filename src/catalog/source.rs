//! Sources of raw catalog text: the bundled dataset, a file, or stdin.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Catalog shipped with the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../data/products.csv");

/// Trait for loading raw catalog text - enables in-memory sources for tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Reads the full catalog text.
    async fn load(&self) -> Result<String>;

    /// Returns a short description of where the text comes from.
    fn describe(&self) -> String;
}

/// The bundled default catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalog;

#[async_trait]
impl CatalogSource for BundledCatalog {
    async fn load(&self) -> Result<String> {
        debug!("Using bundled catalog");
        Ok(BUNDLED_CATALOG.to_string())
    }

    fn describe(&self) -> String {
        "bundled catalog".to_string()
    }
}

/// A catalog file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Creates a file source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn load(&self) -> Result<String> {
        info!("Reading catalog: {}", self.path.display());

        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog file: {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Catalog text piped on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinCatalog;

#[async_trait]
impl CatalogSource for StdinCatalog {
    async fn load(&self) -> Result<String> {
        info!("Reading catalog from stdin");

        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read catalog from stdin")?;
        Ok(text)
    }

    fn describe(&self) -> String {
        "stdin".to_string()
    }
}

/// Picks a source from an optional path; `-` means stdin, none means bundled.
pub fn source_for(path: Option<&Path>) -> Box<dyn CatalogSource> {
    match path {
        Some(p) if p == Path::new("-") => Box::new(StdinCatalog),
        Some(p) => Box::new(FileCatalog::new(p)),
        None => Box::new(BundledCatalog),
    }
}
