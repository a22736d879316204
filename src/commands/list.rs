//! Catalog listing command implementation.

use crate::catalog::{parse_with_report, CatalogSource};
use crate::commands::catalog_source;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::Result;
use tracing::{debug, info};

/// Lists the entries of a catalog.
pub struct ListCommand {
    config: Config,
}

impl ListCommand {
    /// Creates a new list command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the configured catalog and returns formatted entries.
    pub async fn execute(&self) -> Result<String> {
        let source = catalog_source(&self.config);
        self.execute_with_source(source.as_ref()).await
    }

    /// Lists entries from a provided source (for testing).
    pub async fn execute_with_source(&self, source: &dyn CatalogSource) -> Result<String> {
        info!("Listing catalog from {}", source.describe());

        let text = source.load().await?;
        let report = parse_with_report(&text);

        if report.skipped > 0 {
            debug!("Dropped {} malformed rows", report.skipped);
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_entries(&report.entries))
    }
}
