//! Batch link generation for every entry and variant in a catalog.

use crate::catalog::CatalogSource;
use crate::commands::catalog_source;
use crate::config::Config;
use crate::format::Formatter;
use crate::link::LinkBuilder;
use crate::selection::{AppState, Event, GeneratedLink};
use anyhow::Result;
use tracing::{info, warn};

/// Generates links for every variant that has a SKU.
pub struct BatchCommand {
    config: Config,
}

impl BatchCommand {
    /// Creates a new batch command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the configured catalog and generates all links.
    pub async fn execute(&self, quantity: Option<&str>) -> Result<String> {
        let source = catalog_source(&self.config);
        self.execute_with_source(source.as_ref(), quantity).await
    }

    /// Generates all links from a provided source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &dyn CatalogSource,
        quantity: Option<&str>,
    ) -> Result<String> {
        let text = source.load().await?;
        let links = self.generate_all(&text, quantity);

        let failed = links.iter().filter(|l| l.outcome.is_error()).count();
        if failed > 0 {
            warn!("{} of {} links could not be generated", failed, links.len());
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_links(&links))
    }

    /// Runs the selection flow once per entry and available variant.
    pub fn generate_all(&self, text: &str, quantity: Option<&str>) -> Vec<GeneratedLink> {
        let quantity = quantity
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_quantity.to_string());

        let loaded = AppState::new(LinkBuilder::new(self.config.checkout_url.clone()))
            .reduce(Event::Load(text.to_string()));
        if let Some(status) = loaded.status() {
            info!("{}", status);
        }

        let mut links = Vec::new();

        for (index, entry) in loaded.entries().iter().enumerate() {
            for variant in entry.available_variants() {
                let state = loaded.reduce_all([
                    Event::SelectEntry(Some(index)),
                    Event::SelectVariant(Some(variant)),
                    Event::SetQuantity(quantity.clone()),
                    Event::Generate,
                ]);

                if let Some(outcome) = state.outcome() {
                    links.push(GeneratedLink {
                        index,
                        name: entry.name.clone(),
                        variant,
                        quantity: state.selection().quantity,
                        outcome: outcome.clone(),
                    });
                }
            }
        }

        links
    }
}
