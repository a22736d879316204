//! Link generation command implementation.

use crate::catalog::{CatalogSource, Variant};
use crate::commands::catalog_source;
use crate::config::Config;
use crate::format::Formatter;
use crate::link::LinkBuilder;
use crate::selection::{AppState, Event, Outcome};
use anyhow::Result;
use tracing::{debug, info};

/// What the user picked on the command line.
#[derive(Debug, Clone, Default)]
pub struct LinkRequest {
    /// Entry index (0 when not given)
    pub entry: Option<usize>,
    /// Variant override; the entry's default variant otherwise
    pub variant: Option<Variant>,
    /// Raw quantity text; the configured default otherwise
    pub quantity: Option<String>,
}

/// Generates an order confirmation link for one catalog entry.
pub struct LinkCommand {
    config: Config,
}

impl LinkCommand {
    /// Creates a new link command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the configured catalog and generates a link.
    pub async fn execute(&self, request: &LinkRequest) -> Result<String> {
        let source = catalog_source(&self.config);
        self.execute_with_source(source.as_ref(), request).await
    }

    /// Generates a link from a provided source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &dyn CatalogSource,
        request: &LinkRequest,
    ) -> Result<String> {
        let text = source.load().await?;

        let mut state = AppState::new(LinkBuilder::new(self.config.checkout_url.clone()))
            .reduce(Event::Load(text));
        if let Some(status) = state.status() {
            info!("{} from {}", status, source.describe());
        }

        state = state.reduce(Event::SelectEntry(Some(request.entry.unwrap_or(0))));
        if let Some(variant) = request.variant {
            state = state.reduce(Event::SelectVariant(Some(variant)));
        }

        let quantity =
            request.quantity.clone().unwrap_or_else(|| self.config.default_quantity.to_string());
        state = state.reduce_all([Event::SetQuantity(quantity), Event::Generate]);

        debug!("Final selection: {:?}", state.selection());

        let formatter = Formatter::new(self.config.format);
        Ok(state.outcome().map(|o| formatter.format_outcome(o)).unwrap_or_default())
    }

    /// Builds a link straight from a product URL and SKU, without a catalog.
    pub fn execute_direct(&self, product_url: &str, sku_id: &str, count: u32) -> String {
        let builder = LinkBuilder::new(self.config.checkout_url.clone());
        let outcome = Outcome::from(builder.build(product_url, sku_id, count));

        Formatter::new(self.config.format).format_outcome(&outcome)
    }
}
