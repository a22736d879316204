//! CLI command implementations.

pub mod batch;
pub mod link;
pub mod list;

pub use batch::BatchCommand;
pub use link::{LinkCommand, LinkRequest};
pub use list::ListCommand;

use crate::catalog::{source_for, CatalogSource};
use crate::config::Config;

/// Returns the catalog source named by the configuration.
pub(crate) fn catalog_source(config: &Config) -> Box<dyn CatalogSource> {
    source_for(config.catalog.as_deref())
}
