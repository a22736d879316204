//! Catalog models, the row parser, and catalog text sources.

pub mod models;
pub mod parser;
pub mod source;

pub use models::{normalize_sku, Entry, Variant};
pub use parser::{parse, parse_with_report, ParseReport};
pub use source::{source_for, BundledCatalog, CatalogSource, FileCatalog, StdinCatalog};
