//! popmart-deeplink - Turn a product catalog into buy-now order confirmation links
//!
//! Parses a lenient comma-delimited catalog, tracks the user's product, variant
//! and quantity choice, and builds POP MART order confirmation deep links.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod link;
pub mod selection;

pub use catalog::{parse, parse_with_report, Entry, Variant};
pub use config::Config;
pub use error::LinkError;
pub use link::{build_link, LinkBuilder};
pub use selection::{AppState, Event, Outcome};
