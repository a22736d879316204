//! Product reference extraction and order confirmation link building.

pub mod builder;

pub use builder::{build_link, LinkBuilder, ProductRef, DEFAULT_CHECKOUT_URL};
