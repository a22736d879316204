//! Errors raised while generating a checkout link.

use crate::catalog::Variant;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("invalid product URL \"{url}\"")]
    InvalidUrl { url: String },

    #[error("no /products/{{id}}/ segment in \"{url}\"")]
    MissingProductId { url: String },

    #[error("no product selected")]
    NoEntrySelected,

    #[error("no variant selected")]
    NoVariantSelected,

    #[error("product \"{name}\" has no SKU for the {variant} variant")]
    MissingSku { name: String, variant: Variant },
}
