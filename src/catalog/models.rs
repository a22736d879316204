//! Data models for catalog entries and purchase variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One purchasable product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display name (may be empty)
    pub name: String,
    /// Product page URL, always starting with http:// or https://
    pub url: String,
    /// SKU for the single item variant
    pub sku_single: Option<String>,
    /// SKU for the bundle/set variant
    pub sku_set: Option<String>,
}

impl Entry {
    /// Creates an entry, normalizing both raw SKU fields.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        raw_single: &str,
        raw_set: &str,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            sku_single: normalize_sku(raw_single),
            sku_set: normalize_sku(raw_set),
        }
    }

    /// Returns the SKU for the given variant, if present.
    pub fn sku(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::Single => self.sku_single.as_deref(),
            Variant::Set => self.sku_set.as_deref(),
        }
    }

    /// Returns the variant picked by default when this entry is selected.
    pub fn default_variant(&self) -> Option<Variant> {
        if self.sku_single.is_some() {
            Some(Variant::Single)
        } else if self.sku_set.is_some() {
            Some(Variant::Set)
        } else {
            None
        }
    }

    /// Returns the variants that carry a SKU, single first.
    pub fn available_variants(&self) -> Vec<Variant> {
        Variant::all().iter().copied().filter(|v| self.sku(*v).is_some()).collect()
    }
}

/// Normalizes a raw SKU field.
///
/// All whitespace is stripped; an empty result or the token `null` (any case)
/// means the SKU is absent.
pub fn normalize_sku(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() || stripped.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(stripped)
    }
}

/// Purchase variant of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Single,
    Set,
}

impl Variant {
    /// Largest quantity allowed for this variant.
    pub fn max_quantity(&self) -> u32 {
        match self {
            Variant::Single => 28,
            Variant::Set => 2,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Single => "Single box",
            Variant::Set => "Whole set",
        }
    }

    /// Returns all variants.
    pub fn all() -> &'static [Variant] {
        &[Variant::Single, Variant::Set]
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Single => write!(f, "single"),
            Variant::Set => write!(f, "set"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "s" => Ok(Variant::Single),
            "set" | "bundle" => Ok(Variant::Set),
            _ => Err(format!("Unknown variant: {}. Use: single, set", s)),
        }
    }
}
