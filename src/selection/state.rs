//! Immutable selection state and its transitions.
//!
//! Every user action is an [`Event`]; [`AppState::reduce`] returns a new state
//! and leaves the old one untouched.

use crate::catalog::{parse_with_report, Entry, Variant};
use crate::error::LinkError;
use crate::link::LinkBuilder;
use crate::selection::quantity::{clamp_quantity, parse_quantity};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Current entry, variant, and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Index into the entry list
    pub entry: Option<usize>,
    /// Chosen purchase variant
    pub variant: Option<Variant>,
    /// Quantity, always within the variant's bounds
    pub quantity: u32,
}

impl Selection {
    /// Selection with nothing chosen.
    pub fn empty() -> Self {
        Self { entry: None, variant: None, quantity: 1 }
    }

    /// Default selection for entry `index` of `entries`.
    fn for_entry(entries: &[Entry], index: Option<usize>) -> Self {
        match index.and_then(|i| entries.get(i).map(|e| (i, e))) {
            Some((i, entry)) => {
                Self { entry: Some(i), variant: entry.default_variant(), quantity: 1 }
            }
            None => Self::empty(),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::empty()
    }
}

/// Result of the Generate action as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Outcome {
    Link(String),
    Error(String),
}

impl Outcome {
    /// Returns true if this outcome is a failure message.
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

impl From<Result<String, LinkError>> for Outcome {
    fn from(result: Result<String, LinkError>) -> Self {
        match result {
            Ok(link) => Outcome::Link(link),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Link(link) => write!(f, "{}", link),
            Outcome::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Outcome of generating a link for one entry and variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedLink {
    /// Entry index in the catalog
    pub index: usize,
    /// Entry display name
    pub name: String,
    /// Variant the link was built for
    pub variant: Variant,
    /// Clamped quantity
    pub quantity: u32,
    /// Link or error message
    pub outcome: Outcome,
}

impl GeneratedLink {
    /// Returns the link, or `None` if generation failed.
    pub fn link(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Link(link) => Some(link),
            Outcome::Error(_) => None,
        }
    }
}

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Replace the catalog with freshly parsed text
    Load(String),
    /// Choose an entry by index, or clear the choice
    SelectEntry(Option<usize>),
    /// Choose a variant, or clear the choice
    SelectVariant(Option<Variant>),
    /// Set the quantity from user text
    SetQuantity(String),
    /// Generate a link from the current selection
    Generate,
}

/// Entries, selection, and the last outcome.
#[derive(Debug, Clone)]
pub struct AppState {
    builder: LinkBuilder,
    entries: Vec<Entry>,
    selection: Selection,
    outcome: Option<Outcome>,
    status: Option<String>,
}

impl AppState {
    /// Creates an empty state that builds links with `builder`.
    pub fn new(builder: LinkBuilder) -> Self {
        Self {
            builder,
            entries: Vec::new(),
            selection: Selection::empty(),
            outcome: None,
            status: None,
        }
    }

    /// Loaded entries in file order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Last Generate outcome.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Transient status message from the last load.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The selected entry, if any.
    pub fn current_entry(&self) -> Option<&Entry> {
        self.selection.entry.and_then(|i| self.entries.get(i))
    }

    /// Applies an event and returns the resulting state.
    pub fn reduce(&self, event: Event) -> AppState {
        let mut next = self.clone();

        match event {
            Event::Load(text) => {
                let report = parse_with_report(&text);
                let default_index = if report.entries.is_empty() { None } else { Some(0) };

                next.selection = Selection::for_entry(&report.entries, default_index);
                next.status = Some(format!(
                    "Loaded {} products ({} skipped)",
                    report.entries.len(),
                    report.skipped
                ));
                next.entries = report.entries;
                next.outcome = None;
            }
            Event::SelectEntry(index) => {
                next.selection = Selection::for_entry(&next.entries, index);
            }
            Event::SelectVariant(variant) => {
                next.selection.variant = variant;
                next.selection.quantity = 1;
            }
            Event::SetQuantity(input) => {
                next.selection.quantity =
                    clamp_quantity(parse_quantity(&input), next.selection.variant);
            }
            Event::Generate => {
                next.outcome = Some(Outcome::from(self.generate()));
            }
        }

        debug!("Selection: {:?}", next.selection);
        next
    }

    /// Applies events in order.
    pub fn reduce_all(&self, events: impl IntoIterator<Item = Event>) -> AppState {
        events.into_iter().fold(self.clone(), |state, event| state.reduce(event))
    }

    /// Builds a link from the current selection without changing state.
    pub fn generate(&self) -> Result<String, LinkError> {
        let entry = self.current_entry().ok_or(LinkError::NoEntrySelected)?;
        let variant = self.selection.variant.ok_or(LinkError::NoVariantSelected)?;
        let sku = entry
            .sku(variant)
            .ok_or_else(|| LinkError::MissingSku { name: entry.name.clone(), variant })?;

        let quantity = clamp_quantity(i64::from(self.selection.quantity), Some(variant));
        self.builder.build(&entry.url, sku, quantity)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LinkBuilder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "Name,URL,skuid_single,skuid_set
Labubu V3, https://www.popmart.com/vn/products/6890/THE-MONSTERS, 10528, 10529
Crybaby,https://www.popmart.com/vn/products/2457/CRYBABY,null,4104
Nothing,https://www.popmart.com/vn/products/77/Plain,,
Collection,https://www.popmart.com/vn/collection/45/Blind-Box,9,
broken row";

    fn loaded() -> AppState {
        AppState::default().reduce(Event::Load(CATALOG.to_string()))
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert!(state.entries().is_empty());
        assert_eq!(state.selection(), &Selection::empty());
        assert!(state.outcome().is_none());
        assert!(state.status().is_none());
    }

    #[test]
    fn test_load_selects_first_entry() {
        let state = loaded();
        assert_eq!(state.entries().len(), 4);
        assert_eq!(state.selection().entry, Some(0));
        assert_eq!(state.selection().variant, Some(Variant::Single));
        assert_eq!(state.selection().quantity, 1);
        assert_eq!(state.status(), Some("Loaded 4 products (1 skipped)"));
    }

    #[test]
    fn test_load_empty_catalog_clears_selection() {
        let state = loaded().reduce(Event::Load("Name,URL".to_string()));
        assert!(state.entries().is_empty());
        assert_eq!(state.selection(), &Selection::empty());
    }

    #[test]
    fn test_load_resets_selection_and_outcome() {
        let state = loaded().reduce_all([
            Event::SelectEntry(Some(1)),
            Event::SetQuantity("2".to_string()),
            Event::Generate,
        ]);
        assert!(state.outcome().is_some());

        let reloaded = state.reduce(Event::Load(CATALOG.to_string()));
        assert_eq!(reloaded.selection().entry, Some(0));
        assert_eq!(reloaded.selection().variant, Some(Variant::Single));
        assert_eq!(reloaded.selection().quantity, 1);
        assert!(reloaded.outcome().is_none());
    }

    #[test]
    fn test_reduce_leaves_previous_state_untouched() {
        let before = loaded();
        let after = before.reduce(Event::SelectEntry(Some(1)));
        assert_eq!(before.selection().entry, Some(0));
        assert_eq!(after.selection().entry, Some(1));
    }

    #[test]
    fn test_select_entry_with_set_only_picks_set() {
        let state = loaded().reduce(Event::SelectEntry(Some(1)));
        assert_eq!(state.selection().variant, Some(Variant::Set));
        assert_eq!(state.selection().quantity, 1);
    }

    #[test]
    fn test_select_entry_without_skus_picks_nothing() {
        let state = loaded().reduce(Event::SelectEntry(Some(2)));
        assert_eq!(state.selection().entry, Some(2));
        assert!(state.selection().variant.is_none());
    }

    #[test]
    fn test_select_entry_resets_quantity() {
        let state = loaded().reduce_all([
            Event::SetQuantity("20".to_string()),
            Event::SelectEntry(Some(0)),
        ]);
        assert_eq!(state.selection().quantity, 1);
    }

    #[test]
    fn test_select_entry_out_of_range() {
        let state = loaded().reduce(Event::SelectEntry(Some(99)));
        assert_eq!(state.selection(), &Selection::empty());
        assert!(state.current_entry().is_none());
    }

    #[test]
    fn test_select_variant_resets_quantity() {
        let state = loaded().reduce_all([
            Event::SetQuantity("10".to_string()),
            Event::SelectVariant(Some(Variant::Set)),
        ]);
        assert_eq!(state.selection().variant, Some(Variant::Set));
        assert_eq!(state.selection().quantity, 1);
    }

    #[test]
    fn test_set_quantity_clamps() {
        let state = loaded().reduce(Event::SetQuantity("100".to_string()));
        assert_eq!(state.selection().quantity, 28);

        let state = state.reduce(Event::SetQuantity("0".to_string()));
        assert_eq!(state.selection().quantity, 1);

        let state = state.reduce(Event::SetQuantity("lots".to_string()));
        assert_eq!(state.selection().quantity, 1);

        let state = loaded().reduce_all([
            Event::SelectVariant(Some(Variant::Set)),
            Event::SetQuantity("5".to_string()),
        ]);
        assert_eq!(state.selection().quantity, 2);

        let state = loaded().reduce_all([
            Event::SelectVariant(None),
            Event::SetQuantity("5".to_string()),
        ]);
        assert_eq!(state.selection().quantity, 1);
    }

    #[test]
    fn test_generate_end_to_end() {
        let input = "Name,URL,skuid_single,skuid_set\nLabubu V3, https://www.popmart.com/vn/products/6890/THE-MONSTERS, 10528, 10529";
        let state = AppState::default().reduce_all([
            Event::Load(input.to_string()),
            Event::SelectEntry(Some(0)),
            Event::SelectVariant(Some(Variant::Single)),
            Event::SetQuantity("3".to_string()),
            Event::Generate,
        ]);

        let outcome = state.outcome().unwrap();
        assert!(!outcome.is_error());
        assert!(outcome.to_string().contains("spuId=6890&skuId=10528&count=3"));
        assert!(outcome.to_string().ends_with("spuTitle=the-monsters"));
    }

    #[test]
    fn test_generate_set_variant() {
        let state = loaded().reduce_all([
            Event::SelectEntry(Some(1)),
            Event::SetQuantity("2".to_string()),
            Event::Generate,
        ]);
        assert_eq!(
            state.outcome(),
            Some(&Outcome::Link(
                "https://www.popmart.com/vn/order-confirmation?spuId=2457&skuId=4104&count=2&spuTitle=crybaby"
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_generate_no_entry() {
        let state = AppState::default();
        assert_eq!(state.generate(), Err(LinkError::NoEntrySelected));

        let state = state.reduce(Event::Generate);
        assert_eq!(state.outcome(), Some(&Outcome::Error("no product selected".to_string())));
        assert_eq!(state.outcome().unwrap().to_string(), "Error: no product selected");
    }

    #[test]
    fn test_generate_no_variant() {
        let state = loaded().reduce(Event::SelectEntry(Some(2)));
        assert_eq!(state.generate(), Err(LinkError::NoVariantSelected));
    }

    #[test]
    fn test_generate_missing_sku() {
        let state = loaded().reduce_all([
            Event::SelectEntry(Some(1)),
            Event::SelectVariant(Some(Variant::Single)),
        ]);
        assert_eq!(
            state.generate(),
            Err(LinkError::MissingSku { name: "Crybaby".to_string(), variant: Variant::Single })
        );
    }

    #[test]
    fn test_generate_propagates_link_errors() {
        let state = loaded().reduce_all([Event::SelectEntry(Some(3)), Event::Generate]);
        let outcome = state.outcome().unwrap();
        assert!(outcome.is_error());
        assert!(outcome.to_string().starts_with("Error: no /products/{id}/ segment"));
    }

    #[test]
    fn test_generate_uses_configured_builder() {
        let builder = LinkBuilder::new("https://example.com/checkout");
        let state = AppState::new(builder)
            .reduce_all([Event::Load(CATALOG.to_string()), Event::Generate]);
        let link = state.outcome().unwrap().to_string();
        assert!(link.starts_with("https://example.com/checkout?spuId=6890"));
    }

    #[test]
    fn test_generated_link_accessor() {
        let ok = GeneratedLink {
            index: 0,
            name: "Labubu V3".to_string(),
            variant: Variant::Single,
            quantity: 1,
            outcome: Outcome::Link("https://x".to_string()),
        };
        assert_eq!(ok.link(), Some("https://x"));

        let failed =
            GeneratedLink { outcome: Outcome::Error("no variant selected".to_string()), ..ok };
        assert!(failed.link().is_none());
    }

    #[test]
    fn test_outcome_serde() {
        let json = serde_json::to_string(&Outcome::Link("https://x".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"link","value":"https://x"}"#);
    }
}
