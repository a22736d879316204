//! Selection state, quantity policy, and the Generate action.

pub mod quantity;
pub mod state;

pub use quantity::{clamp_quantity, max_quantity, parse_quantity};
pub use state::{AppState, Event, GeneratedLink, Outcome, Selection};
