//! Quantity limits per variant.

use crate::catalog::Variant;

/// Largest quantity allowed for an optional variant (1 when nothing is selected).
pub fn max_quantity(variant: Option<Variant>) -> u32 {
    variant.map(|v| v.max_quantity()).unwrap_or(1)
}

/// Clamps a requested quantity into `[1, max_quantity(variant)]`.
pub fn clamp_quantity(requested: i64, variant: Option<Variant>) -> u32 {
    let max = max_quantity(variant);
    requested.clamp(1, i64::from(max)) as u32
}

/// Reads a quantity from user text. Non-numeric input counts as 1.
///
/// Digit strings too large for `i64` saturate instead of falling back to 1.
pub fn parse_quantity(input: &str) -> i64 {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if negative {
            i64::MIN
        } else {
            i64::MAX
        }
    } else {
        1
    }
}
