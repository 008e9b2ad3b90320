//! Numeric value helpers.
//!
//! Lengths are read by taking the leading number and discarding the unit, so
//! `12px`, `12pt` and `12` all yield `12.0`. No unit conversion happens.

use serde::{Serialize, Serializer};

/// A column width or row height request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Size to fit the content.
    Auto,
    /// Explicit size, unit stripped.
    Fixed(f64),
}

impl Serialize for Extent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Fixed(value) => serializer.serialize_f64(*value),
        }
    }
}

/// Parse the leading decimal number of `value`, ignoring any unit suffix.
///
/// Returns `None` when the value does not start with a number.
#[must_use]
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let value = value.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    value[..end].trim_end_matches('.').parse().ok()
}

/// Parse a `width`/`height` value: `auto` or a number with optional unit.
#[must_use]
pub fn parse_extent(value: &str) -> Option<Extent> {
    if value.trim().eq_ignore_ascii_case("auto") {
        Some(Extent::Auto)
    } else {
        parse_leading_number(value).map(Extent::Fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_strips_units() {
        assert_eq!(parse_leading_number("12px"), Some(12.0));
        assert_eq!(parse_leading_number(" 13.5pt"), Some(13.5));
        assert_eq!(parse_leading_number("-4"), Some(-4.0));
        assert_eq!(parse_leading_number("7."), Some(7.0));
        assert_eq!(parse_leading_number(".5em"), Some(0.5));
        assert_eq!(parse_leading_number("large"), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number(""), None);
    }

    #[test]
    fn extent_accepts_auto() {
        assert_eq!(parse_extent("AUTO"), Some(Extent::Auto));
        assert_eq!(parse_extent("120px"), Some(Extent::Fixed(120.0)));
        assert_eq!(parse_extent("wide"), None);
    }
}
