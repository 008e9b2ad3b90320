//! Border style keywords.
//!
//! [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
//!
//! Spreadsheet borders come from a fixed set of line styles rather than the
//! CSS keyword set, so CSS `solid` is folded into `thin` and the spreadsheet
//! specific names (`hair`, `slant-dash-dot`, ...) are accepted directly.

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::color::{Color, is_hex_digits, lookup_named_color, parse_color};
use crate::style::BorderSide;

/// Spreadsheet border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    /// Explicitly no border.
    None,
    /// Thin line; also the mapping for CSS `solid`.
    #[strum(to_string = "thin", serialize = "solid")]
    Thin,
    /// Medium line.
    Medium,
    /// Thick line.
    Thick,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
    /// Double line.
    Double,
    /// Hairline.
    Hair,
    /// Dash-dot pattern.
    DashDot,
    /// Dash-dot-dot pattern.
    DashDotDot,
    /// Medium dashed line.
    MediumDashed,
    /// Medium dash-dot pattern.
    MediumDashDot,
    /// Medium dash-dot-dot pattern.
    MediumDashDotDot,
    /// Slanted dash-dot pattern.
    SlantDashDot,
}

impl BorderStyle {
    /// Resolve a border-style keyword. Unrecognized keywords give `None`
    /// ("no style"), which is not an error.
    #[must_use]
    pub fn resolve(token: &str) -> Option<Self> {
        Self::from_str(token.trim()).ok()
    }
}

/// Parse a border shorthand value such as `1px solid #000`.
///
/// The style is the first token naming a border style; the color is the last
/// token that resolves to a color. Width tokens are ignored: spreadsheet
/// line weight is carried by the style itself.
#[must_use]
pub fn parse_border_value(value: &str) -> BorderSide {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let style = tokens.iter().find_map(|token| BorderStyle::resolve(token));
    let color = tokens
        .iter()
        .rev()
        .filter(|token| looks_like_color(token))
        .find_map(|token| parse_color(token));

    BorderSide { style, color }
}

fn looks_like_color(token: &str) -> bool {
    let bare = token.trim_start_matches('#');
    token.starts_with('#')
        || (is_hex_digits(bare) && matches!(bare.len(), 3 | 6))
        || lookup_named_color(token).is_some()
        || token.to_ascii_lowercase().starts_with("rgb")
}

/// Convenience for tests and callers that need a fully specified side.
#[must_use]
pub fn border_side(style: BorderStyle, color: &str) -> BorderSide {
    BorderSide {
        style: Some(style),
        color: Some(Color::from_hex(color)),
    }
}
