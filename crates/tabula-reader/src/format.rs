//! Fixed formats applied to structural elements regardless of inline CSS.

use std::str::FromStr;

use strum_macros::{Display, EnumString};
use tabula_css::border::border_side;
use tabula_css::{BorderStyle, Borders, Color, StyleSpec};

/// Hyperlink text color.
pub const LINK_COLOR: &str = "0000ff";

/// Elements with a built-in format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NamedFormat {
    /// `<h1>`
    H1,
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
    /// `<h5>`
    H5,
    /// `<h6>`
    H6,
    /// `<a>`
    #[strum(serialize = "a")]
    Anchor,
    /// `<hr>`
    #[strum(serialize = "hr")]
    HorizontalRule,
}

impl NamedFormat {
    /// The format for a lowercase tag name, if it has one.
    #[must_use]
    pub fn for_tag(tag: &str) -> Option<Self> {
        Self::from_str(tag).ok()
    }

    /// The style this format applies.
    #[must_use]
    pub fn style(self) -> StyleSpec {
        let mut spec = StyleSpec::default();
        match self {
            Self::H1 => heading(&mut spec, 24.0),
            Self::H2 => heading(&mut spec, 18.0),
            Self::H3 => heading(&mut spec, 13.5),
            Self::H4 => heading(&mut spec, 12.0),
            Self::H5 => heading(&mut spec, 10.0),
            Self::H6 => heading(&mut spec, 7.5),
            Self::Anchor => {
                let font = spec.font_mut();
                font.underline = Some(true);
                font.color = Some(Color::from_hex(LINK_COLOR));
            }
            Self::HorizontalRule => {
                spec.borders = Some(Borders {
                    bottom: Some(border_side(BorderStyle::Thin, "000000")),
                    ..Borders::default()
                });
            }
        }
        spec
    }
}

fn heading(spec: &mut StyleSpec, size: f64) {
    let font = spec.font_mut();
    font.bold = Some(true);
    font.size = Some(size);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_map_to_formats() {
        assert_eq!(NamedFormat::for_tag("h3"), Some(NamedFormat::H3));
        assert_eq!(NamedFormat::for_tag("a"), Some(NamedFormat::Anchor));
        assert_eq!(NamedFormat::for_tag("hr"), Some(NamedFormat::HorizontalRule));
        assert_eq!(NamedFormat::for_tag("p"), None);
        assert_eq!(NamedFormat::for_tag("span"), None);
        assert_eq!(NamedFormat::HorizontalRule.to_string(), "hr");
    }

    #[test]
    fn heading_sizes() {
        let sizes: Vec<Option<f64>> = [
            NamedFormat::H1,
            NamedFormat::H2,
            NamedFormat::H3,
            NamedFormat::H4,
            NamedFormat::H5,
            NamedFormat::H6,
        ]
        .into_iter()
        .map(|format| format.style().font.and_then(|font| font.size))
        .collect();
        assert_eq!(
            sizes,
            [Some(24.0), Some(18.0), Some(13.5), Some(12.0), Some(10.0), Some(7.5)]
        );
        assert_eq!(NamedFormat::H6.style().font.unwrap().bold, Some(true));
    }

    #[test]
    fn anchor_and_rule() {
        let anchor = NamedFormat::Anchor.style().font.unwrap();
        assert_eq!(anchor.underline, Some(true));
        assert_eq!(anchor.color, Some(Color::from_hex("0000ff")));

        let borders = NamedFormat::HorizontalRule.style().borders.unwrap();
        assert_eq!(borders.bottom, Some(border_side(BorderStyle::Thin, "000000")));
        assert!(borders.top.is_none());
    }
}
