//! The structured cell style produced by the mapper.
//!
//! Every field is optional: an absent field means "leave the sink's current
//! value alone". Overlaying one spec on another ([`StyleSpec::merge_from`])
//! replaces only the fields the newer spec sets.

use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::border::BorderStyle;
use crate::color::Color;
use crate::values::{Extent, parse_leading_number};

/// [§ 16.2 'text-align'](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    /// Left aligned.
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

/// [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    /// Top of the cell.
    Top,
    /// Vertically centered; CSS `middle`.
    #[strum(to_string = "center", serialize = "middle")]
    Center,
    /// Bottom of the cell.
    Bottom,
}

/// Cell alignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alignment {
    /// Horizontal alignment, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalAlignment>,
    /// Vertical alignment, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalAlignment>,
}

/// Font attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontSpec {
    /// Bold weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Italic style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Single underline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    /// Point size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Text color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Fill pattern. Only solid fills are produced from CSS backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillPattern {
    /// Uniform fill.
    Solid,
}

/// Cell background.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    /// Fill pattern.
    pub pattern: FillPattern,
    /// Fill color.
    pub color: Color,
}

impl Fill {
    /// A solid fill of the given color.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            pattern: FillPattern::Solid,
            color,
        }
    }
}

/// One edge of a cell border.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BorderSide {
    /// Line style; `None` means no recognized style.
    pub style: Option<BorderStyle>,
    /// Line color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// The four cell borders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Borders {
    /// Top edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderSide>,
    /// Right edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderSide>,
    /// Bottom edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderSide>,
    /// Left edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderSide>,
}

impl Borders {
    /// The same side on all four edges.
    #[must_use]
    pub fn all(side: &BorderSide) -> Self {
        Self {
            top: Some(side.clone()),
            right: Some(side.clone()),
            bottom: Some(side.clone()),
            left: Some(side.clone()),
        }
    }
}

/// Requested column width and row height.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dimensions {
    /// Column width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Extent>,
    /// Row height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Extent>,
}

/// A structured cell style.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleSpec {
    /// Alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Font.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontSpec>,
    /// Background fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    /// Borders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Borders>,
    /// Column width / row height requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    /// Declarations the mapper does not interpret, passed through verbatim.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl StyleSpec {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alignment.is_none()
            && self.font.is_none()
            && self.fill.is_none()
            && self.borders.is_none()
            && self.dimensions.is_none()
            && self.extra.is_empty()
    }

    /// Mutable access to the font, creating an empty one if needed.
    pub fn font_mut(&mut self) -> &mut FontSpec {
        self.font.get_or_insert_with(FontSpec::default)
    }

    /// Mutable access to the alignment, creating an empty one if needed.
    pub fn alignment_mut(&mut self) -> &mut Alignment {
        self.alignment.get_or_insert_with(Alignment::default)
    }

    /// Mutable access to the borders, creating an empty set if needed.
    pub fn borders_mut(&mut self) -> &mut Borders {
        self.borders.get_or_insert_with(Borders::default)
    }

    /// Mutable access to the dimensions, creating empty ones if needed.
    pub fn dimensions_mut(&mut self) -> &mut Dimensions {
        self.dimensions.get_or_insert_with(Dimensions::default)
    }

    /// Requested width, if any.
    #[must_use]
    pub fn width(&self) -> Option<Extent> {
        self.dimensions.as_ref().and_then(|d| d.width)
    }

    /// Requested height, if any.
    #[must_use]
    pub fn height(&self) -> Option<Extent> {
        self.dimensions.as_ref().and_then(|d| d.height)
    }

    /// Leading number of a passed-through declaration (`top: 10px` gives 10).
    #[must_use]
    pub fn extra_number(&self, name: &str) -> Option<f64> {
        self.extra.get(name).and_then(|v| parse_leading_number(v))
    }

    /// Overlay `other` on top of `self`, field by field.
    pub fn merge_from(&mut self, other: &Self) {
        if let Some(alignment) = &other.alignment {
            let target = self.alignment_mut();
            overlay(&mut target.horizontal, alignment.horizontal);
            overlay(&mut target.vertical, alignment.vertical);
        }
        if let Some(font) = &other.font {
            let target = self.font_mut();
            overlay(&mut target.bold, font.bold);
            overlay(&mut target.italic, font.italic);
            overlay(&mut target.underline, font.underline);
            overlay(&mut target.size, font.size);
            overlay(&mut target.color, font.color.clone());
        }
        if let Some(fill) = &other.fill {
            self.fill = Some(fill.clone());
        }
        if let Some(borders) = &other.borders {
            let target = self.borders_mut();
            overlay(&mut target.top, borders.top.clone());
            overlay(&mut target.right, borders.right.clone());
            overlay(&mut target.bottom, borders.bottom.clone());
            overlay(&mut target.left, borders.left.clone());
        }
        if let Some(dimensions) = &other.dimensions {
            let target = self.dimensions_mut();
            overlay(&mut target.width, dimensions.width);
            overlay(&mut target.height, dimensions.height);
        }
        self.extra
            .extend(other.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
