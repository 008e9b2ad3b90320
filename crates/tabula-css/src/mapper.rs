//! Mapping of inline declarations onto a [`StyleSpec`].
//!
//! | property | effect |
//! |---|---|
//! | `text-align` | horizontal alignment (left, center, right) |
//! | `vertical-align` | vertical alignment (top, middle, bottom) |
//! | `background-color`, `background` | solid fill |
//! | `font-size` | font size, unit stripped |
//! | `font-weight` | bold (also italic / underline flags) |
//! | `color` | font color |
//! | `border` | all four sides |
//! | `border-top`, `-right`, `-bottom`, `-left` | one side |
//! | `width`, `height` | column width / row height |
//!
//! Anything else is stored untouched in [`StyleSpec::extra`].

use std::str::FromStr;

use tabula_common::warning::warn_once;

use crate::border::parse_border_value;
use crate::color::parse_color;
use crate::declaration::parse_declarations;
use crate::style::{Borders, Fill, HorizontalAlignment, StyleSpec, VerticalAlignment};
use crate::values::{parse_extent, parse_leading_number};

/// Parse several declaration blocks into one style. Later blocks override
/// earlier ones field by field.
#[must_use]
pub fn parse_style(blocks: &[&str]) -> StyleSpec {
    let mut spec = StyleSpec::default();
    for block in blocks {
        spec.merge_from(&parse_inline_style(block));
    }
    spec
}

/// Parse one `prop:value;prop:value` block.
///
/// Declarations are applied in source order, so a later duplicate wins.
#[must_use]
pub fn parse_inline_style(block: &str) -> StyleSpec {
    let mut spec = StyleSpec::default();
    for decl in parse_declarations(block) {
        apply_declaration(&mut spec, &decl.name, &decl.value);
    }
    spec
}

fn apply_declaration(spec: &mut StyleSpec, name: &str, value: &str) {
    match name {
        "text-align" => match HorizontalAlignment::from_str(value) {
            Ok(horizontal) => spec.alignment_mut().horizontal = Some(horizontal),
            Err(_) => warn_once("css", &format!("unsupported text-align value '{value}'")),
        },
        "vertical-align" => match VerticalAlignment::from_str(value) {
            Ok(vertical) => spec.alignment_mut().vertical = Some(vertical),
            Err(_) => warn_once("css", &format!("unsupported vertical-align value '{value}'")),
        },
        "background-color" | "background" => {
            // The shorthand may carry images and positions; take its color.
            let color = parse_color(value)
                .or_else(|| value.split_whitespace().find_map(parse_color));
            match color {
                Some(color) => spec.fill = Some(Fill::solid(color)),
                None => warn_once("css", &format!("no color found in {name} '{value}'")),
            }
        }
        "font-size" => match parse_leading_number(value) {
            Some(size) => spec.font_mut().size = Some(size),
            None => warn_once("css", &format!("unsupported font-size value '{value}'")),
        },
        "font-weight" => apply_font_weight(spec, value),
        "color" => match parse_color(value) {
            Some(color) => spec.font_mut().color = Some(color),
            None => warn_once("css", &format!("unresolvable color '{value}'")),
        },
        "border" => {
            spec.borders = Some(Borders::all(&parse_border_value(value)));
        }
        "border-top" => spec.borders_mut().top = Some(parse_border_value(value)),
        "border-right" => spec.borders_mut().right = Some(parse_border_value(value)),
        "border-bottom" => spec.borders_mut().bottom = Some(parse_border_value(value)),
        "border-left" => spec.borders_mut().left = Some(parse_border_value(value)),
        "width" | "height" => match parse_extent(value) {
            Some(extent) if name == "width" => spec.dimensions_mut().width = Some(extent),
            Some(extent) => spec.dimensions_mut().height = Some(extent),
            None => warn_once("css", &format!("unsupported {name} value '{value}'")),
        },
        _ => {
            let _ = spec.extra.insert(name.to_string(), value.to_string());
        }
    }
}

/// [§ 3.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// The keyword itself names the font flag to switch on, so `bold`, `italic`
/// and `underline` are all honored here. Numeric weights of 600 and above
/// count as bold.
fn apply_font_weight(spec: &mut StyleSpec, value: &str) {
    let keyword = value.trim().to_ascii_lowercase();
    match keyword.as_str() {
        "bold" | "bolder" => spec.font_mut().bold = Some(true),
        "normal" | "lighter" => spec.font_mut().bold = Some(false),
        "italic" => spec.font_mut().italic = Some(true),
        "underline" => spec.font_mut().underline = Some(true),
        other => match parse_leading_number(other) {
            Some(weight) => spec.font_mut().bold = Some(weight >= 600.0),
            None => warn_once("css", &format!("unsupported font-weight value '{value}'")),
        },
    }
}
