//! Integration tests for inline style mapping.

use tabula_css::border::border_side;
use tabula_css::{
    BorderStyle, Color, Extent, HorizontalAlignment, StyleSpec, VerticalAlignment, parse_color,
    parse_inline_style, parse_style, resolve_color,
};

#[test]
fn test_resolve_color_expands_three_digit_codes() {
    assert_eq!(resolve_color("f0a"), "f0af0a");
    assert_eq!(resolve_color("#abc"), "abcabc");
}

#[test]
fn test_resolve_color_keeps_six_digit_codes() {
    assert_eq!(resolve_color("FF00AA"), "FF00AA");
    assert_eq!(resolve_color("#00ff00"), "00ff00");
}

#[test]
fn test_resolve_color_uses_named_table() {
    assert_eq!(resolve_color("red"), "ff0000");
    assert_eq!(resolve_color("AliceBlue"), "f0f8ff");
    assert_eq!(resolve_color("rebeccapurple"), "663399");
}

#[test]
fn test_resolve_color_passes_unknown_names_through() {
    assert_eq!(resolve_color("notacolor"), "notacolor");
    assert_eq!(parse_color("notacolor"), None);
}

#[test]
fn test_border_style_resolution() {
    assert_eq!(BorderStyle::resolve("solid"), Some(BorderStyle::Thin));
    assert_eq!(BorderStyle::resolve("thin"), Some(BorderStyle::Thin));
    assert_eq!(BorderStyle::resolve("DASHED"), Some(BorderStyle::Dashed));
    assert_eq!(
        BorderStyle::resolve("medium-dash-dot-dot"),
        Some(BorderStyle::MediumDashDotDot)
    );
    assert_eq!(BorderStyle::resolve("slant-dash-dot"), Some(BorderStyle::SlantDashDot));
    assert_eq!(BorderStyle::resolve("none"), Some(BorderStyle::None));
    assert_eq!(BorderStyle::resolve("groove"), None);
    assert_eq!(BorderStyle::Thin.to_string(), "thin");
    assert_eq!(BorderStyle::DashDotDot.to_string(), "dash-dot-dot");
}

#[test]
fn test_alignment() {
    let spec = parse_inline_style("text-align: center; vertical-align: middle");
    let alignment = spec.alignment.unwrap();
    assert_eq!(alignment.horizontal, Some(HorizontalAlignment::Center));
    assert_eq!(alignment.vertical, Some(VerticalAlignment::Center));
}

#[test]
fn test_unsupported_alignment_is_ignored() {
    let spec = parse_inline_style("text-align: justify");
    assert!(spec.alignment.is_none());
    assert!(spec.extra.is_empty());
}

#[test]
fn test_background_fills() {
    let spec = parse_inline_style("background-color: #ccc");
    assert_eq!(spec.fill.unwrap().color, Color::from_hex("cccccc"));

    let spec = parse_inline_style("background: url(x.png) no-repeat yellow");
    assert_eq!(spec.fill.unwrap().color, Color::from_hex("ffff00"));
}

#[test]
fn test_font_properties() {
    let spec = parse_inline_style("font-size: 14px; font-weight: bold; color: navy");
    let font = spec.font.unwrap();
    assert_eq!(font.size, Some(14.0));
    assert_eq!(font.bold, Some(true));
    assert_eq!(font.color, Some(Color::from_hex("000080")));
}

#[test]
fn test_font_weight_flags() {
    assert_eq!(parse_inline_style("font-weight: 700").font.unwrap().bold, Some(true));
    assert_eq!(parse_inline_style("font-weight: 400").font.unwrap().bold, Some(false));
    assert_eq!(parse_inline_style("font-weight: italic").font.unwrap().italic, Some(true));
    assert!(parse_inline_style("font-weight: heavy").font.is_none());
}

#[test]
fn test_border_shorthand_applies_to_all_sides() {
    let spec = parse_inline_style("border: 1px solid #000");
    let borders = spec.borders.unwrap();
    let expected = border_side(BorderStyle::Thin, "000000");
    assert_eq!(borders.top.as_ref(), Some(&expected));
    assert_eq!(borders.right.as_ref(), Some(&expected));
    assert_eq!(borders.bottom.as_ref(), Some(&expected));
    assert_eq!(borders.left.as_ref(), Some(&expected));
}

#[test]
fn test_border_side_overrides_one_edge() {
    let spec = parse_inline_style("border: thin solid black; border-bottom: double red");
    let borders = spec.borders.unwrap();
    assert_eq!(borders.top, Some(border_side(BorderStyle::Thin, "000000")));
    assert_eq!(borders.bottom, Some(border_side(BorderStyle::Double, "ff0000")));
}

#[test]
fn test_single_border_side_leaves_others_unset() {
    let spec = parse_inline_style("border-left: dotted blue");
    let borders = spec.borders.unwrap();
    assert_eq!(borders.left, Some(border_side(BorderStyle::Dotted, "0000ff")));
    assert!(borders.top.is_none());
    assert!(borders.right.is_none());
    assert!(borders.bottom.is_none());
}

#[test]
fn test_unrecognized_border_style_has_no_style() {
    let spec = parse_inline_style("border: 2px groove #123456");
    let top = spec.borders.unwrap().top.unwrap();
    assert_eq!(top.style, None);
    assert_eq!(top.color, Some(Color::from_hex("123456")));
}

#[test]
fn test_dimensions() {
    let spec = parse_inline_style("width: 120px; height: auto");
    assert_eq!(spec.width(), Some(Extent::Fixed(120.0)));
    assert_eq!(spec.height(), Some(Extent::Auto));
}

#[test]
fn test_unknown_properties_pass_through() {
    let spec = parse_inline_style("top: 10px; left:5px; mso-number-format: '0.00'");
    assert_eq!(spec.extra.get("top").map(String::as_str), Some("10px"));
    assert_eq!(spec.extra_number("left"), Some(5.0));
    assert_eq!(
        spec.extra.get("mso-number-format").map(String::as_str),
        Some("'0.00'")
    );
    assert!(spec.font.is_none());
}

#[test]
fn test_later_blocks_override_earlier() {
    let spec = parse_style(&["color: red; font-size: 10pt", "color: blue"]);
    let font = spec.font.unwrap();
    assert_eq!(font.color, Some(Color::from_hex("0000ff")));
    assert_eq!(font.size, Some(10.0));
}

#[test]
fn test_empty_block_is_empty_spec() {
    assert!(parse_inline_style("").is_empty());
    assert!(parse_style(&[]).is_empty());
    assert_eq!(parse_inline_style(" ; "), StyleSpec::default());
}

#[test]
fn test_style_serializes_without_unset_fields() {
    let spec = parse_inline_style("font-weight: bold; width: auto");
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "font": { "bold": true },
            "dimensions": { "width": "auto" }
        })
    );
}
