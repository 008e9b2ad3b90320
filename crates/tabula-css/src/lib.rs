//! Inline CSS to spreadsheet style mapping for the Tabula converter.
//!
//! # Scope
//!
//! This crate implements:
//! - **Declaration splitting** - `prop:value;prop:value` blocks as found in
//!   `style` attributes (already flattened by any inlining pass)
//! - **Style model** - [`StyleSpec`], the structured cell style handed to the
//!   grid sink (alignment, font, fill, borders, dimensions)
//! - **Color resolution** - hex codes and the CSS named-color table
//! - **Border styles** - the fixed spreadsheet border enumeration
//!
//! # Not Implemented
//!
//! - Selectors, cascade and specificity (only inline declarations are read)
//! - Properties outside the mapped set; they are carried verbatim in
//!   [`StyleSpec::extra`]

/// Border style keywords and border shorthand parsing.
pub mod border;
/// Color token resolution.
pub mod color;
/// Declaration block splitting.
pub mod declaration;
/// Mapping of declarations onto a [`StyleSpec`].
pub mod mapper;
/// The structured style model.
pub mod style;
/// Numeric value helpers.
pub mod values;

pub use border::{BorderStyle, parse_border_value};
pub use color::{Color, is_hex_digits, lookup_named_color, parse_color, resolve_color};
pub use declaration::{Declaration, parse_declarations};
pub use mapper::{parse_inline_style, parse_style};
pub use style::{
    Alignment, BorderSide, Borders, Dimensions, Fill, FillPattern, FontSpec,
    HorizontalAlignment, StyleSpec, VerticalAlignment,
};
pub use values::{Extent, parse_extent, parse_leading_number};
