//! Output seams of the converter.
//!
//! A conversion produces three kinds of output: cell writes with optional
//! styles, structural edits (merges, dimensions, hyperlinks, the sheet
//! title) and image placements. Implementors decide how these map onto a
//! concrete spreadsheet object model.

use std::path::PathBuf;

use serde::Serialize;
use tabula_css::{Extent, StyleSpec};

use crate::coordinate::{CellRange, GridCoordinate};

/// A committed cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellWrite {
    /// Target cell.
    pub coordinate: GridCoordinate,
    /// Text written verbatim.
    pub text: String,
    /// Style to apply along with the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleSpec>,
}

/// An image anchored to a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlacement {
    /// Anchor cell (top-left corner of the image).
    pub coordinate: GridCoordinate,
    /// Local file holding the image bytes.
    pub path: PathBuf,
    /// Display name, taken from the `alt` text.
    pub name: String,
    /// Horizontal offset from the anchor cell, in pixels.
    pub offset_x: i32,
    /// Vertical offset from the anchor cell, in pixels.
    pub offset_y: i32,
    /// Requested width, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Requested height, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Whether setting one dimension scales the other.
    pub resize_proportional: bool,
}

/// Receiver of cell content and structure.
pub trait GridSink {
    /// Store a value (and its style, if any) in a cell.
    fn write_cell(&mut self, write: CellWrite);

    /// Overlay `style` onto every cell of `range`.
    fn apply_style(&mut self, range: CellRange, style: &StyleSpec);

    /// Merge `range` into one cell.
    fn merge_cells(&mut self, range: CellRange);

    /// Attach a hyperlink target to a cell.
    fn set_hyperlink(&mut self, at: GridCoordinate, url: &str);

    /// Set a column width; [`Extent::Auto`] requests autosizing.
    fn set_column_width(&mut self, column: u32, width: Extent);

    /// Set a row height; [`Extent::Auto`] requests autosizing.
    fn set_row_height(&mut self, row: u32, height: Extent);

    /// Set the display name of the sheet.
    fn set_title(&mut self, title: &str);
}

/// Receiver of image placements.
pub trait ImageSink {
    /// Anchor an image to the grid.
    fn place_image(&mut self, image: ImagePlacement);
}

/// A single target accepting both cells and images.
pub trait SheetSink: GridSink + ImageSink {}

impl<T: GridSink + ImageSink + ?Sized> SheetSink for T {}
