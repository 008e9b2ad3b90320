//! In-memory workbook.

use std::collections::BTreeMap;

use serde::Serialize;
use tabula_css::{Extent, StyleSpec};

use crate::coordinate::{CellRange, GridCoordinate};
use crate::sink::{CellWrite, GridSink, ImagePlacement, ImageSink};

/// Longest sheet title a spreadsheet accepts.
pub const MAX_TITLE_LEN: usize = 31;

/// Characters a sheet title may not contain.
const INVALID_TITLE_CHARS: &[char] = &['*', ':', '/', '\\', '?', '[', ']'];

/// One stored cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    /// Cell text; empty for style-only cells.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Accumulated style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleSpec>,
    /// Hyperlink target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
}

/// A single sheet of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Worksheet {
    title: String,
    cells: BTreeMap<GridCoordinate, Cell>,
    merges: Vec<CellRange>,
    column_widths: BTreeMap<u32, Extent>,
    row_heights: BTreeMap<u32, Extent>,
    images: Vec<ImagePlacement>,
}

impl Worksheet {
    /// Create an empty sheet.
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            cells: BTreeMap::new(),
            merges: Vec::new(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            images: Vec::new(),
        }
    }

    /// The sheet title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The cell at `at`, if anything was stored there.
    #[must_use]
    pub fn cell(&self, at: GridCoordinate) -> Option<&Cell> {
        self.cells.get(&at)
    }

    /// The text at `at`, if non-empty.
    #[must_use]
    pub fn value(&self, at: GridCoordinate) -> Option<&str> {
        self.cell(at)
            .map(|cell| cell.value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// All stored cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoordinate, &Cell)> {
        self.cells.iter().map(|(at, cell)| (*at, cell))
    }

    /// Merged regions in the order they were added.
    #[must_use]
    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// Width requested for `column`.
    #[must_use]
    pub fn column_width(&self, column: u32) -> Option<Extent> {
        self.column_widths.get(&column).copied()
    }

    /// Height requested for `row`.
    #[must_use]
    pub fn row_height(&self, row: u32) -> Option<Extent> {
        self.row_heights.get(&row).copied()
    }

    /// Placed images in document order.
    #[must_use]
    pub fn images(&self) -> &[ImagePlacement] {
        &self.images
    }

    /// The smallest range covering every cell holding a value, or `None`
    /// for a sheet without values.
    #[must_use]
    pub fn used_range(&self) -> Option<CellRange> {
        let mut filled = self
            .cells
            .iter()
            .filter(|(_, cell)| !cell.value.is_empty())
            .map(|(at, _)| *at);
        let first = filled.next()?;
        let (mut min, mut max) = (first, first);
        for at in filled {
            min = GridCoordinate::new(min.column.min(at.column), min.row.min(at.row));
            max = GridCoordinate::new(max.column.max(at.column), max.row.max(at.row));
        }
        Some(CellRange::new(min, max))
    }

    /// Values of one row, from column 1 to the last filled column.
    #[must_use]
    pub fn row_values(&self, row: u32) -> Vec<&str> {
        let start = GridCoordinate::new(1, row);
        let end = GridCoordinate::new(u32::MAX, row);
        let mut values = Vec::new();
        for (at, cell) in self.cells.range(start..=end) {
            let Some(index) = (at.column as usize).checked_sub(1) else {
                continue;
            };
            if cell.value.is_empty() {
                continue;
            }
            if values.len() <= index {
                values.resize(index + 1, "");
            }
            values[index] = cell.value.as_str();
        }
        values
    }

    fn cell_mut(&mut self, at: GridCoordinate) -> &mut Cell {
        self.cells.entry(at).or_default()
    }
}

impl GridSink for Worksheet {
    fn write_cell(&mut self, write: CellWrite) {
        let cell = self.cell_mut(write.coordinate);
        cell.value = write.text;
        if let Some(style) = write.style {
            cell.style.get_or_insert_with(StyleSpec::default).merge_from(&style);
        }
    }

    fn apply_style(&mut self, range: CellRange, style: &StyleSpec) {
        if style.is_empty() {
            return;
        }
        for at in range.iter() {
            self.cell_mut(at)
                .style
                .get_or_insert_with(StyleSpec::default)
                .merge_from(style);
        }
    }

    fn merge_cells(&mut self, range: CellRange) {
        if !range.is_single() && !self.merges.contains(&range) {
            self.merges.push(range);
        }
    }

    fn set_hyperlink(&mut self, at: GridCoordinate, url: &str) {
        self.cell_mut(at).hyperlink = Some(url.to_string());
    }

    fn set_column_width(&mut self, column: u32, width: Extent) {
        let _ = self.column_widths.insert(column, width);
    }

    fn set_row_height(&mut self, row: u32, height: Extent) {
        let _ = self.row_heights.insert(row, height);
    }

    /// Invalid characters are removed and the result is cut to
    /// [`MAX_TITLE_LEN`] characters. A title that ends up empty is ignored.
    fn set_title(&mut self, title: &str) {
        let cleaned: String = title
            .trim()
            .chars()
            .filter(|c| !INVALID_TITLE_CHARS.contains(c))
            .take(MAX_TITLE_LEN)
            .collect();
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            self.title = cleaned.to_string();
        }
    }
}

impl ImageSink for Worksheet {
    fn place_image(&mut self, image: ImagePlacement) {
        self.images.push(image);
    }
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
    active: usize,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook {
    /// Create a workbook with one empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sheets: vec![Worksheet::new("Worksheet")],
            active: 0,
        }
    }

    /// Number of sheets.
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet by index.
    #[must_use]
    pub fn sheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    /// All sheets in order.
    #[must_use]
    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    /// The sheet most recently targeted by a conversion.
    #[must_use]
    pub fn active_sheet(&self) -> &Worksheet {
        &self.sheets[self.active]
    }

    /// Index of the active sheet.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Sheet `index`, appending empty sheets until it exists. The sheet
    /// becomes the active one.
    pub fn ensure_sheet(&mut self, index: usize) -> &mut Worksheet {
        while self.sheets.len() <= index {
            let title = format!("Worksheet {}", self.sheets.len());
            self.sheets.push(Worksheet::new(&title));
        }
        self.active = index;
        &mut self.sheets[index]
    }
}
