//! Mutable traversal state.
//!
//! One [`ConversionState`] belongs to one conversion and is threaded through
//! every recursive call by exclusive reference.

use std::mem;

use tabula_common::warning::warn_once;
use tabula_css::StyleSpec;
use tabula_grid::GridCoordinate;

use crate::merge::MergeTracker;

/// A styled fragment of rich text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Run text.
    pub text: String,
    /// Inline style of the run.
    pub style: StyleSpec,
}

/// Pending text of the cell under construction.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Concatenated plain text; the common case.
    PlainText(String),
    /// Styled runs. Reserved: the converter accumulates plain text only.
    RichRuns(Vec<TextRun>),
}

impl Default for CellContent {
    fn default() -> Self {
        Self::PlainText(String::new())
    }
}

impl CellContent {
    /// Append text. Rich content does not accept plain text; the text is
    /// dropped with a warning.
    pub fn push_text(&mut self, text: &str) {
        match self {
            Self::PlainText(buffer) => buffer.push_str(text),
            Self::RichRuns(_) => warn_once(
                "reader",
                "text appended to rich text content is not supported and was dropped",
            ),
        }
    }

    /// All text, runs concatenated.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::PlainText(buffer) => buffer.clone(),
            Self::RichRuns(runs) => runs.iter().map(|run| run.text.as_str()).collect(),
        }
    }

    /// No characters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::PlainText(buffer) => buffer.is_empty(),
            Self::RichRuns(runs) => runs.iter().all(|run| run.text.is_empty()),
        }
    }

    /// Nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::PlainText(buffer) => buffer.trim().is_empty(),
            Self::RichRuns(runs) => runs.iter().all(|run| run.text.trim().is_empty()),
        }
    }

    /// Take the content, leaving an empty plain-text buffer.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Reset to an empty plain-text buffer.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Bookkeeping for one open table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFrame {
    /// Column each row of the table starts at.
    pub start_column: u32,
    /// Row of the cell hosting the table (the table's first row).
    pub parent_row: u32,
    /// Rightmost column any cell of the table reached, nested tables
    /// included. Zero until a cell is placed.
    pub rightmost_column: u32,
    /// Last row covered by the table or tables nested in its current row.
    pub row_extent: u32,
}

impl TableFrame {
    /// The implicit frame of the document outside any table.
    pub const DOCUMENT: Self = Self {
        start_column: 1,
        parent_row: 1,
        rightmost_column: 0,
        row_extent: 0,
    };

    /// A table opened outside any other table. It always starts in the
    /// first column.
    #[must_use]
    pub const fn top_level(row: u32) -> Self {
        Self {
            start_column: 1,
            parent_row: row,
            rightmost_column: 0,
            row_extent: 0,
        }
    }

    /// A table opened inside the cell at `host`. It starts on the host row,
    /// one column to the right.
    #[must_use]
    pub const fn nested(host: GridCoordinate) -> Self {
        Self {
            start_column: host.column + 1,
            parent_row: host.row,
            rightmost_column: host.column,
            row_extent: host.row,
        }
    }
}

/// Cursor, table stack, content buffer and occupied cells of a conversion.
#[derive(Debug)]
pub struct ConversionState {
    /// Current row (1-based).
    pub row: u32,
    /// Current column (1-based).
    pub column: u32,
    /// Buffer accumulating the text of the next cell.
    pub content: CellContent,
    /// Merge regions and occupied coordinates.
    pub merges: MergeTracker,
    document: TableFrame,
    tables: Vec<TableFrame>,
}

impl Default for ConversionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionState {
    /// Cursor at `A1`, outside any table, with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            row: 1,
            column: 1,
            content: CellContent::default(),
            merges: MergeTracker::new(),
            document: TableFrame::DOCUMENT,
            tables: Vec::new(),
        }
    }

    /// The cursor.
    #[must_use]
    pub const fn cursor(&self) -> GridCoordinate {
        GridCoordinate::new(self.column, self.row)
    }

    /// Number of open tables.
    #[must_use]
    pub fn table_level(&self) -> usize {
        self.tables.len()
    }

    /// Whether the cursor is inside a table.
    #[must_use]
    pub fn in_table(&self) -> bool {
        !self.tables.is_empty()
    }

    /// The innermost open table, or the document frame.
    #[must_use]
    pub fn frame(&self) -> &TableFrame {
        self.tables.last().unwrap_or(&self.document)
    }

    /// Mutable access to the innermost frame.
    pub fn frame_mut(&mut self) -> &mut TableFrame {
        match self.tables.last_mut() {
            Some(frame) => frame,
            None => &mut self.document,
        }
    }

    /// Start column of the innermost frame.
    #[must_use]
    pub fn start_column(&self) -> u32 {
        self.frame().start_column
    }

    /// Open a table.
    pub fn push_table(&mut self, frame: TableFrame) {
        self.tables.push(frame);
    }

    /// Close the innermost table, folding its extent into the parent frame.
    pub fn pop_table(&mut self) -> Option<TableFrame> {
        let closed = self.tables.pop()?;
        let parent = self.frame_mut();
        parent.rightmost_column = parent.rightmost_column.max(closed.rightmost_column);
        parent.row_extent = parent.row_extent.max(closed.row_extent);
        Some(closed)
    }

    /// Note that a cell reached `column`.
    pub fn record_column(&mut self, column: u32) {
        let frame = self.frame_mut();
        frame.rightmost_column = frame.rightmost_column.max(column);
    }

    /// Close the current table row: move below every row it covered,
    /// including rows of nested tables.
    pub fn finish_row(&mut self) {
        let row = self.row;
        let frame = self.frame_mut();
        let last = row.max(frame.row_extent);
        frame.row_extent = last;
        self.row = last + 1;
    }

    /// Reset for a `<body>`: cursor to `A1`, no open tables, empty buffer.
    pub fn reset_for_body(&mut self) {
        self.row = 1;
        self.column = 1;
        self.tables.clear();
        self.document = TableFrame::DOCUMENT;
        self.content.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_content_drops_plain_text() {
        let mut content = CellContent::RichRuns(vec![TextRun {
            text: "bold".to_string(),
            style: StyleSpec::default(),
        }]);
        content.push_text(" more");
        assert_eq!(content.text(), "bold");
        assert!(!content.is_blank());
    }

    #[test]
    fn take_leaves_empty_plain_text() {
        let mut content = CellContent::PlainText("x".to_string());
        assert_eq!(content.take(), CellContent::PlainText("x".to_string()));
        assert_eq!(content, CellContent::default());
        assert!(content.is_empty());
    }

    #[test]
    fn nested_frames_fold_into_parent() {
        let mut state = ConversionState::new();
        state.push_table(TableFrame::top_level(1));
        state.record_column(1);
        state.push_table(TableFrame::nested(GridCoordinate::new(1, 1)));
        assert_eq!(state.table_level(), 2);
        assert_eq!(state.start_column(), 2);

        state.record_column(3);
        state.finish_row();
        state.finish_row();
        assert_eq!(state.row, 3);

        let nested = state.pop_table().unwrap();
        assert_eq!(nested.row_extent, 2);
        assert_eq!(state.frame().rightmost_column, 3);
        assert_eq!(state.frame().row_extent, 2);

        state.row = nested.parent_row;
        state.finish_row();
        assert_eq!(state.row, 3);
    }

    #[test]
    fn body_resets_cursor_and_tables() {
        let mut state = ConversionState::new();
        state.row = 7;
        state.column = 4;
        state.push_table(TableFrame::top_level(7));
        state.content.push_text("stale");
        state.reset_for_body();
        assert_eq!(state.cursor(), GridCoordinate::ORIGIN);
        assert_eq!(state.table_level(), 0);
        assert!(state.content.is_empty());
    }
}
