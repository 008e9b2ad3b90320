//! Committing the content buffer to the grid.

use tabula_css::StyleSpec;
use tabula_grid::{CellRange, CellWrite, GridCoordinate, GridSink};

use crate::state::CellContent;

/// Prefix written in place of rich text runs.
pub const RICH_TEXT_PLACEHOLDER: &str = "RICH TEXT: ";

/// Write `content` to `at` and reset the buffer.
///
/// Blank content writes nothing; in that case a given `style` is still
/// applied to `at`. Plain text is written verbatim, rich runs as
/// [`RICH_TEXT_PLACEHOLDER`] followed by their concatenated text.
///
/// Returns whether a value was written.
pub fn flush_cell<S: GridSink + ?Sized>(
    sink: &mut S,
    at: GridCoordinate,
    content: &mut CellContent,
    style: Option<&StyleSpec>,
) -> bool {
    let content = content.take();
    if content.is_blank() {
        if let Some(style) = style {
            sink.apply_style(CellRange::single(at), style);
        }
        return false;
    }

    let text = match content {
        CellContent::PlainText(text) => text,
        rich @ CellContent::RichRuns(_) => format!("{RICH_TEXT_PLACEHOLDER}{}", rich.text()),
    };
    sink.write_cell(CellWrite {
        coordinate: at,
        text,
        style: style.cloned(),
    });
    true
}
