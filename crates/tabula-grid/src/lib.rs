//! Spreadsheet grid model for the Tabula converter.
//!
//! The converter never talks to a concrete spreadsheet library. It emits
//! cell writes, merges, dimensions and image placements through the
//! [`GridSink`] and [`ImageSink`] traits, addressed by 1-based
//! [`GridCoordinate`]s. [`Workbook`] is the in-memory implementation used by
//! the command line tool and the tests.

/// Cell addressing: coordinates and rectangular ranges.
pub mod coordinate;
/// Sink traits and the records passed through them.
pub mod sink;
/// In-memory workbook implementing the sinks.
pub mod workbook;

pub use coordinate::{CellRange, CoordinateError, GridCoordinate, column_label, parse_column_label};
pub use sink::{CellWrite, GridSink, ImagePlacement, ImageSink, SheetSink};
pub use tabula_css::Extent;
pub use workbook::{Cell, Workbook, Worksheet};
