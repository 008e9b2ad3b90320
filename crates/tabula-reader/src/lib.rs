//! HTML document to spreadsheet grid conversion.
//!
//! # Scope
//!
//! This crate provides:
//! - **Loading** - [`HtmlReader`]: format sniffing, the entity guard,
//!   parsing, optional style inlining, conversion into a [`Workbook`]
//! - **Conversion** - [`TreeConverter`]: a single depth-first pass mapping
//!   blocks, tables, spans, links and images onto grid coordinates
//! - **Merges** - [`MergeTracker`]: rowspan/colspan regions and the cells
//!   they cover
//! - **Images** - local, `data:` and remote sources, the latter two copied
//!   into a [`ScratchSpace`] that is removed with the result
//!
//! # Not Implemented
//!
//! - The CSS cascade; only inline `style` attributes are read unless a
//!   [`StyleInliner`] is supplied
//! - Rich text runs; cell text is plain
//! - Character encodings other than UTF-8
//!
//! [`Workbook`]: tabula_grid::Workbook

/// Recursive DOM-to-grid conversion.
pub mod converter;
/// Error types.
pub mod error;
/// Committing the content buffer.
pub mod flush;
/// Built-in formats of structural elements.
pub mod format;
/// Image source resolution and the scratch space.
pub mod image;
/// Span parsing and occupied-cell tracking.
pub mod merge;
/// File-level entry points.
pub mod reader;
/// Pre-parse input checks.
pub mod security;
/// Mutable traversal state.
pub mod state;

pub use converter::{TreeConverter, convert_document};
pub use error::{MalformedAttributeError, ReaderError};
pub use flush::flush_cell;
pub use format::NamedFormat;
pub use image::{ImageResolver, ScratchSpace};
pub use merge::{MergeTracker, parse_span};
pub use reader::{HtmlReader, LoadedWorkbook, ReaderOptions, RuleMode, StyleInliner, StylesheetSource};
pub use security::{looks_like_html, scan_for_entities};
pub use state::{CellContent, ConversionState, TableFrame, TextRun};
