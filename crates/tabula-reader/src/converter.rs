//! Recursive DOM-to-grid conversion.
//!
//! The converter walks the DOM depth first in a single pass. Text
//! accumulates in [`ConversionState::content`] and is committed to the grid
//! ("flushed") when a block, line break, table cell or table boundary is
//! reached. Inside a table, block elements add line breaks to the cell text
//! instead of moving to a new row.

use std::str::FromStr;

use strum_macros::EnumString;
use tabula_common::warning::warn_once;
use tabula_css::{Extent, StyleSpec, parse_leading_number, parse_style};
use tabula_dom::{DomTree, ElementData, NodeId, NodeType};
use tabula_grid::{CellRange, CellWrite, ImagePlacement, SheetSink};

use crate::error::ReaderError;
use crate::flush::flush_cell;
use crate::format::NamedFormat;
use crate::image::ImageResolver;
use crate::merge::{MergeTracker, parse_span};
use crate::reader::{ReaderOptions, RuleMode};
use crate::state::{ConversionState, TableFrame};

/// Text written for `<hr>` in [`RuleMode::Placeholder`].
pub const RULE_PLACEHOLDER: &str = "----------";

/// How an element affects the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
enum TagKind {
    #[strum(serialize = "h1", serialize = "h2", serialize = "h3")]
    #[strum(serialize = "h4", serialize = "h5", serialize = "h6")]
    #[strum(serialize = "p", serialize = "ol", serialize = "ul")]
    Block,
    #[strum(serialize = "li")]
    ListItem,
    #[strum(serialize = "br")]
    LineBreak,
    #[strum(serialize = "hr")]
    Rule,
    #[strum(serialize = "a")]
    Anchor,
    #[strum(serialize = "span", serialize = "div", serialize = "font")]
    #[strum(serialize = "i", serialize = "em", serialize = "strong", serialize = "b")]
    Inline,
    #[strum(serialize = "img")]
    Image,
    #[strum(serialize = "table")]
    Table,
    #[strum(serialize = "thead", serialize = "tbody", serialize = "tfoot")]
    Section,
    #[strum(serialize = "tr")]
    Row,
    #[strum(serialize = "td", serialize = "th")]
    Cell,
    #[strum(serialize = "body")]
    Body,
    #[strum(serialize = "title")]
    Title,
    #[strum(serialize = "script", serialize = "style", serialize = "template")]
    Skipped,
    /// `html`, `head`, `meta` and anything unrecognized.
    #[strum(disabled)]
    Transparent,
}

impl TagKind {
    fn of(tag: &str) -> Self {
        Self::from_str(tag).unwrap_or(Self::Transparent)
    }
}

/// Walks a [`DomTree`] and emits grid content into a sink.
pub struct TreeConverter<'a, 'r> {
    dom: &'a DomTree,
    sink: &'a mut dyn SheetSink,
    images: &'a mut ImageResolver<'r>,
    options: ReaderOptions,
}

impl<'a, 'r> TreeConverter<'a, 'r> {
    /// A converter writing into `sink` and resolving images with `images`.
    #[must_use]
    pub fn new(
        dom: &'a DomTree,
        sink: &'a mut dyn SheetSink,
        images: &'a mut ImageResolver<'r>,
        options: ReaderOptions,
    ) -> Self {
        Self {
            dom,
            sink,
            images,
            options,
        }
    }

    /// Convert the children of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError`] if an image cannot be resolved. Every other
    /// problem is recovered from locally.
    pub fn convert(&mut self, node: NodeId, state: &mut ConversionState) -> Result<(), ReaderError> {
        let dom = self.dom;
        for &child in dom.children(node) {
            let Some(child_node) = dom.get(child) else {
                continue;
            };
            match &child_node.node_type {
                NodeType::Text(text) => state.content.push_text(&normalize_whitespace(text)),
                NodeType::Element(element) => self.convert_element(child, element, state)?,
                NodeType::Document | NodeType::Comment(_) => {}
            }
        }
        Ok(())
    }

    /// Commit whatever text is still pending at the cursor.
    pub fn finish(&mut self, state: &mut ConversionState) {
        let _ = self.flush(state, None);
    }

    fn convert_element(
        &mut self,
        id: NodeId,
        element: &ElementData,
        state: &mut ConversionState,
    ) -> Result<(), ReaderError> {
        match TagKind::of(&element.tag_name) {
            TagKind::Block => self.convert_block(id, element, state),
            TagKind::ListItem => self.convert_list_item(id, state),
            TagKind::LineBreak => {
                self.line_break(state);
                Ok(())
            }
            TagKind::Rule => {
                self.rule(state);
                Ok(())
            }
            TagKind::Anchor => self.convert_anchor(id, element, state),
            TagKind::Inline => self.convert_inline(id, element, state),
            TagKind::Image => self.convert_image(element, state),
            TagKind::Table => self.convert_table(id, state),
            TagKind::Row => self.convert_row(id, state),
            TagKind::Cell => self.convert_cell(id, element, state),
            TagKind::Body => {
                state.reset_for_body();
                self.convert(id, state)
            }
            TagKind::Title => {
                self.convert(id, state)?;
                let title = state.content.text();
                self.sink.set_title(title.trim());
                state.content.clear();
                Ok(())
            }
            TagKind::Skipped => Ok(()),
            TagKind::Section | TagKind::Transparent => self.convert(id, state),
        }
    }

    /// `h1`-`h6`, `p`, `ol`, `ul`.
    fn convert_block(
        &mut self,
        id: NodeId,
        element: &ElementData,
        state: &mut ConversionState,
    ) -> Result<(), ReaderError> {
        if state.in_table() {
            state.content.push_text("\n");
            return self.convert(id, state);
        }

        if self.flush(state, None) {
            state.row += 1;
        }
        self.convert(id, state)?;
        let _ = self.flush(state, None);
        if let Some(format) = NamedFormat::for_tag(&element.tag_name) {
            self.sink
                .apply_style(CellRange::single(state.cursor()), &format.style());
        }
        state.row += 1;
        state.column = state.start_column();
        Ok(())
    }

    fn convert_list_item(&mut self, id: NodeId, state: &mut ConversionState) -> Result<(), ReaderError> {
        if state.in_table() {
            state.content.push_text("\n");
            return self.convert(id, state);
        }

        let _ = self.flush(state, None);
        state.row += 1;
        self.convert(id, state)?;
        let _ = self.flush(state, None);
        Ok(())
    }

    fn line_break(&mut self, state: &mut ConversionState) {
        if state.in_table() {
            state.content.push_text("\n");
        } else {
            let _ = self.flush(state, None);
            state.row += 1;
        }
    }

    /// A rule gets a row of its own, inside a table cell as well.
    fn rule(&mut self, state: &mut ConversionState) {
        let _ = self.flush(state, None);
        state.row += 1;
        let at = state.cursor();
        match self.options.rule_mode {
            RuleMode::Border => self
                .sink
                .apply_style(CellRange::single(at), &NamedFormat::HorizontalRule.style()),
            RuleMode::Placeholder => self.sink.write_cell(CellWrite {
                coordinate: at,
                text: RULE_PLACEHOLDER.to_string(),
                style: None,
            }),
        }
        state.row += 1;
    }

    fn convert_anchor(
        &mut self,
        id: NodeId,
        element: &ElementData,
        state: &mut ConversionState,
    ) -> Result<(), ReaderError> {
        if let Some(href) = element.non_empty_attr("href") {
            let at = state.cursor();
            self.sink.set_hyperlink(at, href);
            self.sink
                .apply_style(CellRange::single(at), &NamedFormat::Anchor.style());
        }
        state.content.push_text(" ");
        self.convert(id, state)
    }

    /// `span`, `div`, `font`, `i`, `em`, `strong`, `b`.
    fn convert_inline(
        &mut self,
        id: NodeId,
        element: &ElementData,
        state: &mut ConversionState,
    ) -> Result<(), ReaderError> {
        if !state.content.is_empty() {
            state.content.push_text(" ");
        }
        self.convert(id, state)?;
        if !state.content.is_empty() {
            state.content.push_text(" ");
        }
        if let Some(format) = NamedFormat::for_tag(&element.tag_name) {
            self.sink
                .apply_style(CellRange::single(state.cursor()), &format.style());
        }
        Ok(())
    }

    /// Inline `width`/`height`/`top`/`left` styles take precedence over the
    /// `width` and `height` attributes.
    fn convert_image(&mut self, element: &ElementData, state: &ConversionState) -> Result<(), ReaderError> {
        let Some(src) = element.non_empty_attr("src") else {
            warn_once("reader", "<img> without src skipped");
            return Ok(());
        };
        let style = element
            .non_empty_attr("style")
            .map(|block| parse_style(&[block]))
            .unwrap_or_default();

        let width = pick_dimension(style.width(), element.attr("width"));
        let height = pick_dimension(style.height(), element.attr("height"));
        let path = self.images.resolve(src)?;

        self.sink.place_image(ImagePlacement {
            coordinate: state.cursor(),
            path,
            name: element.attr("alt").unwrap_or_default().to_string(),
            offset_x: pixel_offset(style.extra_number("left")),
            offset_y: pixel_offset(style.extra_number("top")),
            width,
            height,
            resize_proportional: true,
        });
        Ok(())
    }

    fn convert_table(&mut self, id: NodeId, state: &mut ConversionState) -> Result<(), ReaderError> {
        let wrote = self.flush(state, None);

        if state.in_table() {
            let frame = TableFrame::nested(state.cursor());
            state.column = frame.start_column;
            state.push_table(frame);
            self.convert(id, state)?;
            if let Some(nested) = state.pop_table() {
                state.row = nested.parent_row;
                state.column = nested.rightmost_column + 1;
            }
        } else {
            if wrote {
                state.row += 1;
            }
            let frame = TableFrame::top_level(state.row);
            state.column = frame.start_column;
            state.push_table(frame);
            self.convert(id, state)?;
            let _ = state.pop_table();
            state.row += 1;
            state.column = state.start_column();
        }
        Ok(())
    }

    fn convert_row(&mut self, id: NodeId, state: &mut ConversionState) -> Result<(), ReaderError> {
        state.column = state.start_column();
        state.content.clear();
        self.convert(id, state)?;
        state.finish_row();
        Ok(())
    }

    /// `td` and `th`.
    fn convert_cell(
        &mut self,
        id: NodeId,
        element: &ElementData,
        state: &mut ConversionState,
    ) -> Result<(), ReaderError> {
        state.column = state.merges.next_free_column(state.row, state.column);
        let origin = state.cursor();
        self.convert(id, state)?;

        let style = element
            .non_empty_attr("style")
            .map(|block| parse_style(&[block]))
            .filter(|style| !style.is_empty());

        // A nested table already moved the cursor past itself.
        if state.column != origin.column && state.content.is_blank() {
            state.content.clear();
            if let Some(style) = &style {
                self.sink.apply_style(CellRange::single(origin), style);
            }
            if element.attr("rowspan").is_some() || element.attr("colspan").is_some() {
                warn_once("reader", "spans on a cell containing a table are ignored");
            }
            return Ok(());
        }

        // A rule inside the cell may have moved the cursor to a later row.
        state.column = state.merges.next_free_column(state.row, state.column);
        let at = state.cursor();
        let _ = self.flush(state, style.as_ref());

        if let Some(style) = &style {
            if let Some(width) = style.width() {
                self.sink.set_column_width(at.column, width);
            }
            if let Some(height) = style.height() {
                self.sink.set_row_height(at.row, height);
            }
        }

        let rowspan = span_attribute(element, "rowspan");
        let colspan = span_attribute(element, "colspan");
        if rowspan > 1 || colspan > 1 {
            let region = MergeTracker::compute_region(at, rowspan, colspan);
            self.sink.merge_cells(region);
            state.merges.mark_occupied(region);
            state.column = region.end().column;
            if let Some(style) = &style {
                self.sink.apply_style(region, style);
            }
        }

        state.record_column(state.column);
        state.column += 1;
        Ok(())
    }

    fn flush(&mut self, state: &mut ConversionState, style: Option<&StyleSpec>) -> bool {
        let at = state.cursor();
        flush_cell(&mut *self.sink, at, &mut state.content, style)
    }
}

/// Collapse whitespace runs to a single space and trim.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A span attribute, defaulting to 1 when absent or malformed.
fn span_attribute(element: &ElementData, name: &str) -> u32 {
    element
        .attr(name)
        .map_or(1, |value| match parse_span(name, value) {
            Ok(span) => span,
            Err(err) => {
                warn_once("reader", &format!("{err}, using 1"));
                1
            }
        })
}

/// A style dimension when fixed, else a positive attribute value.
fn pick_dimension(style: Option<Extent>, attribute: Option<&str>) -> Option<f64> {
    match style {
        Some(Extent::Fixed(value)) => Some(value),
        Some(Extent::Auto) => None,
        None => attribute
            .and_then(parse_leading_number)
            .filter(|value| *value > 0.0),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn pixel_offset(value: Option<f64>) -> i32 {
    value.map_or(0, |value| {
        value
            .round()
            .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    })
}

/// Convert a whole document into `sink`.
///
/// Text still pending when the traversal ends is committed at the final
/// cursor position.
///
/// # Errors
///
/// Returns [`ReaderError`] if an image cannot be resolved.
pub fn convert_document(
    dom: &DomTree,
    sink: &mut dyn SheetSink,
    images: &mut ImageResolver<'_>,
    options: ReaderOptions,
) -> Result<(), ReaderError> {
    let mut state = ConversionState::new();
    let mut converter = TreeConverter::new(dom, sink, images, options);
    converter.convert(dom.root(), &mut state)?;
    converter.finish(&mut state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_kinds() {
        assert_eq!(TagKind::of("h4"), TagKind::Block);
        assert_eq!(TagKind::of("ul"), TagKind::Block);
        assert_eq!(TagKind::of("th"), TagKind::Cell);
        assert_eq!(TagKind::of("tfoot"), TagKind::Section);
        assert_eq!(TagKind::of("strong"), TagKind::Inline);
        assert_eq!(TagKind::of("style"), TagKind::Skipped);
        assert_eq!(TagKind::of("meta"), TagKind::Transparent);
        assert_eq!(TagKind::of("custom-element"), TagKind::Transparent);
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace("\n   "), "");
    }

    #[test]
    fn dimensions_prefer_style() {
        assert_eq!(pick_dimension(Some(Extent::Fixed(50.0)), Some("20")), Some(50.0));
        assert_eq!(pick_dimension(None, Some("20px")), Some(20.0));
        assert_eq!(pick_dimension(Some(Extent::Auto), Some("20")), None);
        assert_eq!(pick_dimension(None, Some("0")), None);
        assert_eq!(pick_dimension(None, None), None);
    }

    #[test]
    fn offsets_round_and_clamp() {
        assert_eq!(pixel_offset(None), 0);
        assert_eq!(pixel_offset(Some(4.6)), 5);
        assert_eq!(pixel_offset(Some(1e12)), i32::MAX);
    }
}
