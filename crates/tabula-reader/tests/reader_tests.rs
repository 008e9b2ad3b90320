//! Integration tests for document loading and input checks.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use tabula_grid::{GridCoordinate, Workbook};
use tabula_reader::{
    HtmlReader, ReaderError, ReaderOptions, ScratchSpace, StyleInliner, StylesheetSource,
};

#[test]
fn test_entity_declaration_is_rejected() {
    let err = HtmlReader::new()
        .load_str(
            "<!DOCTYPE html [<!ENTITY xxe SYSTEM \"file:///etc/passwd\">]><p>&xxe;</p>",
        )
        .unwrap_err();
    assert!(matches!(err, ReaderError::SecurityViolation));
}

#[test]
fn test_entity_with_interleaved_nul_is_rejected() {
    let err = HtmlReader::new()
        .load_str("<p>x</p><\0!\0E\0N\0T\0I\0T\0Y\0 a \"b\">")
        .unwrap_err();
    assert!(matches!(err, ReaderError::SecurityViolation));
}

#[test]
fn test_entity_guard_runs_before_conversion() {
    let mut workbook = Workbook::new();
    let mut scratch = ScratchSpace::new();
    let result = HtmlReader::new().load_into(
        "<p>written?</p><!ENTITY x \"y\">",
        &mut workbook,
        &mut scratch,
    );
    assert!(matches!(result, Err(ReaderError::SecurityViolation)));
    assert!(workbook.active_sheet().used_range().is_none());
}

#[test]
fn test_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.html");
    fs::write(&path, "<table><tr><td>1</td><td>2</td></tr></table>").unwrap();

    let reader = HtmlReader::new();
    assert!(reader.can_read(&path));
    let loaded = reader.load(&path).unwrap();
    assert_eq!(loaded.source_path.as_deref(), Some(path.as_path()));
    assert_eq!(loaded.workbook.active_sheet().row_values(1), ["1", "2"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.html");
    let reader = HtmlReader::new();
    assert!(!reader.can_read(&path));
    assert!(matches!(reader.load(&path), Err(ReaderError::Io { .. })));
}

#[test]
fn test_non_html_file_is_invalid_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, "a,b,c\n1,2,3\n").unwrap();

    let reader = HtmlReader::new();
    assert!(!reader.can_read(&path));
    let err = reader.load(&path).unwrap_err();
    assert!(matches!(err, ReaderError::InvalidFormat { .. }));
    assert!(err.to_string().contains("data.csv"));
}

#[test]
fn test_non_utf8_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.html");
    fs::write(&path, b"<p>caf\xe9</p>").unwrap();

    let err = HtmlReader::new().load(&path).unwrap_err();
    assert!(matches!(err, ReaderError::DocumentParse(_)));
}

#[test]
fn test_load_into_existing_workbook() {
    let mut workbook = Workbook::new();
    let mut scratch = ScratchSpace::new();
    let reader = HtmlReader::new().with_options(ReaderOptions {
        sheet_index: 2,
        ..ReaderOptions::default()
    });
    reader
        .load_into("<p>third</p>", &mut workbook, &mut scratch)
        .unwrap();
    assert_eq!(workbook.sheet_count(), 3);
    assert_eq!(
        workbook.sheet(2).unwrap().value(GridCoordinate::ORIGIN),
        Some("third")
    );
}

/// Records the stylesheets it sees and makes every cell bold.
struct BoldCells {
    seen: Rc<RefCell<Vec<StylesheetSource>>>,
}

impl StyleInliner for BoldCells {
    fn inline_styles(&self, html: &str, stylesheets: &[StylesheetSource]) -> String {
        self.seen.borrow_mut().extend_from_slice(stylesheets);
        html.replace("<td>", "<td style=\"font-weight: bold\">")
    }
}

#[test]
fn test_style_inliner_receives_stylesheets() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let reader = HtmlReader::new().with_style_inliner(BoldCells { seen: Rc::clone(&seen) });
    let loaded = reader
        .load_str(
            "<html><head>\
               <style>td { font-weight: bold }</style>\
               <link rel=\"Stylesheet\" href=\"print.css\">\
               <link rel=\"icon\" href=\"favicon.ico\">\
             </head><body><table><tr><td>v</td></tr></table></body></html>",
        )
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        [
            StylesheetSource::Embedded("td { font-weight: bold }".to_string()),
            StylesheetSource::Linked("print.css".to_string()),
        ]
    );
    let cell = loaded
        .workbook
        .active_sheet()
        .cell(GridCoordinate::ORIGIN)
        .unwrap()
        .clone();
    assert_eq!(cell.value, "v");
    assert_eq!(cell.style.unwrap().font.unwrap().bold, Some(true));
}

#[test]
fn test_style_inliner_skipped_without_stylesheets() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let reader = HtmlReader::new().with_style_inliner(BoldCells { seen: Rc::clone(&seen) });
    let loaded = reader.load_str("<table><tr><td>v</td></tr></table>").unwrap();
    assert!(seen.borrow().is_empty());
    assert!(
        loaded
            .workbook
            .active_sheet()
            .cell(GridCoordinate::ORIGIN)
            .unwrap()
            .style
            .is_none()
    );
}

/// Produces output that must not be trusted.
struct InjectingInliner;

impl StyleInliner for InjectingInliner {
    fn inline_styles(&self, html: &str, _stylesheets: &[StylesheetSource]) -> String {
        format!("<!ENTITY x \"y\">{html}")
    }
}

#[test]
fn test_inliner_output_is_guarded() {
    let err = HtmlReader::new()
        .with_style_inliner(InjectingInliner)
        .load_str("<style>p {}</style><p>x</p>")
        .unwrap_err();
    assert!(matches!(err, ReaderError::SecurityViolation));
}
