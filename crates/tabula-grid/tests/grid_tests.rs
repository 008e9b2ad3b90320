//! Integration tests for coordinates, ranges and the in-memory workbook.

use std::path::PathBuf;

use tabula_css::parse_inline_style;
use tabula_grid::{
    CellRange, CellWrite, CoordinateError, Extent, GridCoordinate, GridSink, ImagePlacement,
    ImageSink, Workbook, Worksheet,
};

fn at(reference: &str) -> GridCoordinate {
    reference.parse().unwrap()
}

fn write(sheet: &mut Worksheet, reference: &str, text: &str) {
    sheet.write_cell(CellWrite {
        coordinate: at(reference),
        text: text.to_string(),
        style: None,
    });
}

#[test]
fn test_coordinate_display_and_parse() {
    assert_eq!(GridCoordinate::new(1, 1).to_string(), "A1");
    assert_eq!(GridCoordinate::new(27, 10).to_string(), "AA10");
    assert_eq!(at("ab3"), GridCoordinate::new(28, 3));
    assert_eq!(at(" C7 "), GridCoordinate::new(3, 7));
}

#[test]
fn test_coordinate_parse_errors() {
    assert!(matches!(
        "17".parse::<GridCoordinate>(),
        Err(CoordinateError::InvalidReference(_))
    ));
    assert!(matches!(
        "A".parse::<GridCoordinate>(),
        Err(CoordinateError::InvalidReference(_))
    ));
    assert!(matches!(
        "A1B".parse::<GridCoordinate>(),
        Err(CoordinateError::InvalidReference(_))
    ));
    assert!(matches!(
        "A0".parse::<GridCoordinate>(),
        Err(CoordinateError::OutOfRange(_))
    ));
}

#[test]
fn test_coordinates_order_row_major() {
    let mut coords = vec![at("B1"), at("A2"), at("A1"), at("C1")];
    coords.sort();
    assert_eq!(coords, vec![at("A1"), at("B1"), at("C1"), at("A2")]);
}

#[test]
fn test_range_normalizes_corners() {
    let range = CellRange::new(at("C4"), at("A2"));
    assert_eq!(range.start(), at("A2"));
    assert_eq!(range.end(), at("C4"));
    assert_eq!(range.width(), 3);
    assert_eq!(range.height(), 3);
    assert_eq!(range.to_string(), "A2:C4");
    assert_eq!("c4:a2".parse::<CellRange>().unwrap(), range);
}

#[test]
fn test_range_iterates_row_major() {
    let range: CellRange = "A1:B2".parse().unwrap();
    let cells: Vec<String> = range.iter().map(|c| c.to_string()).collect();
    assert_eq!(cells, ["A1", "B1", "A2", "B2"]);
    assert!(range.contains(at("B2")));
    assert!(!range.contains(at("C1")));
    assert!(CellRange::single(at("D4")).is_single());
}

#[test]
fn test_worksheet_stores_values() {
    let mut sheet = Worksheet::new("Sheet");
    write(&mut sheet, "A1", "one");
    write(&mut sheet, "C1", "three");
    write(&mut sheet, "B2", "four");

    assert_eq!(sheet.value(at("A1")), Some("one"));
    assert_eq!(sheet.value(at("B1")), None);
    assert_eq!(sheet.row_values(1), ["one", "", "three"]);
    assert_eq!(sheet.row_values(2), ["", "four"]);
    assert!(sheet.row_values(3).is_empty());
    assert_eq!(sheet.used_range(), Some("A1:C2".parse().unwrap()));
}

#[test]
fn test_style_only_cells_do_not_extend_used_range() {
    let mut sheet = Worksheet::new("Sheet");
    write(&mut sheet, "A1", "x");
    sheet.apply_style(
        "D5:D5".parse().unwrap(),
        &parse_inline_style("font-weight: bold"),
    );
    assert_eq!(sheet.used_range(), Some(CellRange::single(at("A1"))));
    assert!(sheet.cell(at("D5")).unwrap().style.is_some());
}

#[test]
fn test_apply_style_overlays_existing_style() {
    let mut sheet = Worksheet::new("Sheet");
    sheet.write_cell(CellWrite {
        coordinate: at("A1"),
        text: "x".to_string(),
        style: Some(parse_inline_style("color: red; font-size: 9")),
    });
    sheet.apply_style(
        CellRange::new(at("A1"), at("B1")),
        &parse_inline_style("color: blue"),
    );
    let font = sheet.cell(at("A1")).unwrap().style.as_ref().unwrap().font.clone().unwrap();
    assert_eq!(font.color.unwrap().as_str(), "0000ff");
    assert_eq!(font.size, Some(9.0));
    assert!(sheet.cell(at("B1")).unwrap().style.is_some());
}

#[test]
fn test_merges_skip_single_cells_and_duplicates() {
    let mut sheet = Worksheet::new("Sheet");
    let region: CellRange = "A1:B2".parse().unwrap();
    sheet.merge_cells(region);
    sheet.merge_cells(region);
    sheet.merge_cells(CellRange::single(at("C3")));
    assert_eq!(sheet.merges(), [region]);
}

#[test]
fn test_title_is_sanitized() {
    let mut sheet = Worksheet::new("Sheet");
    sheet.set_title("Q1 [draft]: sales/costs?");
    assert_eq!(sheet.title(), "Q1 draft salescosts");

    sheet.set_title("abcdefghijklmnopqrstuvwxyz0123456789");
    assert_eq!(sheet.title(), "abcdefghijklmnopqrstuvwxyz01234");

    sheet.set_title("  ***  ");
    assert_eq!(sheet.title(), "abcdefghijklmnopqrstuvwxyz01234");
}

#[test]
fn test_dimensions_and_hyperlinks() {
    let mut sheet = Worksheet::new("Sheet");
    sheet.set_column_width(2, Extent::Fixed(40.0));
    sheet.set_row_height(3, Extent::Auto);
    sheet.set_hyperlink(at("A1"), "https://example.com");

    assert_eq!(sheet.column_width(2), Some(Extent::Fixed(40.0)));
    assert_eq!(sheet.column_width(1), None);
    assert_eq!(sheet.row_height(3), Some(Extent::Auto));
    assert_eq!(
        sheet.cell(at("A1")).unwrap().hyperlink.as_deref(),
        Some("https://example.com")
    );
}

#[test]
fn test_workbook_grows_to_requested_sheet() {
    let mut book = Workbook::new();
    assert_eq!(book.sheet_count(), 1);
    write(book.ensure_sheet(2), "A1", "third");
    assert_eq!(book.sheet_count(), 3);
    assert_eq!(book.active_index(), 2);
    assert_eq!(book.active_sheet().value(at("A1")), Some("third"));
    assert_eq!(book.sheet(1).unwrap().title(), "Worksheet 1");
}

#[test]
fn test_worksheet_json_shape() {
    let mut sheet = Worksheet::new("Report");
    write(&mut sheet, "B1", "hi");
    sheet.merge_cells("B1:C1".parse().unwrap());
    sheet.set_column_width(2, Extent::Auto);
    sheet.place_image(ImagePlacement {
        coordinate: at("A3"),
        path: PathBuf::from("/tmp/logo.png"),
        name: "logo".to_string(),
        offset_x: 0,
        offset_y: 4,
        width: Some(32.0),
        height: None,
        resize_proportional: true,
    });

    let json = serde_json::to_value(&sheet).unwrap();
    assert_eq!(json["title"], "Report");
    assert_eq!(json["cells"]["B1"]["value"], "hi");
    assert_eq!(json["merges"][0], "B1:C1");
    assert_eq!(json["column_widths"]["2"], "auto");
    assert_eq!(json["images"][0]["coordinate"], "A3");
    assert_eq!(json["images"][0]["width"], 32.0);
    assert!(json["images"][0].get("height").is_none());
}
