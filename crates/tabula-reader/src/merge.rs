//! Row and column spans.
//!
//! [§ 4.9.11 Attributes common to td and th elements](https://html.spec.whatwg.org/multipage/tables.html#attributes-common-to-td-and-th-elements)

use std::collections::HashSet;

use tabula_grid::{CellRange, GridCoordinate};

use crate::error::MalformedAttributeError;

/// "The colspan content attribute ... must be greater than zero and less
/// than or equal to 1000."
pub const MAX_COLSPAN: u32 = 1000;

/// "The rowspan content attribute ... must be ... less than or equal to
/// 65534."
pub const MAX_ROWSPAN: u32 = 65534;

/// Parse a span attribute into a positive integer.
///
/// Values above the HTML limits are clamped.
///
/// # Errors
///
/// Returns [`MalformedAttributeError`] when `value` is not a positive
/// integer.
pub fn parse_span(name: &str, value: &str) -> Result<u32, MalformedAttributeError> {
    let malformed = || MalformedAttributeError {
        name: name.to_string(),
        value: value.to_string(),
    };
    let span: u32 = value.trim().parse().map_err(|_| malformed())?;
    if span == 0 {
        return Err(malformed());
    }
    let limit = if name.eq_ignore_ascii_case("rowspan") {
        MAX_ROWSPAN
    } else {
        MAX_COLSPAN
    };
    Ok(span.min(limit))
}

/// Tracks coordinates covered by merged regions.
///
/// The set covers one conversion only, so its growth is bounded by the
/// document being converted.
#[derive(Debug, Default)]
pub struct MergeTracker {
    occupied: HashSet<GridCoordinate>,
}

impl MergeTracker {
    /// An empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rectangle spanned from `origin`. Spans below 1 count as 1.
    #[must_use]
    pub fn compute_region(origin: GridCoordinate, rowspan: u32, colspan: u32) -> CellRange {
        let end = GridCoordinate::new(
            origin.column + colspan.max(1) - 1,
            origin.row + rowspan.max(1) - 1,
        );
        CellRange::new(origin, end)
    }

    /// Record every coordinate of `region` except its origin.
    pub fn mark_occupied(&mut self, region: CellRange) {
        let origin = region.start();
        self.occupied
            .extend(region.iter().filter(|&at| at != origin));
    }

    /// Whether `at` is covered by an earlier merge.
    #[must_use]
    pub fn is_occupied(&self, at: GridCoordinate) -> bool {
        self.occupied.contains(&at)
    }

    /// First column at or right of `column` on `row` that is not occupied.
    #[must_use]
    pub fn next_free_column(&self, row: u32, mut column: u32) -> u32 {
        while self.is_occupied(GridCoordinate::new(column, row)) {
            column += 1;
        }
        column
    }

    /// Number of occupied coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    /// Whether nothing is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }
}
