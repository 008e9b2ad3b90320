//! A1-style cell addressing.
//!
//! Columns and rows are 1-based. Column labels follow the spreadsheet
//! bijective base-26 scheme: 1=A, 26=Z, 27=AA, 703=AAA.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors from parsing cell references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// The text is not of the form `<letters><digits>`.
    #[error("invalid cell reference '{0}'")]
    InvalidReference(String),
    /// Row or column was zero or overflowed.
    #[error("cell reference '{0}' is out of range")]
    OutOfRange(String),
}

/// Convert a 1-based column number to its letter label.
///
/// Returns an empty string for column 0.
#[must_use]
pub fn column_label(mut column: u32) -> String {
    let mut label = Vec::new();
    while column > 0 {
        column -= 1;
        // `column % 26` is below 26, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        label.push(b'A' + (column % 26) as u8);
        column /= 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Convert a letter label (case-insensitive) to its 1-based column number.
///
/// Returns `None` for empty labels, non-letters, or overflow.
#[must_use]
pub fn parse_column_label(label: &str) -> Option<u32> {
    if label.is_empty() {
        return None;
    }
    label.bytes().try_fold(0u32, |acc, byte| {
        if !byte.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(byte.to_ascii_uppercase() - b'A') + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// A single cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    /// 1-based column number.
    pub column: u32,
    /// 1-based row number.
    pub row: u32,
}

impl GridCoordinate {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { column: 1, row: 1 };

    /// Create a coordinate from a column and a row.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// The column letter label.
    #[must_use]
    pub fn column_label(self) -> String {
        column_label(self.column)
    }
}

/// Row-major order: rows first, then columns.
impl Ord for GridCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for GridCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_label(self.column), self.row)
    }
}

impl FromStr for GridCoordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| CoordinateError::InvalidReference(s.to_string()))?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoordinateError::InvalidReference(s.to_string()));
        }
        let column = parse_column_label(letters)
            .ok_or_else(|| CoordinateError::OutOfRange(s.to_string()))?;
        let row: u32 = digits
            .parse()
            .map_err(|_| CoordinateError::OutOfRange(s.to_string()))?;
        if row == 0 {
            return Err(CoordinateError::OutOfRange(s.to_string()));
        }
        Ok(Self { column, row })
    }
}

impl Serialize for GridCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A rectangular block of cells; also the shape of a merged region.
///
/// Always normalized so that `start` is the top-left and `end` the
/// bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    start: GridCoordinate,
    end: GridCoordinate,
}

impl CellRange {
    /// Create a range from any two opposite corners.
    #[must_use]
    pub fn new(a: GridCoordinate, b: GridCoordinate) -> Self {
        Self {
            start: GridCoordinate::new(a.column.min(b.column), a.row.min(b.row)),
            end: GridCoordinate::new(a.column.max(b.column), a.row.max(b.row)),
        }
    }

    /// A one-cell range.
    #[must_use]
    pub const fn single(at: GridCoordinate) -> Self {
        Self { start: at, end: at }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn start(&self) -> GridCoordinate {
        self.start
    }

    /// Bottom-right corner.
    #[must_use]
    pub const fn end(&self) -> GridCoordinate {
        self.end
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.end.column - self.start.column + 1
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Whether the range is a single cell.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.width() == 1 && self.height() == 1
    }

    /// Whether `at` lies inside the range.
    #[must_use]
    pub const fn contains(&self, at: GridCoordinate) -> bool {
        at.column >= self.start.column
            && at.column <= self.end.column
            && at.row >= self.start.row
            && at.row <= self.end.row
    }

    /// Every coordinate in the range, row-major.
    pub fn iter(&self) -> impl Iterator<Item = GridCoordinate> + use<> {
        let (start, end) = (self.start, self.end);
        (start.row..=end.row).flat_map(move |row| {
            (start.column..=end.column).map(move |column| GridCoordinate::new(column, row))
        })
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for CellRange {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((a, b)) => Ok(Self::new(a.parse()?, b.parse()?)),
            None => Ok(Self::single(s.parse()?)),
        }
    }
}

impl Serialize for CellRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
