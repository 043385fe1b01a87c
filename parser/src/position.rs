//! Cell addresses and sheet extents.
//!
//! A `Position` is constructible only in-bounds: there is no sentinel value
//! for "invalid position" to carry around, because the type itself can never
//! hold one. Callers that need the spec's `NONE` concept use `Option<Position>`.

use std::fmt;

use crate::limits::{MAX_COLS, MAX_ROWS};

/// A 0-based (row, col) cell address, always within `[0, MAX_ROWS) x [0, MAX_COLS)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u32,
    col: u32,
}

impl Position {
    /// Builds a position from 0-based indices, rejecting anything out of bounds.
    pub fn try_new(row: u32, col: u32) -> Option<Position> {
        if row < MAX_ROWS && col < MAX_COLS {
            Some(Position { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u32 {
        self.row
    }

    pub fn col(self) -> u32 {
        self.col
    }

    /// Parses an A1-style reference such as `"AB12"`. Column letters must be
    /// uppercase; no normalization is performed.
    pub fn parse(s: &str) -> Option<Position> {
        let split = s.find(|c: char| c.is_ascii_digit())?;
        let (col_str, row_str) = s.split_at(split);
        if col_str.is_empty() || row_str.is_empty() {
            return None;
        }
        if !col_str.bytes().all(|b| b.is_ascii_uppercase()) {
            return None;
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let col = col_to_index(col_str)?;
        let row_num: u32 = row_str.parse().ok()?;
        if row_num == 0 {
            return None;
        }
        Position::try_new(row_num - 1, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", index_to_col(self.col), self.row + 1)
    }
}

/// Converts a column string (uppercase, bijective base-26) to a 0-based index.
/// `"A"` -> 0, `"Z"` -> 25, `"AA"` -> 26. Returns `None` on overflow or an
/// empty/non-alphabetic string.
pub fn col_to_index(col_str: &str) -> Option<u32> {
    if col_str.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    for c in col_str.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        let digit = (c as u64) - ('A' as u64) + 1;
        result = result * 26 + digit;
        if result > u32::MAX as u64 {
            return None;
        }
    }
    u32::try_from(result - 1).ok()
}

/// Converts a 0-based column index to its bijective base-26 letters.
/// `0` -> `"A"`, `25` -> `"Z"`, `26` -> `"AA"`.
pub fn index_to_col(mut col_index: u32) -> String {
    let mut result = String::new();
    loop {
        let remainder = col_index % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col_index < 26 {
            break;
        }
        col_index = col_index / 26 - 1;
    }
    result
}

/// The bounding rectangle of a sheet's occupied cells, anchored at `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub rows: u32,
    pub cols: u32,
}

impl Size {
    pub fn new(rows: u32, cols: u32) -> Size {
        Size { rows, cols }
    }
}
