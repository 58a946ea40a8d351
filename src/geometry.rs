//! Well addressing: conversions between well ids and grid indices, and the
//! id sets for rows, columns and rectangular regions.
//!
//! All functions take the row and column label arrays of a plate shape.
//! Regions are inclusive and independent of the order of their two corners.

use crate::model::{WellId, WellIndex};

/// Row label for a zero-based row index, using bijective base-26:
/// `0 -> A`, `25 -> Z`, `26 -> AA`, `27 -> AB`, `701 -> ZZ`, `702 -> AAA`.
pub fn row_label(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Column label for a zero-based column index (1-based number).
pub fn column_label(index: usize) -> String {
    (index + 1).to_string()
}

/// Row and column labels of one plate shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateLabels {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
}

impl PlateLabels {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows).map(row_label).collect(),
            cols: (0..cols).map(column_label).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    pub fn well_id(&self, index: WellIndex) -> WellId {
        well_id(index.row, index.col, &self.rows, &self.cols)
    }

    pub fn well_indices(&self, id: &WellId) -> Option<WellIndex> {
        well_indices(id, &self.rows, &self.cols)
    }

    /// Whether `id` names a well of this plate shape.
    pub fn contains(&self, id: &WellId) -> bool {
        find_indices(id, &self.rows, &self.cols).is_some()
    }

    /// Every well of the plate in row-major order.
    pub fn all_wells(&self) -> Vec<WellId> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        row_region(0, self.rows.len() - 1, &self.rows, &self.cols)
    }
}

/// Build the id of the well at (`row`, `col`).
///
/// # Panics
/// Panics if either index is outside its label array.
pub fn well_id(row: usize, col: usize, rows: &[String], cols: &[String]) -> WellId {
    WellId::new(format!("{}{}", rows[row], cols[col]))
}

/// Parse a well id back into grid indices.
///
/// Returns None (and logs a warning) when the id is malformed or does not
/// belong to this plate shape.
pub fn well_indices(id: &WellId, rows: &[String], cols: &[String]) -> Option<WellIndex> {
    let found = find_indices(id, rows, cols);
    if found.is_none() {
        log::warn!(
            "Well id '{}' does not match a {}x{} plate",
            id,
            rows.len(),
            cols.len()
        );
    }
    found
}

fn find_indices(id: &WellId, rows: &[String], cols: &[String]) -> Option<WellIndex> {
    let (row_part, col_part) = id.split()?;
    let row = rows.iter().position(|r| r == row_part)?;
    let col = cols.iter().position(|c| c == col_part)?;
    Some(WellIndex { row, col })
}

/// All wells of one row, in ascending column order.
pub fn row_wells(row: usize, rows: &[String], cols: &[String]) -> Vec<WellId> {
    (0..cols.len()).map(|col| well_id(row, col, rows, cols)).collect()
}

/// All wells of one column, in ascending row order.
pub fn column_wells(col: usize, rows: &[String], cols: &[String]) -> Vec<WellId> {
    (0..rows.len()).map(|row| well_id(row, col, rows, cols)).collect()
}

/// All wells inside the rectangle spanned by two corners, row-major.
pub fn rectangular_region(
    start: WellIndex,
    end: WellIndex,
    rows: &[String],
    cols: &[String],
) -> Vec<WellId> {
    let (r0, r1) = (start.row.min(end.row), start.row.max(end.row));
    let (c0, c1) = (start.col.min(end.col), start.col.max(end.col));
    let mut wells = Vec::with_capacity((r1 - r0 + 1) * (c1 - c0 + 1));
    for row in r0..=r1 {
        for col in c0..=c1 {
            wells.push(well_id(row, col, rows, cols));
        }
    }
    wells
}

/// All wells of every row between two row indices (inclusive), row-major.
pub fn row_region(a: usize, b: usize, rows: &[String], cols: &[String]) -> Vec<WellId> {
    (a.min(b)..=a.max(b))
        .flat_map(|row| row_wells(row, rows, cols))
        .collect()
}

/// All wells of every column between two column indices (inclusive), column by column.
pub fn column_region(a: usize, b: usize, rows: &[String], cols: &[String]) -> Vec<WellId> {
    (a.min(b)..=a.max(b))
        .flat_map(|col| column_wells(col, rows, cols))
        .collect()
}
