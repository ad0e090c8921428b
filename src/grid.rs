use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde_json::Number;

/// Reserved header rows: column-kind labels, human date, raw timestamp.
pub const HEADER_ROWS: usize = 3;

/// Fixed label columns preceding the data columns:
/// (blank), Category, Chain, Category, Token.
pub const LABEL_COLUMNS: usize = 5;

/// The cross-chain total is stored under the reserved `tvl` partition key
/// and rendered under a display alias.
pub fn normalize_chain(chain: &str) -> &str {
    if chain == "tvl" { "Total" } else { chain }
}

/// A populated grid cell. Numbers pass through from the source records
/// untouched; no rounding or reformatting is applied on the way out.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Num(Number),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Number> for Cell {
    fn from(value: Number) -> Self {
        Cell::Num(value)
    }
}

/// Sparse row/column grid with dense CSV materialization.
///
/// Rows and columns are discovered from data, so the grid never allocates
/// dense storage: cells live in a `row -> column -> Cell` map and every
/// coordinate inside the final rectangle that was never populated
/// serializes as an empty field. Absence is meaningful (no data that day)
/// and is never coerced to zero.
///
/// Row ids are append-only and assigned in discovery order; the three
/// header rows occupy ids `0..3` from construction.
#[derive(Debug)]
pub struct SparseGrid {
    cells: BTreeMap<usize, BTreeMap<usize, Cell>>,
    row_count: usize,
    column_count: usize,
}

impl SparseGrid {
    pub fn new() -> Self {
        let mut grid = Self {
            cells: BTreeMap::new(),
            row_count: HEADER_ROWS,
            column_count: LABEL_COLUMNS,
        };
        for (col, label) in ["", "Category", "Chain", "Category", "Token"]
            .into_iter()
            .enumerate()
            .skip(1)
        {
            grid.set(0, col, label.into());
        }
        grid.set(1, 0, "Date".into());
        grid.set(2, 0, "Timestamp".into());
        grid
    }

    /// Appends a data row described by its label tuple and returns its id.
    pub fn push_row(&mut self, labels: impl IntoIterator<Item = Cell>) -> usize {
        let row = self.row_count;
        self.row_count += 1;
        for (col, label) in labels.into_iter().enumerate() {
            self.set(row, col, label);
        }
        row
    }

    pub fn set(&mut self, row: usize, column: usize, cell: Cell) {
        self.cells.entry(row).or_default().insert(column, cell);
    }

    /// Grows the rectangle to cover data columns `LABEL_COLUMNS..LABEL_COLUMNS + n`.
    pub fn reserve_data_columns(&mut self, n: usize) {
        self.column_count = LABEL_COLUMNS + n;
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Flattens the sparse grid into comma/newline-delimited text, one field
    /// per (row, column) coordinate in strict id/offset order. Unpopulated
    /// cells render as empty fields. Fields are numeric or simple labels, so
    /// no quoting is applied.
    pub fn to_csv(&self) -> String {
        (0..self.row_count)
            .map(|row| {
                let cells = self.cells.get(&row);
                (0..self.column_count)
                    .map(|col| {
                        cells
                            .and_then(|r| r.get(&col))
                            .map(Cell::to_string)
                            .unwrap_or_default()
                    })
                    .join(",")
            })
            .join("\n")
    }
}

impl Default for SparseGrid {
    fn default() -> Self {
        Self::new()
    }
}
