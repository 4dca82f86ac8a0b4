//! In-memory worksheet model.

use std::collections::BTreeMap;

/// Value of a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Numeric value, if the cell holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    /// Text value, if the cell holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }
}

/// Formatting applied to a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    /// Font color as RGB hex.
    pub font_color: Option<String>,
    /// Solid background fill as RGB hex.
    pub fill: Option<String>,
    /// Center horizontally and vertically.
    pub centered: bool,
    /// Thin border on all four sides.
    pub border: bool,
}

/// A cell with its value and optional style.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: Option<CellValue>,
    pub style: Option<CellStyle>,
}

/// A single worksheet. Coordinates are 1-based `(column, row)`.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u32), Cell>,
    column_widths: BTreeMap<u32, f64>,
    frozen_rows: u32,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn cell_mut(&mut self, col: u32, row: u32) -> &mut Cell {
        self.cells.entry((col, row)).or_insert(Cell {
            value: None,
            style: None,
        })
    }

    pub fn set_text(&mut self, col: u32, row: u32, value: impl Into<String>) {
        self.cell_mut(col, row).value = Some(CellValue::Text(value.into()));
    }

    pub fn set_number(&mut self, col: u32, row: u32, value: f64) {
        self.cell_mut(col, row).value = Some(CellValue::Number(value));
    }

    pub fn set_style(&mut self, col: u32, row: u32, style: CellStyle) {
        self.cell_mut(col, row).style = Some(style);
    }

    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Keep the top `rows` rows visible while scrolling.
    pub fn freeze_rows(&mut self, rows: u32) {
        self.frozen_rows = rows;
    }

    pub fn value(&self, col: u32, row: u32) -> Option<&CellValue> {
        self.cells.get(&(col, row)).and_then(|c| c.value.as_ref())
    }

    pub fn style(&self, col: u32, row: u32) -> Option<&CellStyle> {
        self.cells.get(&(col, row)).and_then(|c| c.style.as_ref())
    }

    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.column_widths.iter().map(|(c, w)| (*c, *w))
    }

    pub fn frozen_rows(&self) -> u32 {
        self.frozen_rows
    }

    /// All cells as `((column, row), cell)`, row-major within each column.
    pub fn cells(&self) -> impl Iterator<Item = (&(u32, u32), &Cell)> {
        self.cells.iter()
    }

    /// Highest row holding a cell.
    pub fn last_row(&self) -> u32 {
        self.cells.keys().map(|(_, row)| *row).max().unwrap_or(0)
    }
}

/// Spreadsheet column letters for a 1-based index (`1` → `A`, `27` → `AA`).
pub fn column_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}
