//! Table grids rebuilt from page text.
//!
//! Text extracted from a PDF keeps wide gaps between table columns. A line is
//! split into cells on runs of at least `min_gap` spaces (or any tab), and
//! blank lines separate one table from the next.

use super::Table;

/// Split page text into tables.
pub fn tables_from_text(text: &str, min_gap: usize) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Table = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                tables.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(split_columns(line, min_gap));
    }

    if !current.is_empty() {
        tables.push(current);
    }

    tables
}

/// Split one line into cells on wide whitespace gaps.
///
/// Narrower gaps are kept inside the cell as a single space.
pub fn split_columns(line: &str, min_gap: usize) -> Vec<Option<String>> {
    let min_gap = min_gap.max(1);
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut gap = 0usize;
    let mut tab = false;

    for ch in line.trim().chars() {
        if ch.is_whitespace() {
            gap += 1;
            tab |= ch == '\t';
            continue;
        }

        if gap > 0 {
            if tab || gap >= min_gap {
                cells.push(Some(std::mem::take(&mut cell)));
            } else {
                cell.push(' ');
            }
            gap = 0;
            tab = false;
        }
        cell.push(ch);
    }

    if !cell.is_empty() {
        cells.push(Some(cell));
    }

    cells
}
