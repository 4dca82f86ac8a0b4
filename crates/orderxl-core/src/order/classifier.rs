//! Table row classification.
//!
//! Columns are never addressed by position. Each data row is anchored on its
//! item-code cell and everything to the right of the anchor is classified by
//! shape: the numeric run gives quantity, unit price and amount in that
//! order, an eight-digit cell gives the delivery date, and the text between
//! the anchor and the first number or unit word gives the description.
//!
//! The description walk stops at the first bare number once text has been
//! collected, so a description such as `Rev 2 Bracket` is cut to `Rev`.
//! Only plain numbers end the walk: a quantity with thousands separators
//! (`1,000`) is taken into the description and the price ends it.

use tracing::trace;

use super::rules::{
    format_compact_date, is_bare_number, is_line_number, is_numeric_cell, match_item_code,
    normalize_cell, strip_thousands,
};
use crate::models::config::ExtractionConfig;
use crate::pdf::Table;

/// A table row recognized as an order line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedRow {
    /// Leading line number when the first cell is all digits.
    pub line_no: Option<String>,
    /// Item-code cell text.
    pub item_code: String,
    /// Description tokens joined by single spaces (may be empty).
    pub description: String,
    /// First numeric cell right of the anchor.
    pub quantity: String,
    /// Second numeric cell right of the anchor.
    pub unit_price: String,
    /// Third numeric cell, thousands separators removed.
    pub amount: Option<String>,
    /// First `YYYYMMDD` cell of the row as `YYYY-MM-DD`.
    pub delivery_date: Option<String>,
}

/// What the description walk does with a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionStep {
    /// Leave the cell out and keep walking.
    Skip,
    /// Ends the description once it has started, otherwise skipped.
    Boundary,
    /// Append the cell to the description.
    Take,
}

/// One entry of the description rule list. The first matching rule decides.
pub struct DescriptionRule {
    pub name: &'static str,
    pub applies: fn(&TableClassifier, &str, &str) -> bool,
    pub step: DescriptionStep,
}

fn rule_bare_number(_: &TableClassifier, cell: &str, _: &str) -> bool {
    is_bare_number(cell)
}

fn rule_unit(classifier: &TableClassifier, cell: &str, _: &str) -> bool {
    classifier.is_unit(cell)
}

fn rule_blank(_: &TableClassifier, cell: &str, _: &str) -> bool {
    cell.is_empty()
}

fn rule_anchor(_: &TableClassifier, cell: &str, anchor: &str) -> bool {
    cell == anchor
}

/// Description rules in priority order; unmatched cells are taken.
pub const DESCRIPTION_RULES: &[DescriptionRule] = &[
    DescriptionRule {
        name: "bare-number",
        applies: rule_bare_number,
        step: DescriptionStep::Boundary,
    },
    DescriptionRule {
        name: "unit",
        applies: rule_unit,
        step: DescriptionStep::Boundary,
    },
    DescriptionRule {
        name: "blank",
        applies: rule_blank,
        step: DescriptionStep::Skip,
    },
    DescriptionRule {
        name: "anchor",
        applies: rule_anchor,
        step: DescriptionStep::Skip,
    },
];

/// Classifies the rows of one table grid.
pub struct TableClassifier {
    marker: String,
    unit_tokens: Vec<String>,
    min_row_cells: usize,
}

impl TableClassifier {
    /// Create a classifier with the default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a classifier from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            marker: config.item_code_marker.clone(),
            unit_tokens: config.unit_tokens.iter().map(|t| t.to_lowercase()).collect(),
            min_row_cells: config.min_row_cells,
        }
    }

    /// Set the header text marking the item-code column.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Ignore rows with fewer cells than `min` (0 disables the check).
    pub fn with_min_row_cells(mut self, min: usize) -> Self {
        self.min_row_cells = min;
        self
    }

    /// Check whether a cell is a unit-of-measure word.
    pub fn is_unit(&self, cell: &str) -> bool {
        let lower = cell.to_lowercase();
        self.unit_tokens.iter().any(|t| *t == lower)
    }

    /// Index of the first row holding the item-code column marker.
    pub fn find_header_row(&self, table: &Table) -> Option<usize> {
        table.iter().position(|row| {
            row.iter()
                .flatten()
                .any(|cell| cell.contains(self.marker.as_str()))
        })
    }

    /// Classify every data row below the header row, in order.
    pub fn classify_table(&self, table: &Table) -> Vec<ClassifiedRow> {
        let Some(header) = self.find_header_row(table) else {
            trace!("Table without '{}' header row skipped", self.marker);
            return Vec::new();
        };

        table[header + 1..]
            .iter()
            .filter(|row| !row.is_empty() && row.len() >= self.min_row_cells)
            .filter_map(|row| {
                let cells: Vec<String> =
                    row.iter().map(|cell| normalize_cell(cell.as_deref())).collect();
                self.classify_row(&cells)
            })
            .collect()
    }

    /// Classify one normalized row. Returns `None` for rows that are not
    /// order lines.
    pub fn classify_row(&self, row: &[String]) -> Option<ClassifiedRow> {
        let Some(anchor) = row.iter().position(|cell| match_item_code(cell)) else {
            trace!("Row without item code skipped: {:?}", row);
            return None;
        };
        let item_code = &row[anchor];
        let tail = &row[anchor + 1..];

        let numeric: Vec<(usize, &str)> = tail
            .iter()
            .enumerate()
            .filter(|(_, cell)| is_numeric_cell(cell))
            .map(|(i, cell)| (anchor + 1 + i, cell.as_str()))
            .collect();

        let (Some(&(_, quantity)), Some(&(_, unit_price))) = (numeric.first(), numeric.get(1))
        else {
            trace!("Row {} lacks quantity or price, skipped", item_code);
            return None;
        };

        trace!("Row {}: numeric cells {:?}", item_code, numeric);

        Some(ClassifiedRow {
            line_no: row.first().filter(|cell| is_line_number(cell)).cloned(),
            item_code: item_code.clone(),
            description: self.describe(tail, item_code),
            quantity: quantity.to_string(),
            unit_price: unit_price.to_string(),
            amount: numeric.get(2).map(|&(_, cell)| strip_thousands(cell)),
            delivery_date: row.iter().find_map(|cell| format_compact_date(cell)),
        })
    }

    fn step(&self, cell: &str, anchor: &str) -> DescriptionStep {
        DESCRIPTION_RULES
            .iter()
            .find(|rule| (rule.applies)(self, cell, anchor))
            .map(|rule| {
                trace!("Description rule '{}' matched {:?}", rule.name, cell);
                rule.step
            })
            .unwrap_or(DescriptionStep::Take)
    }

    fn describe(&self, tail: &[String], anchor: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for cell in tail {
            match self.step(cell, anchor) {
                DescriptionStep::Take => parts.push(cell),
                DescriptionStep::Boundary if !parts.is_empty() => break,
                DescriptionStep::Boundary | DescriptionStep::Skip => {}
            }
        }

        parts.join(" ")
    }
}

impl Default for TableClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_empty() { None } else { Some(cell.to_string()) })
                    .collect()
            })
            .collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_classify_reference_row() {
        let grid = table(&[
            &["行号", "名称", "零件号", "描述", "数量", "单价", "金额", "交期"],
            &["1", "Widget", "12.345.ABCDE", "Bracket Kit", "10", "2.50", "25.00", "20240101"],
        ]);

        let rows = TableClassifier::new().classify_table(&grid);

        assert_eq!(
            rows,
            vec![ClassifiedRow {
                line_no: Some("1".to_string()),
                item_code: "12.345.ABCDE".to_string(),
                description: "Bracket Kit".to_string(),
                quantity: "10".to_string(),
                unit_price: "2.50".to_string(),
                amount: Some("25.00".to_string()),
                delivery_date: Some("2024-01-01".to_string()),
            }]
        );
    }

    #[test]
    fn test_table_without_header_yields_nothing() {
        let grid = table(&[&["1", "12.345.ABCDE", "Kit", "10", "2.50"]]);
        assert!(TableClassifier::new().classify_table(&grid).is_empty());
    }

    #[test]
    fn test_rows_above_header_ignored() {
        let grid = table(&[
            &["12.345.AAAAA", "Above", "1", "1"],
            &["零件号\n(Part No.)", "描述", "数量", "单价"],
            &["12.345.BBBBB", "Below", "2", "3"],
        ]);

        let rows = TableClassifier::new().classify_table(&grid);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_code, "12.345.BBBBB");
    }

    #[test]
    fn test_row_without_item_code_skipped() {
        let classifier = TableClassifier::new();
        assert_eq!(classifier.classify_row(&row(&["合计", "", "100", "250.00"])), None);
    }

    #[test]
    fn test_row_without_numbers_skipped() {
        let classifier = TableClassifier::new();
        assert_eq!(
            classifier.classify_row(&row(&["1", "12.345.ABCDE", "Bracket Kit", "pcs"])),
            None
        );
        assert_eq!(
            classifier.classify_row(&row(&["1", "12.345.ABCDE", "Bracket Kit", "10"])),
            None
        );
    }

    #[test]
    fn test_numbers_left_of_anchor_ignored() {
        let classifier = TableClassifier::new();
        let result = classifier
            .classify_row(&row(&["7", "99", "12.345.ABCDE", "Nut", "4", "0.25"]))
            .unwrap();

        assert_eq!(result.quantity, "4");
        assert_eq!(result.unit_price, "0.25");
        assert_eq!(result.amount, None);
    }

    #[test]
    fn test_amount_strips_thousands() {
        let classifier = TableClassifier::new();
        let result = classifier
            .classify_row(&row(&["12.345.X1", "Frame", "1,000", "1.50", "1,500.00", "9"]))
            .unwrap();

        assert_eq!(result.quantity, "1,000");
        assert_eq!(result.unit_price, "1.50");
        assert_eq!(result.amount, Some("1500.00".to_string()));
    }

    #[test]
    fn test_delivery_date_anywhere_in_row() {
        let classifier = TableClassifier::new();
        let result = classifier
            .classify_row(&row(&["20240315", "12.345.X1", "Frame", "1", "2"]))
            .unwrap();
        assert_eq!(result.delivery_date, Some("2024-03-15".to_string()));
        assert_eq!(result.line_no, Some("20240315".to_string()));

        let result = classifier
            .classify_row(&row(&["12.345.X1", "Frame", "1", "2"]))
            .unwrap();
        assert_eq!(result.delivery_date, None);
        assert_eq!(result.line_no, None);
    }

    #[test]
    fn test_description_skips_leading_units_and_blanks() {
        let classifier = TableClassifier::new();
        let result = classifier
            .classify_row(&row(&["12.345.X1", "", "PCS", "Hex", "Bolt M8", "件", "5", "0.1"]))
            .unwrap();
        assert_eq!(result.description, "Hex Bolt M8");
    }

    #[test]
    fn test_description_stops_at_embedded_number() {
        let classifier = TableClassifier::new();
        let result = classifier
            .classify_row(&row(&["12.345.X1", "Rev", "2", "Bracket", "3", "4.00"]))
            .unwrap();

        assert_eq!(result.description, "Rev");
        assert_eq!(result.quantity, "2");
        assert_eq!(result.unit_price, "3");
        assert_eq!(result.amount, Some("4.00".to_string()));
    }

    #[test]
    fn test_description_takes_grouped_quantity() {
        let classifier = TableClassifier::new();
        let result = classifier
            .classify_row(&row(&["12.345.PLATE", "Steel Plate", "1,000", "1.20", "1,200.00"]))
            .unwrap();

        assert_eq!(result.description, "Steel Plate 1,000");
        assert_eq!(result.quantity, "1,000");
        assert_eq!(result.unit_price, "1.20");
        assert_eq!(result.amount, Some("1200.00".to_string()));
    }

    #[test]
    fn test_min_row_cells() {
        let grid = table(&[
            &["零件号", "描述", "数量", "单价"],
            &["12.345.X1", "Short", "1", "2"],
        ]);

        assert_eq!(TableClassifier::new().classify_table(&grid).len(), 1);
        assert!(
            TableClassifier::new()
                .with_min_row_cells(6)
                .classify_table(&grid)
                .is_empty()
        );
    }

    #[test]
    fn test_ragged_rows_tolerated() {
        let grid: Table = vec![
            vec![Some("零件号".to_string())],
            vec![],
            vec![
                None,
                Some("12.345.X1".to_string()),
                None,
                Some("Plate\nsteel".to_string()),
                Some("3".to_string()),
                Some("7.5".to_string()),
            ],
        ];

        let rows = TableClassifier::new().classify_table(&grid);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Plate steel");
        assert_eq!(rows[0].line_no, None);
    }

    #[test]
    fn test_custom_marker() {
        let grid = table(&[&["Part No.", "Qty", "Price"], &["12.345.X1", "1", "2"]]);

        assert!(TableClassifier::new().classify_table(&grid).is_empty());
        assert_eq!(
            TableClassifier::new()
                .with_marker("Part No.")
                .classify_table(&grid)
                .len(),
            1
        );
    }
}
