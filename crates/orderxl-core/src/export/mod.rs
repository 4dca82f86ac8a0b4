//! Workbook export of extracted order lines.

mod sheet;
mod xlsx;

pub use sheet::{Cell, CellStyle, CellValue, Sheet, column_letter};
pub use xlsx::XlsxWriter;

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::order::{OrderHeader, OrderLineItem};
use crate::order::{merge_by_item_code, rules::parse_amount};

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Persists a laid-out sheet.
pub trait WorkbookWriter {
    fn write(&self, sheet: &Sheet, path: &Path) -> Result<()>;
}

/// A request to write order lines to a workbook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Destination file.
    pub path: PathBuf,
    /// Lines to write.
    #[serde(rename = "data", alias = "items", default)]
    pub items: Vec<OrderLineItem>,
    /// Document header (not written to the sheet).
    #[serde(default)]
    pub info: OrderHeader,
    /// Merge lines sharing an item code first.
    #[serde(default)]
    pub merge: bool,
}

/// Totals of a written sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of item rows written.
    pub rows: usize,
    /// Sheet row holding the totals (1-based).
    pub totals_row: u32,
    pub total_quantity: Decimal,
    pub total_amount: Decimal,
}

const COL_DESCRIPTION: u32 = 5;
const COL_QUANTITY: u32 = 6;
const COL_UNIT_PRICE: u32 = 7;
const COL_AMOUNT: u32 = 8;

/// Lays out order lines as a single styled sheet with a totals row.
pub struct WorkbookExporter {
    config: ExportConfig,
}

impl WorkbookExporter {
    pub fn new() -> Self {
        Self::with_config(ExportConfig::default())
    }

    pub fn with_config(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Build the sheet for `items`.
    ///
    /// Row 1 is the frozen header, items follow from row 2, and the totals
    /// row sits two rows below the last item.
    pub fn layout(&self, items: &[OrderLineItem]) -> Result<(Sheet, ExportSummary)> {
        let mut sheet = Sheet::new(self.config.sheet_name.clone());

        let header_style = CellStyle {
            bold: true,
            font_color: Some(self.config.header_font_color.clone()),
            fill: Some(self.config.header_fill.clone()),
            centered: true,
            border: true,
        };
        for (i, label) in self.config.headers.iter().enumerate() {
            let col = i as u32 + 1;
            sheet.set_text(col, 1, label.clone());
            sheet.set_style(col, 1, header_style.clone());
        }
        for (i, width) in self.config.column_widths.iter().enumerate() {
            sheet.set_column_width(i as u32 + 1, *width);
        }
        sheet.freeze_rows(1);

        let bordered = CellStyle {
            border: true,
            ..Default::default()
        };
        let mut total_quantity = Decimal::ZERO;
        let mut total_amount = Decimal::ZERO;

        for (i, item) in items.iter().enumerate() {
            let row = i as u32 + 2;
            let quantity = number(item, "quantity", &item.quantity)?;
            let unit_price = number(item, "unit_price", &item.unit_price)?;
            let amount = number(item, "amount", &item.amount)?;

            let texts = [
                (1, &item.date),
                (2, &item.customer_name),
                (3, &item.order_no),
                (4, &item.item_code),
                (COL_DESCRIPTION, &item.description),
                (9, &item.planned_delivery_date),
                (10, &item.order_delivery_date),
            ];
            for (col, text) in texts {
                sheet.set_text(col, row, text.clone());
            }
            sheet.set_number(COL_QUANTITY, row, to_f64(quantity));
            sheet.set_number(COL_UNIT_PRICE, row, to_f64(unit_price));
            sheet.set_number(COL_AMOUNT, row, to_f64(amount));

            for col in 1..=10 {
                sheet.set_style(col, row, bordered.clone());
            }

            total_quantity = total_quantity
                .checked_add(quantity)
                .ok_or_else(|| overflow(item, "quantity"))?;
            total_amount = total_amount
                .checked_add(amount)
                .ok_or_else(|| overflow(item, "amount"))?;
        }

        let totals_row = items.len() as u32 + 3;
        sheet.set_text(COL_DESCRIPTION, totals_row, self.config.total_label.clone());
        sheet.set_style(
            COL_DESCRIPTION,
            totals_row,
            CellStyle {
                bold: true,
                ..Default::default()
            },
        );
        sheet.set_number(COL_QUANTITY, totals_row, to_f64(total_quantity));
        sheet.set_number(COL_AMOUNT, totals_row, to_f64(total_amount));

        let summary = ExportSummary {
            rows: items.len(),
            totals_row,
            total_quantity,
            total_amount,
        };
        Ok((sheet, summary))
    }

    /// Lay out and write a request with the given writer.
    pub fn export_with<W: WorkbookWriter>(
        &self,
        writer: &W,
        request: &ExportRequest,
    ) -> Result<ExportSummary> {
        let merged;
        let items = if request.merge || self.config.merge_same_item_code {
            merged = merge_by_item_code(&request.items)?;
            &merged
        } else {
            &request.items
        };

        let (sheet, summary) = self.layout(items)?;
        writer.write(&sheet, &request.path)?;

        info!(
            "Exported {} rows to {} (quantity {}, amount {})",
            summary.rows,
            request.path.display(),
            summary.total_quantity,
            summary.total_amount
        );
        Ok(summary)
    }

    /// Lay out and write a request as `.xlsx`.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportSummary> {
        self.export_with(&XlsxWriter::new(), request)
    }
}

impl Default for WorkbookExporter {
    fn default() -> Self {
        Self::new()
    }
}

// Empty values count as zero.
fn number(item: &OrderLineItem, field: &'static str, value: &str) -> Result<Decimal> {
    if value.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_amount(value).ok_or_else(|| ExportError::InvalidNumber {
        id: item.id.clone(),
        field,
        value: value.to_string(),
    })
}

fn overflow(item: &OrderLineItem, field: &'static str) -> ExportError {
    ExportError::Overflow {
        id: item.id.clone(),
        field,
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
