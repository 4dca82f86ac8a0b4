//! Document-level order extraction.

use std::path::Path;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::OrderExtractor;
use super::assembler::LineItemAssembler;
use super::classifier::TableClassifier;
use super::rules::HeaderExtractor;
use crate::error::DocumentError;
use crate::models::config::{ExtractionConfig, PdfConfig};
use crate::models::order::{ExtractionResult, OrderLineItem};
use crate::pdf::{Page, open_document};

/// Rule-based purchase-order parser.
///
/// Header fields come from the concatenated page text; line items come from
/// the page tables, in page, table, row order.
pub struct OrderParser {
    header: HeaderExtractor,
    classifier: TableClassifier,
    empty_description: String,
    run_date: Option<NaiveDate>,
}

impl OrderParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            header: HeaderExtractor::new().with_default_currency(config.default_currency.clone()),
            classifier: TableClassifier::from_config(config),
            empty_description: config.empty_description.clone(),
            run_date: None,
        }
    }

    /// Stamp items with a fixed date instead of today.
    pub fn with_run_date(mut self, date: NaiveDate) -> Self {
        self.run_date = Some(date);
        self
    }

    /// Open a document and extract its order.
    pub fn parse_file(&self, path: &Path, pdf: &PdfConfig) -> crate::Result<ExtractionResult> {
        let source = open_document(path, pdf)?;
        self.extract(source.as_ref())
    }

    fn full_text(pages: &[Page]) -> String {
        let mut text = String::new();
        for page_text in pages.iter().filter_map(|p| p.text.as_deref()) {
            text.push_str(page_text);
            text.push('\n');
        }
        text
    }
}

impl Default for OrderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderExtractor for OrderParser {
    fn extract_pages(&self, pages: &[Page]) -> crate::Result<ExtractionResult> {
        let start = Instant::now();

        let text = Self::full_text(pages);
        if text.trim().is_empty() {
            return Err(DocumentError::NoText.into());
        }

        let info = self.header.extract(&text);
        debug!("Order header: {:?}", info);

        let assembler = LineItemAssembler::new(
            self.run_date.unwrap_or_else(|| Local::now().date_naive()),
        )
        .with_empty_description(self.empty_description.clone());

        let mut items: Vec<OrderLineItem> = Vec::new();
        for page in pages {
            for (t, table) in page.tables.iter().enumerate() {
                let rows = self.classifier.classify_table(table);
                debug!("Page {} table {}: {} line items", page.number, t + 1, rows.len());

                for row in rows {
                    let item = assembler.assemble(row, items.len(), &info)?;
                    items.push(item);
                }
            }
        }

        info!(
            "Extracted {} items for order '{}' from {} pages in {}ms",
            items.len(),
            info.order_no,
            pages.len(),
            start.elapsed().as_millis()
        );

        Ok(ExtractionResult { items, info })
    }
}
