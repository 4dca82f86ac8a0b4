//! Purchase-order extraction module.

mod assembler;
mod classifier;
mod merge;
mod parser;
pub mod rules;

pub use assembler::{LineItemAssembler, line_total};
pub use classifier::{ClassifiedRow, DESCRIPTION_RULES, DescriptionRule, DescriptionStep, TableClassifier};
pub use merge::merge_by_item_code;
pub use parser::OrderParser;

use crate::error::ExtractionError;
use crate::models::order::ExtractionResult;
use crate::pdf::{DocumentSource, Page};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for purchase-order extractors.
pub trait OrderExtractor {
    /// Extract an order from decoded pages.
    fn extract_pages(&self, pages: &[Page]) -> crate::Result<ExtractionResult>;

    /// Extract an order from a document source.
    fn extract(&self, source: &dyn DocumentSource) -> crate::Result<ExtractionResult> {
        let pages = source.pages()?;
        self.extract_pages(&pages)
    }
}
