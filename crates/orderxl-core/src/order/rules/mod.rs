//! Rule-based field extractors for purchase orders.

pub mod cells;
pub mod header;
pub mod patterns;

pub use cells::{
    format_compact_date, is_bare_number, is_line_number, is_numeric_cell, match_item_code,
    normalize_cell, parse_amount, strip_thousands,
};
pub use header::{HeaderExtractor, LabeledField, extract_header};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
