//! Document-level order fields.

use regex::Regex;

use super::FieldExtractor;
use super::patterns::{CURRENCY, ORDER_NO, SUPPLIER_NAME, SUPPLIER_NO};
use crate::models::order::{DEFAULT_CURRENCY, OrderHeader};

/// Extracts the first capture group of a labeled pattern.
pub struct LabeledField {
    pattern: &'static Regex,
}

impl LabeledField {
    pub fn new(pattern: &'static Regex) -> Self {
        Self { pattern }
    }

    /// Order number (`订单号：`).
    pub fn order_no() -> Self {
        Self::new(&ORDER_NO)
    }

    /// Supplier number (`供应商：`).
    pub fn supplier_no() -> Self {
        Self::new(&SUPPLIER_NO)
    }

    /// Supplier name (`供应商名称：`), rest of the line.
    pub fn supplier_name() -> Self {
        Self::new(&SUPPLIER_NAME)
    }

    /// Currency code (`货币：`).
    pub fn currency() -> Self {
        Self::new(&CURRENCY)
    }
}

impl FieldExtractor for LabeledField {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }
}

/// Builds an [`OrderHeader`] from the full document text.
pub struct HeaderExtractor {
    default_currency: String,
}

impl HeaderExtractor {
    pub fn new() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Set the currency used when the document names none.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Extract all header fields. Missing fields stay empty.
    pub fn extract(&self, text: &str) -> OrderHeader {
        let field = |extractor: LabeledField| extractor.extract(text).unwrap_or_default();

        OrderHeader {
            order_no: field(LabeledField::order_no()),
            supplier_no: field(LabeledField::supplier_no()),
            supplier_name: field(LabeledField::supplier_name()),
            customer_name: first_line(text),
            currency: LabeledField::currency()
                .extract(text)
                .unwrap_or_else(|| self.default_currency.clone()),
        }
    }
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// The customer's letterhead is the first line of a purchase order.
fn first_line(text: &str) -> String {
    text.trim()
        .lines()
        .next()
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

/// Extract header fields with the default currency.
pub fn extract_header(text: &str) -> OrderHeader {
    HeaderExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
苏州精工机械有限公司
采购订单
订单号：4500123456   日期: 20240105
供应商: 100234
供应商名称：
无锡五金制品厂
货币：USD
"#;

    #[test]
    fn test_extract_header() {
        let header = extract_header(SAMPLE);

        assert_eq!(
            header,
            OrderHeader {
                order_no: "4500123456".to_string(),
                supplier_no: "100234".to_string(),
                supplier_name: "无锡五金制品厂".to_string(),
                customer_name: "苏州精工机械有限公司".to_string(),
                currency: "USD".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let header = HeaderExtractor::new()
            .with_default_currency("EUR")
            .extract("  \n  Some Customer Ltd  \nno labels here");

        assert_eq!(header.customer_name, "Some Customer Ltd");
        assert_eq!(header.order_no, "");
        assert_eq!(header.supplier_no, "");
        assert_eq!(header.supplier_name, "");
        assert_eq!(header.currency, "EUR");
    }

    #[test]
    fn test_supplier_label_does_not_match_name_label() {
        let header = extract_header("供应商名称: ACME Parts Co.\n");
        assert_eq!(header.supplier_no, "");
        assert_eq!(header.supplier_name, "ACME Parts Co.");
    }

    #[test]
    fn test_empty_text() {
        let header = extract_header("");
        assert_eq!(header, OrderHeader::default());
    }

    #[test]
    fn test_extract_all_order_numbers() {
        let numbers = LabeledField::order_no().extract_all("订单号:A1\n订单号： B2");
        assert_eq!(numbers, vec!["A1".to_string(), "B2".to_string()]);
    }
}
