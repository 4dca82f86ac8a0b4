//! Purchase-order data models.

use serde::{Deserialize, Serialize};

/// Currency used when the document does not name one.
pub const DEFAULT_CURRENCY: &str = "CNY";

/// Document-level metadata of a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHeader {
    /// Purchase order number.
    #[serde(default, alias = "orderNo")]
    pub order_no: String,

    /// Supplier number assigned by the customer.
    #[serde(default, alias = "supplierNo")]
    pub supplier_no: String,

    /// Supplier name.
    #[serde(default, alias = "supplierName")]
    pub supplier_name: String,

    /// Customer name, taken from the first line of the document.
    #[serde(default, alias = "customerName")]
    pub customer_name: String,

    /// Currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for OrderHeader {
    fn default() -> Self {
        Self {
            order_no: String::new(),
            supplier_no: String::new(),
            supplier_name: String::new(),
            customer_name: String::new(),
            currency: default_currency(),
        }
    }
}

/// One purchasable line of an order.
///
/// Numeric fields stay strings so that values are carried exactly as they
/// appeared in the document. Deserialization also accepts the Chinese
/// column keys used by the desktop front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// `{order_no}_{index}`, unique within one document.
    #[serde(default)]
    pub id: String,

    /// Extraction run date (`YYYY-MM-DD`).
    #[serde(default, alias = "日期")]
    pub date: String,

    #[serde(default, alias = "客户名")]
    pub customer_name: String,

    #[serde(default, alias = "订单号")]
    pub order_no: String,

    /// Structured item code (`NN.NNN.XXXX`).
    #[serde(default, alias = "零件号")]
    pub item_code: String,

    #[serde(default, alias = "零件描述")]
    pub description: String,

    #[serde(default, alias = "数量")]
    pub quantity: String,

    #[serde(default, alias = "价格")]
    pub unit_price: String,

    #[serde(default, alias = "金额")]
    pub amount: String,

    #[serde(default, alias = "计划交货日期")]
    pub planned_delivery_date: String,

    #[serde(default, alias = "订单交期")]
    pub order_delivery_date: String,
}

/// Result of parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Line items in page, table, row order.
    pub items: Vec<OrderLineItem>,
    /// Document-level fields.
    pub info: OrderHeader,
}

impl ExtractionResult {
    /// Check whether any line item was found.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_defaults_currency() {
        let header: OrderHeader = serde_json::from_str(r#"{"order_no": "PO1"}"#).unwrap();
        assert_eq!(header.order_no, "PO1");
        assert_eq!(header.currency, "CNY");
        assert_eq!(OrderHeader::default().currency, "CNY");
    }

    #[test]
    fn test_header_accepts_camel_case() {
        let header: OrderHeader = serde_json::from_str(
            r#"{"orderNo": "4500012345", "supplierNo": "S-7", "supplierName": "ACME",
                "customerName": "Foo GmbH", "currency": "EUR"}"#,
        )
        .unwrap();

        assert_eq!(header.order_no, "4500012345");
        assert_eq!(header.supplier_no, "S-7");
        assert_eq!(header.supplier_name, "ACME");
        assert_eq!(header.customer_name, "Foo GmbH");
        assert_eq!(header.currency, "EUR");
    }

    #[test]
    fn test_item_accepts_chinese_keys() {
        let item: OrderLineItem = serde_json::from_str(
            r#"{"id": "PO1_0", "日期": "2024-01-02", "零件号": "12.345.ABC",
                "零件描述": "Bolt", "数量": "3", "价格": "1.5", "金额": "4.5"}"#,
        )
        .unwrap();

        assert_eq!(item.date, "2024-01-02");
        assert_eq!(item.item_code, "12.345.ABC");
        assert_eq!(item.description, "Bolt");
        assert_eq!(item.quantity, "3");
        assert_eq!(item.unit_price, "1.5");
        assert_eq!(item.amount, "4.5");
        assert_eq!(item.planned_delivery_date, "");
    }

    #[test]
    fn test_item_serializes_snake_case() {
        let item = OrderLineItem {
            id: "PO1_0".to_string(),
            item_code: "12.345.ABC".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["item_code"], "12.345.ABC");
        assert_eq!(json["planned_delivery_date"], "");
    }
}
