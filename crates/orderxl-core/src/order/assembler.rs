//! Line item assembly from classified rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Result;
use super::classifier::ClassifiedRow;
use super::rules::parse_amount;
use crate::error::ExtractionError;
use crate::models::order::{OrderHeader, OrderLineItem};

/// Turns classified rows into [`OrderLineItem`]s.
pub struct LineItemAssembler {
    run_date: String,
    empty_description: String,
}

impl LineItemAssembler {
    /// Create an assembler stamping items with `run_date`.
    pub fn new(run_date: NaiveDate) -> Self {
        Self {
            run_date: run_date.format("%Y-%m-%d").to_string(),
            empty_description: "-".to_string(),
        }
    }

    /// Set the placeholder used when a row has no description.
    pub fn with_empty_description(mut self, placeholder: impl Into<String>) -> Self {
        self.empty_description = placeholder.into();
        self
    }

    /// Build the item at position `index` of the document.
    pub fn assemble(
        &self,
        row: ClassifiedRow,
        index: usize,
        header: &OrderHeader,
    ) -> Result<OrderLineItem> {
        let amount = match row.amount {
            Some(amount) => amount,
            None => line_total(&row.quantity, &row.unit_price)?.to_string(),
        };
        let delivery_date = row.delivery_date.unwrap_or_default();
        let description = if row.description.is_empty() {
            self.empty_description.clone()
        } else {
            row.description
        };

        Ok(OrderLineItem {
            id: format!("{}_{}", header.order_no, index),
            date: self.run_date.clone(),
            customer_name: header.customer_name.clone(),
            order_no: header.order_no.clone(),
            item_code: row.item_code,
            description,
            quantity: row.quantity,
            unit_price: row.unit_price,
            amount,
            planned_delivery_date: delivery_date.clone(),
            order_delivery_date: delivery_date,
        })
    }
}

/// `quantity × unit_price` in decimal arithmetic.
pub fn line_total(quantity: &str, unit_price: &str) -> Result<Decimal> {
    let qty = decimal_field("quantity", quantity)?;
    let price = decimal_field("unit_price", unit_price)?;

    qty.checked_mul(price).ok_or_else(|| ExtractionError::Parse {
        field: "amount".to_string(),
        value: format!("{} x {}", quantity, unit_price),
    })
}

fn decimal_field(field: &str, value: &str) -> Result<Decimal> {
    parse_amount(value).ok_or_else(|| ExtractionError::Parse {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header() -> OrderHeader {
        OrderHeader {
            order_no: "4500001".to_string(),
            customer_name: "ACME".to_string(),
            ..Default::default()
        }
    }

    fn assembler() -> LineItemAssembler {
        LineItemAssembler::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn row(quantity: &str, unit_price: &str, amount: Option<&str>) -> ClassifiedRow {
        ClassifiedRow {
            item_code: "12.345.ABC".to_string(),
            description: "Bracket".to_string(),
            quantity: quantity.to_string(),
            unit_price: unit_price.to_string(),
            amount: amount.map(str::to_string),
            delivery_date: Some("2024-07-01".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_assemble_copies_header_fields() {
        let item = assembler().assemble(row("10", "2.50", Some("25.00")), 3, &header()).unwrap();

        assert_eq!(
            item,
            OrderLineItem {
                id: "4500001_3".to_string(),
                date: "2024-06-01".to_string(),
                customer_name: "ACME".to_string(),
                order_no: "4500001".to_string(),
                item_code: "12.345.ABC".to_string(),
                description: "Bracket".to_string(),
                quantity: "10".to_string(),
                unit_price: "2.50".to_string(),
                amount: "25.00".to_string(),
                planned_delivery_date: "2024-07-01".to_string(),
                order_delivery_date: "2024-07-01".to_string(),
            }
        );
    }

    #[test]
    fn test_amount_computed_when_missing() {
        let item = assembler().assemble(row("10", "2.50", None), 0, &header()).unwrap();
        assert_eq!(item.amount, "25.00");

        let item = assembler().assemble(row("1,200", "0.5", None), 0, &header()).unwrap();
        assert_eq!(item.amount, "600.0");
    }

    #[test]
    fn test_empty_description_placeholder() {
        let mut r = row("1", "1", None);
        r.description.clear();
        r.delivery_date = None;

        let item = assembler().assemble(r, 0, &header()).unwrap();
        assert_eq!(item.description, "-");
        assert_eq!(item.planned_delivery_date, "");
        assert_eq!(item.order_delivery_date, "");
    }

    #[test]
    fn test_id_with_empty_order_no() {
        let item = assembler()
            .assemble(row("1", "1", None), 0, &OrderHeader::default())
            .unwrap();
        assert_eq!(item.id, "_0");
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total("3", "1.25").unwrap().to_string(), "3.75");
        assert!(matches!(
            line_total("abc", "1"),
            Err(ExtractionError::Parse { field, .. }) if field == "quantity"
        ));
    }

    #[test]
    fn test_line_total_out_of_range() {
        let digits = "1234567890123456789012345678901234567890";
        assert!(matches!(
            line_total(digits, "1"),
            Err(ExtractionError::Parse { field, .. }) if field == "quantity"
        ));
        assert!(matches!(
            line_total("79228162514264337593543950335", "2"),
            Err(ExtractionError::Parse { field, .. }) if field == "amount"
        ));
    }
}
