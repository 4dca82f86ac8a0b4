//! Merging of line items that share an item code.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::rules::parse_amount;
use crate::error::ExportError;
use crate::models::order::OrderLineItem;

struct Group {
    key: String,
    items: Vec<OrderLineItem>,
    total_qty: Decimal,
    total_amount: Decimal,
    total_price_amount: Decimal,
}

/// Merge items with the same item code into one line.
///
/// Items without a code are keyed by their id and never merged. A merged
/// line sums quantity and amount (falling back to `quantity × unit_price`
/// when an amount is zero or missing), carries the quantity-weighted unit
/// price, and lists each delivery date with its quantity unless all dates
/// agree. Groups keep the order of their first item.
///
/// Fails with [`ExportError::Overflow`] when a product or sum leaves the
/// decimal range.
pub fn merge_by_item_code(items: &[OrderLineItem]) -> Result<Vec<OrderLineItem>, ExportError> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let code = item.item_code.trim();
        let key = if code.is_empty() { item.id.clone() } else { code.to_string() };

        let qty = number(&item.quantity);
        let price = number(&item.unit_price);
        let amount = number(&item.amount);
        let label = key.clone();
        let overflow = |field: &'static str| ExportError::Overflow {
            id: label.clone(),
            field,
        };
        let line_value = qty.checked_mul(price).ok_or_else(|| overflow("amount"))?;
        let line = if amount.is_zero() { line_value } else { amount };

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(Group {
                key,
                items: Vec::new(),
                total_qty: Decimal::ZERO,
                total_amount: Decimal::ZERO,
                total_price_amount: Decimal::ZERO,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.items.push(item.clone());
        group.total_qty = group
            .total_qty
            .checked_add(qty)
            .ok_or_else(|| overflow("quantity"))?;
        group.total_amount = group
            .total_amount
            .checked_add(line)
            .ok_or_else(|| overflow("amount"))?;
        group.total_price_amount = group
            .total_price_amount
            .checked_add(line_value)
            .ok_or_else(|| overflow("unit_price"))?;
    }

    Ok(groups.into_iter().map(merge_group).collect())
}

fn merge_group(group: Group) -> OrderLineItem {
    let mut merged = group.items[0].clone();
    if group.items.len() == 1 {
        return merged;
    }

    let price = group
        .total_price_amount
        .checked_div(group.total_qty)
        .unwrap_or(Decimal::ZERO);

    merged.id = group.key;
    merged.quantity = fixed(group.total_qty, 2);
    merged.unit_price = fixed(price, 6);
    merged.amount = fixed(group.total_amount, 4);
    merged.planned_delivery_date = merged_dates(&group.items, |i| &i.planned_delivery_date);
    merged.order_delivery_date = merged_dates(&group.items, |i| &i.order_delivery_date);
    merged
}

fn number(value: &str) -> Decimal {
    parse_amount(value).unwrap_or(Decimal::ZERO)
}

fn fixed(value: Decimal, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, value.round_dp(decimals))
}

fn merged_dates(items: &[OrderLineItem], field: fn(&OrderLineItem) -> &String) -> String {
    let dates: Vec<&str> = items.iter().map(|i| field(i).trim()).collect();

    if let Some(first) = dates.first() {
        if !first.is_empty() && dates.iter().all(|d| d == first) {
            return first.to_string();
        }
    }

    items
        .iter()
        .zip(&dates)
        .map(|(item, date)| {
            let date = if date.is_empty() { "-" } else { *date };
            let qty = item.quantity.trim();
            let qty = if qty.is_empty() { fixed(Decimal::ZERO, 2) } else { qty.to_string() };
            format!("{}({})", date, qty)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
