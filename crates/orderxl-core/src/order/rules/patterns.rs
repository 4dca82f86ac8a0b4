//! Common regex patterns for purchase-order extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Item code: two digits, dot, three digits, dot, alphanumeric group.
    // Anchored at the start only; trailing text stays part of the cell.
    pub static ref ITEM_CODE: Regex = Regex::new(
        r"^[0-9]{2}\.[0-9]{3}\.[0-9A-Za-z]+"
    ).unwrap();

    // Quantity / price / amount cells, thousands separators allowed
    pub static ref NUMERIC_CELL: Regex = Regex::new(
        r"^[0-9,]+\.?[0-9]*$"
    ).unwrap();

    // Plain number without separators
    pub static ref BARE_NUMBER: Regex = Regex::new(
        r"^[0-9]+\.?[0-9]*$"
    ).unwrap();

    // Compact YYYYMMDD date
    pub static ref COMPACT_DATE: Regex = Regex::new(
        r"^([0-9]{4})([0-9]{2})([0-9]{2})$"
    ).unwrap();

    pub static ref LINE_NUMBER: Regex = Regex::new(
        r"^[0-9]+$"
    ).unwrap();

    // Labeled header fields (half-width or full-width colon)
    pub static ref ORDER_NO: Regex = Regex::new(
        r"订单号[:：]\s*(\S+)"
    ).unwrap();

    pub static ref SUPPLIER_NO: Regex = Regex::new(
        r"供应商[:：]\s*(\S+)"
    ).unwrap();

    pub static ref SUPPLIER_NAME: Regex = Regex::new(
        r"供应商名称[:：]\s*\n?([^\n]+)"
    ).unwrap();

    pub static ref CURRENCY: Regex = Regex::new(
        r"货币[:：]\s*(\S+)"
    ).unwrap();
}
