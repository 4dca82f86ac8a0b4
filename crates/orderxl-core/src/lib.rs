//! Core library for purchase-order extraction.
//!
//! This crate provides:
//! - Document sources (PDF text and table grids, pre-extracted page dumps)
//! - Rule-based order header and line-item extraction
//! - Workbook export with totals
//! - A JSON request/response dispatcher

pub mod error;
pub mod export;
pub mod models;
pub mod order;
pub mod pdf;
pub mod protocol;

pub use error::{OrderError, Result};
pub use export::{ExportRequest, ExportSummary, WorkbookExporter, WorkbookWriter, XlsxWriter};
pub use models::config::OrderxlConfig;
pub use models::order::{ExtractionResult, OrderHeader, OrderLineItem};
pub use order::{OrderExtractor, OrderParser, TableClassifier, merge_by_item_code};
pub use pdf::{DocumentSource, Page, PageDump, PdfExtractor, Table, open_document};
pub use protocol::{Dispatcher, Request, error_response};
