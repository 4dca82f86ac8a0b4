//! Error types for the orderxl-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the orderxl library.
#[derive(Error, Debug)]
pub enum OrderError {
    /// Document loading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Order extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Workbook export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Malformed or unsupported request.
    #[error("{0}")]
    Request(#[from] RequestError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to opening and decoding documents.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the document structure.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The document has no pages.
    #[error("document has no pages")]
    NoPages,

    /// None of the pages yielded any text.
    #[error("document contains no extractable text")]
    NoText,

    /// File extension not handled by any document source.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to order extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A numeric cell could not be read as a decimal.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },

    /// The document produced no line items.
    #[error("no order line items found")]
    NoItems,
}

/// Errors related to workbook export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A quantity, price or amount is not a number.
    #[error("item {id}: {field} is not a number: {value}")]
    InvalidNumber {
        id: String,
        field: &'static str,
        value: String,
    },

    /// A product or sum left the decimal range.
    #[error("item {id}: {field} overflows")]
    Overflow { id: String, field: &'static str },

    /// The workbook could not be written.
    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Errors in the request channel.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Nothing was received on the request channel.
    #[error("No input data")]
    Empty,

    /// The request is not valid JSON or has the wrong shape.
    #[error("invalid request: {0}")]
    Malformed(String),

    /// A required request field is absent.
    #[error("missing request field: {0}")]
    MissingField(&'static str),

    /// The command is not recognized.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Result type for the orderxl library.
pub type Result<T> = std::result::Result<T, OrderError>;
