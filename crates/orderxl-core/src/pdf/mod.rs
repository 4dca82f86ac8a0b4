//! Document sources: decoded pages with text and table grids.

mod dump;
mod extractor;
mod grid;

pub use dump::{DumpPage, PageDump};
pub use extractor::PdfExtractor;
pub use grid::{split_columns, tables_from_text};

use std::path::Path;

use crate::error::DocumentError;
use crate::models::config::PdfConfig;

/// A table as a grid of optional cell strings, row major.
pub type Table = Vec<Vec<Option<String>>>;

/// Content of a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text, `None` when the page has none.
    pub text: Option<String>,
    /// Tables found on the page, in reading order.
    pub tables: Vec<Table>,
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Trait for anything that yields decoded document pages.
pub trait DocumentSource {
    /// Decode all pages in document order.
    fn pages(&self) -> Result<Vec<Page>>;
}

impl DocumentSource for Vec<Page> {
    fn pages(&self) -> Result<Vec<Page>> {
        Ok(self.clone())
    }
}

/// Open a document, choosing the source by file extension.
///
/// `.pdf` files are decoded with [`PdfExtractor`]; `.json` files are read as a
/// [`PageDump`] produced by an external extractor.
pub fn open_document(path: &Path, config: &PdfConfig) -> Result<Box<dyn DocumentSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(Box::new(PdfExtractor::open(path, config.clone())?)),
        "json" => Ok(Box::new(PageDump::from_file(path)?)),
        other => Err(DocumentError::UnsupportedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            other.to_string()
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_unsupported_extension() {
        let result = open_document(Path::new("order.docx"), &PdfConfig::default());
        assert!(matches!(result, Err(DocumentError::UnsupportedFormat(ext)) if ext == "docx"));
    }

    #[test]
    fn test_open_missing_pdf() {
        let result = open_document(Path::new("/nonexistent/order.pdf"), &PdfConfig::default());
        assert!(matches!(result, Err(DocumentError::Open { .. })));
    }
}
