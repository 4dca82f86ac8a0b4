//! PDF page extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{DocumentSource, Page, Result, grid::tables_from_text};
use crate::error::DocumentError;
use crate::models::config::PdfConfig;

/// PDF page extractor.
///
/// lopdf validates the document and counts pages; pdf-extract decodes the
/// per-page text, from which table grids are rebuilt.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    config: PdfConfig,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create an extractor with the given settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            config,
        }
    }

    /// Read and load a PDF file.
    pub fn open(path: &Path, config: PdfConfig) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| DocumentError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut extractor = Self::with_config(config);
        extractor.load(&data)?;
        debug!("Opened {} ({} pages)", path.display(), extractor.page_count());
        Ok(extractor)
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(DocumentError::Encrypted);
        }

        if doc.get_pages().is_empty() {
            return Err(DocumentError::NoPages);
        }

        self.document = Some(doc);
        self.raw_data = data.to_vec();
        Ok(())
    }

    /// Get the number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|d| d.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn page_texts(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(DocumentError::Parse("No document loaded".to_string()));
        }

        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSource for PdfExtractor {
    fn pages(&self) -> Result<Vec<Page>> {
        let mut texts = self.page_texts()?;
        if self.config.max_pages > 0 {
            texts.truncate(self.config.max_pages);
        }

        let pages: Vec<Page> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let tables = tables_from_text(&text, self.config.min_column_gap);
                trace!("Page {}: {} chars, {} tables", i + 1, text.len(), tables.len());
                Page {
                    number: i as u32 + 1,
                    text: Some(text).filter(|t| !t.trim().is_empty()),
                    tables,
                }
            })
            .collect();

        debug!("Extracted {} pages", pages.len());
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_pages_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.pages(), Err(DocumentError::Parse(_))));
    }

    #[test]
    fn test_load_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(
            extractor.load(b"definitely not a pdf"),
            Err(DocumentError::Parse(_))
        ));
    }
}
