//! Pre-extracted page dumps.
//!
//! A page dump is a JSON document holding pages that an external extractor
//! already decoded:
//!
//! ```json
//! {"pages": [{"text": "...", "tables": [[["零件号", null], ["12.345.A", "3"]]]}]}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DocumentSource, Page, Result, Table};
use crate::error::DocumentError;

/// A decoded document loaded from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageDump {
    pub pages: Vec<DumpPage>,
}

/// One page of a dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpPage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl PageDump {
    /// Read a dump from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let dump = Self::from_json(&content)?;
        debug!("Loaded page dump {} with {} pages", path.display(), dump.pages.len());
        Ok(dump)
    }

    /// Parse a dump from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| DocumentError::Parse(e.to_string()))
    }
}

impl DocumentSource for PageDump {
    fn pages(&self) -> Result<Vec<Page>> {
        if self.pages.is_empty() {
            return Err(DocumentError::NoPages);
        }

        Ok(self
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| Page {
                number: i as u32 + 1,
                text: page.text.clone().filter(|t| !t.trim().is_empty()),
                tables: page.tables.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_with_null_cells() {
        let dump = PageDump::from_json(
            r#"{"pages": [
                {"text": "ACME\n订单号: PO-1", "tables": [[["零件号", null], ["12.345.A", "3"]]]},
                {"text": "  ", "tables": []}
            ]}"#,
        )
        .unwrap();

        let pages = dump.pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].tables[0][0][1], None);
        assert_eq!(pages[1].text, None);
    }

    #[test]
    fn test_empty_dump_has_no_pages() {
        let dump = PageDump::from_json(r#"{"pages": []}"#).unwrap();
        assert!(matches!(dump.pages(), Err(DocumentError::NoPages)));
    }

    #[test]
    fn test_malformed_dump() {
        assert!(matches!(PageDump::from_json("{"), Err(DocumentError::Parse(_))));
    }
}
