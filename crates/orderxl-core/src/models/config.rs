//! Configuration structures for the extraction and export pipeline.

use serde::{Deserialize, Serialize};

use super::order::DEFAULT_CURRENCY;

/// Main configuration for orderxl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderxlConfig {
    /// Order extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Workbook export configuration.
    pub export: ExportConfig,
}

/// Order extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency used when the document names none.
    pub default_currency: String,

    /// Text marking the item-code column in a table header row.
    pub item_code_marker: String,

    /// Unit-of-measure words that bound the description (compared lowercase).
    pub unit_tokens: Vec<String>,

    /// Rows with fewer cells are ignored (0 = no minimum).
    pub min_row_cells: usize,

    /// Description written when no description token is found.
    pub empty_description: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            item_code_marker: "零件号".to_string(),
            unit_tokens: ["pcs", "件", "个", "套"].iter().map(|s| s.to_string()).collect(),
            min_row_cells: 0,
            empty_description: "-".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Minimum run of spaces separating two columns in page text.
    pub min_column_gap: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_column_gap: 2,
        }
    }
}

/// Workbook export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Worksheet title.
    pub sheet_name: String,

    /// Header labels, one per column.
    pub headers: Vec<String>,

    /// Column widths in characters, one per column.
    pub column_widths: Vec<f64>,

    /// Header background color (RGB hex).
    pub header_fill: String,

    /// Header font color (RGB hex).
    pub header_font_color: String,

    /// Label written in the description column of the totals row.
    pub total_label: String,

    /// Merge items sharing an item code before writing.
    pub merge_same_item_code: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "采购订单".to_string(),
            headers: [
                "日期",
                "客户名",
                "订单号",
                "零件号",
                "零件描述/规格",
                "数量",
                "价格（未税）",
                "金额（未税）",
                "计划交货日期",
                "订单交期",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            column_widths: vec![12.0, 20.0, 15.0, 20.0, 40.0, 10.0, 15.0, 15.0, 15.0, 15.0],
            header_fill: "4472C4".to_string(),
            header_font_color: "FFFFFF".to_string(),
            total_label: "合计".to_string(),
            merge_same_item_code: false,
        }
    }
}

impl OrderxlConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: OrderxlConfig =
            serde_json::from_str(r#"{"export": {"total_label": "Total"}}"#).unwrap();

        assert_eq!(config.export.total_label, "Total");
        assert_eq!(config.export.headers.len(), 10);
        assert_eq!(config.extraction.item_code_marker, "零件号");
        assert_eq!(config.pdf.min_column_gap, 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = OrderxlConfig::default();
        config.extraction.default_currency = "USD".to_string();
        config.save(&path).unwrap();

        let loaded = OrderxlConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.default_currency, "USD");
        assert_eq!(loaded.export.column_widths, config.export.column_widths);
    }
}
