//! JSON request/response dispatch.
//!
//! One request object comes in, one response object goes out:
//!
//! - `{"command": "parse", "path": ...}` → `{"items": [...], "info": {...}}`
//! - `{"command": "export", "path": ..., "data": [...], "info": {...}}` →
//!   `{"success": true}`
//!
//! Failures are reported as `{"error": message}`.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{OrderError, RequestError};
use crate::export::{ExportRequest, WorkbookExporter};
use crate::models::config::OrderxlConfig;
use crate::order::OrderParser;

/// A decoded request.
#[derive(Debug, Clone)]
pub enum Request {
    Parse { path: PathBuf },
    Export(ExportRequest),
}

impl Request {
    /// Decode a request from the raw request channel contents.
    pub fn from_json(input: &str) -> Result<Self, RequestError> {
        if input.trim().is_empty() {
            return Err(RequestError::Empty);
        }

        let value: Value =
            serde_json::from_str(input).map_err(|e| RequestError::Malformed(e.to_string()))?;
        let command = value
            .get("command")
            .and_then(Value::as_str)
            .ok_or(RequestError::MissingField("command"))?;

        match command {
            "parse" => {
                let path = value
                    .get("path")
                    .and_then(Value::as_str)
                    .ok_or(RequestError::MissingField("path"))?;
                Ok(Request::Parse {
                    path: PathBuf::from(path),
                })
            }
            "export" => serde_json::from_value(value)
                .map(Request::Export)
                .map_err(|e| RequestError::Malformed(e.to_string())),
            other => Err(RequestError::UnknownCommand(other.to_string())),
        }
    }
}

/// Executes requests against a configuration.
pub struct Dispatcher {
    config: OrderxlConfig,
    run_date: Option<NaiveDate>,
}

impl Dispatcher {
    pub fn new(config: OrderxlConfig) -> Self {
        Self {
            config,
            run_date: None,
        }
    }

    /// Stamp parsed items with a fixed date instead of today.
    pub fn with_run_date(mut self, date: NaiveDate) -> Self {
        self.run_date = Some(date);
        self
    }

    /// Execute a request and build its success response.
    pub fn handle(&self, request: &Request) -> crate::Result<Value> {
        match request {
            Request::Parse { path } => {
                debug!("parse {}", path.display());
                let mut parser = OrderParser::from_config(&self.config.extraction);
                if let Some(date) = self.run_date {
                    parser = parser.with_run_date(date);
                }
                let result = parser.parse_file(path, &self.config.pdf)?;
                Ok(serde_json::to_value(&result)?)
            }
            Request::Export(export) => {
                debug!("export {} items to {}", export.items.len(), export.path.display());
                WorkbookExporter::with_config(self.config.export.clone()).export(export)?;
                Ok(json!({ "success": true }))
            }
        }
    }

    /// Decode and execute raw request text.
    pub fn handle_json(&self, input: &str) -> crate::Result<Value> {
        let request = Request::from_json(input)?;
        self.handle(&request)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(OrderxlConfig::default())
    }
}

/// Failure response for an error.
pub fn error_response(error: &OrderError) -> Value {
    json!({ "error": error.to_string() })
}
