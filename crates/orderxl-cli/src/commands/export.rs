//! Export command - write parsed order lines to a workbook.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Deserialize;

use orderxl_core::{ExportRequest, OrderHeader, OrderLineItem, OrderxlConfig, WorkbookExporter};

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// JSON file produced by `orderxl parse`
    #[arg(required = true)]
    input: PathBuf,

    /// Output workbook (.xlsx)
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Merge lines sharing an item code
    #[arg(long)]
    merge: bool,
}

/// Parse output, or a request-style `data` array.
#[derive(Deserialize)]
struct ParsedOrder {
    #[serde(alias = "data")]
    items: Vec<OrderLineItem>,
    #[serde(default)]
    info: OrderHeader,
}

pub fn run(args: ExportArgs, config: &OrderxlConfig) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.input)?;
    let parsed: ParsedOrder = serde_json::from_str(&content)?;

    let request = ExportRequest {
        path: args.output,
        items: parsed.items,
        info: parsed.info,
        merge: args.merge,
    };

    write(&request, config)
}

/// Write a request and report the totals.
pub fn write(request: &ExportRequest, config: &OrderxlConfig) -> anyhow::Result<()> {
    let summary = WorkbookExporter::with_config(config.export.clone()).export(request)?;

    println!(
        "{} {} rows written to {} (quantity {}, amount {})",
        style("✓").green(),
        summary.rows,
        request.path.display(),
        summary.total_quantity,
        summary.total_amount
    );

    Ok(())
}
