//! Convert command - parse a document and export it in one step.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use orderxl_core::{ExportRequest, OrderxlConfig};

use super::{export, parse};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input document (PDF or JSON page dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Output workbook (.xlsx)
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Merge lines sharing an item code
    #[arg(long)]
    merge: bool,
}

pub fn run(args: ConvertArgs, config: &OrderxlConfig) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let result = parse::extract(&args.input, config, true)?;
    info!(
        "Order {}: {} line items",
        result.info.order_no,
        result.items.len()
    );

    let request = ExportRequest {
        path: args.output,
        items: result.items,
        info: result.info,
        merge: args.merge,
    };

    export::write(&request, config)
}
