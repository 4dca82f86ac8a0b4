//! Parse command - extract order lines from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use orderxl_core::error::ExtractionError;
use orderxl_core::{ExtractionResult, OrderParser, OrderxlConfig};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input document (PDF or JSON page dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fail when no line item is found
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config: &OrderxlConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Parsing file: {}", args.input.display());
    let result = extract(&args.input, config, args.strict)?;

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} items written to {}",
            style("✓").green(),
            result.items.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Parse a document, optionally requiring at least one line item.
pub fn extract(
    input: &std::path::Path,
    config: &OrderxlConfig,
    require_items: bool,
) -> anyhow::Result<ExtractionResult> {
    let result = OrderParser::from_config(&config.extraction).parse_file(input, &config.pdf)?;

    if require_items && result.is_empty() {
        return Err(ExtractionError::NoItems.into());
    }

    Ok(result)
}

fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id",
        "date",
        "customer_name",
        "order_no",
        "item_code",
        "description",
        "quantity",
        "unit_price",
        "amount",
        "planned_delivery_date",
        "order_delivery_date",
    ])?;

    for item in &result.items {
        wtr.write_record([
            &item.id,
            &item.date,
            &item.customer_name,
            &item.order_no,
            &item.item_code,
            &item.description,
            &item.quantity,
            &item.unit_price,
            &item.amount,
            &item.planned_delivery_date,
            &item.order_delivery_date,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let info = &result.info;
    let mut output = String::new();

    output.push_str(&format!("Order: {}\n", info.order_no));
    output.push_str(&format!("Customer: {}\n", info.customer_name));
    output.push_str(&format!("Supplier: {} {}\n", info.supplier_no, info.supplier_name));
    output.push_str(&format!("Currency: {}\n", info.currency));
    output.push('\n');

    for item in &result.items {
        output.push_str(&format!(
            "  {:<18} {:<30} {:>10} x {:>10} = {:>12}  {}\n",
            item.item_code,
            item.description,
            item.quantity,
            item.unit_price,
            item.amount,
            item.planned_delivery_date
        ));
    }

    output.push_str(&format!("\n{} line items\n", result.items.len()));
    output
}
