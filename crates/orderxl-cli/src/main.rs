//! Command-line front end for purchase-order extraction and workbook export.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, convert, export, parse, serve};

/// Extract purchase-order line items from PDFs and export them to Excel
#[derive(Parser)]
#[command(name = "orderxl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one JSON request read from stdin
    Serve,

    /// Extract line items from a document
    Parse(parse::ParseArgs),

    /// Write parsed line items to a workbook
    Export(export::ExportArgs),

    /// Extract a document straight into a workbook
    Convert(convert::ConvertArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout carries the protocol response
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        None | Some(Commands::Serve) => serve::run(config_path),
        Some(Commands::Parse(args)) => {
            parse::run(args, &commands::load_config(config_path)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Export(args)) => {
            export::run(args, &commands::load_config(config_path)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Convert(args)) => {
            convert::run(args, &commands::load_config(config_path)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config(args)) => {
            config::run(args, config_path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
