//! Serve command - answer one JSON request read from stdin.

use std::io::Read;
use std::process::ExitCode;

use orderxl_core::{Dispatcher, OrderError, error_response};
use serde_json::Value;

use super::load_config;

/// Configuration failures are reported on the error channel like any other.
pub fn run(config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    match respond(config_path) {
        Ok(response) => {
            println!("{}", response);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", error_response(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn respond(config_path: Option<&str>) -> Result<Value, OrderError> {
    let config = load_config(config_path).map_err(|e| OrderError::Config(e.to_string()))?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Dispatcher::new(config).handle_json(&input)
}
