//! CLI subcommands.

pub mod config;
pub mod convert;
pub mod export;
pub mod parse;
pub mod serve;

use std::path::{Path, PathBuf};

use orderxl_core::OrderxlConfig;
use tracing::debug;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orderxl")
        .join("config.json")
}

/// Load the configuration from `path`, the user config file, or defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<OrderxlConfig> {
    if let Some(path) = path {
        return Ok(OrderxlConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration {}", default_path.display());
        Ok(OrderxlConfig::from_file(&default_path)?)
    } else {
        Ok(OrderxlConfig::default())
    }
}
