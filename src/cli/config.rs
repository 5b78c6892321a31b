// ABOUTME: CLI config command - print the effective, layered configuration

use anyhow::Result;

use super::OutputFormat;
use crate::config::AppConfig;

/// Execute the config command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
        OutputFormat::Text => toml::to_string_pretty(config)?,
    };
    println!("{rendered}");
    Ok(())
}
