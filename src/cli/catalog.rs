// ABOUTME: CLI catalog command - print trends, brands and the compatibility table

use anyhow::Result;
use serde::Serialize;

use super::OutputFormat;
use crate::catalog::{self, Brand, Trend, BRANDS, TRENDS};

/// JSON output structure for the catalog command
#[derive(Debug, Serialize)]
pub struct CatalogOutput {
    pub trends: &'static [Trend],
    pub brands: &'static [Brand],
    /// Trend id -> compatible brand id
    pub compatibility: Vec<Pairing>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Pairing {
    pub trend: &'static str,
    pub brand: &'static str,
}

pub fn build_output() -> CatalogOutput {
    let compatibility = TRENDS
        .iter()
        .filter_map(|t| {
            catalog::compatible_brand_id(t.id).map(|brand| Pairing { trend: t.id, brand })
        })
        .collect();
    CatalogOutput {
        trends: TRENDS,
        brands: BRANDS,
        compatibility,
    }
}

/// Execute the catalog command
pub fn execute(format: OutputFormat) -> Result<()> {
    let output = build_output();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => output_text(&output),
    }
    Ok(())
}

fn output_text(output: &CatalogOutput) {
    println!("{:<18} {:<18} {:<10} HASHTAGS", "TREND", "TITLE", "BRAND");
    println!("{}", "-".repeat(80));
    for trend in output.trends {
        let brand = catalog::compatible_brand(trend.id).map_or("-", |b| b.name);
        println!(
            "{:<18} {:<18} {:<10} {}",
            trend.id,
            trend.title,
            brand,
            trend.default_hashtags.join(" ")
        );
    }
    println!();
    println!(
        "Brands: {}",
        output.brands.iter().map(|b| b.name).collect::<Vec<_>>().join(", ")
    );
}
