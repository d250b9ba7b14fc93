//! Materials command: list what the pricing document offers.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::common::{load_config, load_pricing, CliError, CliResult};
use crate::estimator::format_range;
use crate::models::PricingConfig;

/// List materials and add-ons from the pricing document
#[derive(Debug, Clone, Args)]
pub struct MaterialsArgs {
    /// Service configuration file (defaults to the platform config file)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pricing JSON (overrides the path in the configuration)
    #[arg(short, long, value_name = "FILE")]
    pub pricing: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// JSON response types
#[derive(Debug, Serialize)]
struct MaterialItem {
    name: String,
    per_sqft: [f64; 2],
}

#[derive(Debug, Serialize)]
struct AddOnItem {
    name: String,
    range: [u64; 2],
    label: String,
}

#[derive(Debug, Serialize)]
struct MaterialsResponse {
    currency: String,
    labor_per_sqft: [f64; 2],
    materials: Vec<MaterialItem>,
    add_ons: Vec<AddOnItem>,
}

impl MaterialsResponse {
    fn from_pricing(pricing: &PricingConfig) -> Self {
        let materials = pricing
            .materials
            .iter()
            .map(|(name, material)| MaterialItem {
                name: name.to_string(),
                per_sqft: material.per_sqft.into(),
            })
            .collect();

        let add_ons = pricing
            .add_ons
            .iter()
            .map(|(name, range)| {
                let rounded = range.round();
                AddOnItem {
                    name: name.to_string(),
                    range: rounded.into(),
                    label: format!("{name} ({})", format_range(rounded, &pricing.currency)),
                }
            })
            .collect();

        Self {
            currency: pricing.currency.clone(),
            labor_per_sqft: pricing.labor_per_sqft.into(),
            materials,
            add_ons,
        }
    }
}

impl MaterialsArgs {
    /// Execute the materials command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(self.config.as_deref())?;
        let pricing = load_pricing(&config, self.pricing.as_deref())?;
        let response = MaterialsResponse::from_pricing(&pricing);

        if self.json {
            println!(
                "{}",
                serde_json::to_string(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        println!("Materials ({}, per sq ft):", response.currency);
        for material in &response.materials {
            println!(
                "  {:<20} {} – {}",
                material.name, material.per_sqft[0], material.per_sqft[1]
            );
        }
        println!(
            "  {:<20} {} – {}",
            "(labor)", response.labor_per_sqft[0], response.labor_per_sqft[1]
        );

        if !response.add_ons.is_empty() {
            println!();
            println!("Add-ons:");
            for add_on in &response.add_ons {
                println!("  {}", add_on.label);
            }
        }

        Ok(())
    }
}
