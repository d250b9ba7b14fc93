//! Estimate command: compute a price range from the command line.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::common::{load_config, load_pricing, CliError, CliResult};
use crate::estimator::{compute_breakdown, serialize_lead, CurrencyFormat, LeadMail, MoneyFormat};
use crate::models::{parse_area, EstimateBreakdown, EstimateInputs};

/// Compute a countertop estimate
#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    /// Service configuration file (defaults to the platform config file)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pricing JSON (overrides the path in the configuration)
    #[arg(short, long, value_name = "FILE")]
    pub pricing: Option<PathBuf>,

    /// Material name
    #[arg(short, long)]
    pub material: String,

    /// Approximate area in square feet (free text, e.g. "120")
    #[arg(short, long, value_name = "AREA", default_value = "")]
    pub sqft: String,

    /// Add-on name (repeatable)
    #[arg(short, long = "addon", value_name = "NAME")]
    pub addons: Vec<String>,

    /// Contact name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Contact phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Contact email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// City or postal code
    #[arg(long, default_value = "")]
    pub location: String,

    /// Print the plain-text lead details
    #[arg(long)]
    pub lead: bool,

    /// Print a mailto: link addressed to the configured lead recipient
    #[arg(long)]
    pub mailto: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EstimateOutput<'a> {
    inputs: &'a EstimateInputs,
    breakdown: &'a EstimateBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mailto: Option<String>,
}

impl EstimateArgs {
    fn inputs(&self) -> EstimateInputs {
        EstimateInputs {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            location: self.location.clone(),
            material: self.material.clone(),
            sqft: parse_area(&self.sqft),
            addons: self.addons.clone(),
        }
    }

    /// Execute the estimate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(self.config.as_deref())?;
        let pricing = load_pricing(&config, self.pricing.as_deref())?;

        let inputs = self.inputs();
        let breakdown = compute_breakdown(&pricing, &inputs)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let lead_text = serialize_lead(&inputs, &breakdown, &CurrencyFormat);

        let mailto = if self.mailto {
            if config.leads.recipient.is_empty() {
                return Err(CliError::validation(
                    "No lead recipient configured (set leads.recipient in the config file)",
                ));
            }
            Some(
                LeadMail::new(
                    &config.leads.recipient,
                    &config.leads.subject,
                    &inputs,
                    lead_text.clone(),
                )
                .link(),
            )
        } else {
            None
        };

        if self.json {
            let output = EstimateOutput {
                inputs: &inputs,
                breakdown: &breakdown,
                lead_text: self.lead.then_some(lead_text),
                mailto,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        if self.lead {
            println!("{lead_text}");
        } else {
            let money = |range| CurrencyFormat.format_range(range, &breakdown.currency);
            println!("Estimate range: {}", money(breakdown.total));
            println!();
            println!("  {:<10} {}", "Material", money(breakdown.material));
            println!("  {:<10} {}", "Labor", money(breakdown.labor));
            println!("  {:<10} {}", "Add-ons", money(breakdown.add_ons));
            println!("  {:<10} {}", "Buffer", money(breakdown.buffer));
        }

        if !pricing.disclaimer.is_empty() {
            println!();
            println!("{}", pricing.disclaimer);
        }

        if let Some(link) = mailto {
            println!();
            println!("{link}");
        }

        Ok(())
    }
}
