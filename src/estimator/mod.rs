//! Price-range estimator.
//!
//! Turns a [`PricingConfig`] and a snapshot of the estimate form into an
//! [`EstimateBreakdown`], and turns the pair into lead text for the mail and
//! storage sinks.
//!
//! # Calculation
//!
//! 1. The area is clamped into [`AREA_MIN`]..=[`AREA_MAX`] square feet.
//! 2. Material and labor are their per-square-foot rates times the area.
//! 3. Add-ons are the flat ranges of every selected add-on the pricing knows
//!    about. Unknown add-on names contribute nothing.
//! 4. The buffer is [`BUFFER_LOW_RATE`] of the low material+labor cost and
//!    [`BUFFER_HIGH_RATE`] of the high one.
//! 5. The total sums the unrounded parts. Every range, the total included,
//!    is then rounded on its own.

pub mod format;
pub mod lead;
pub mod store;

pub use format::{format_range, CurrencyFormat, MoneyFormat};
pub use lead::{encode_uri_component, format_area, mailto_link, serialize_lead, LeadMail};
pub use store::{LeadRecord, LeadStore, LEAD_STORE_KEY};

use crate::error::{Result, SiteError};
use crate::models::{CostRange, EstimateBreakdown, EstimateInputs, PricingConfig};

/// Smallest area an estimate is computed for, in square feet.
pub const AREA_MIN: f64 = 5.0;

/// Largest area an estimate is computed for, in square feet.
pub const AREA_MAX: f64 = 500.0;

/// Buffer rate applied to the low material+labor cost.
pub const BUFFER_LOW_RATE: f64 = 0.05;

/// Buffer rate applied to the high material+labor cost.
pub const BUFFER_HIGH_RATE: f64 = 0.12;

/// Clamps an entered area into the supported range.
///
/// NaN is read as 0 and so lands on [`AREA_MIN`].
#[must_use]
pub fn clamp_area(sqft: f64) -> f64 {
    if sqft.is_nan() {
        AREA_MIN
    } else {
        sqft.clamp(AREA_MIN, AREA_MAX)
    }
}

/// Computes the price breakdown for the given inputs.
///
/// # Errors
///
/// Returns [`SiteError::Configuration`] if `inputs.material` is not one of
/// the configured materials. Callers populate the material choice from the
/// same configuration, so this indicates a mismatched deployment.
pub fn compute_breakdown(
    config: &PricingConfig,
    inputs: &EstimateInputs,
) -> Result<EstimateBreakdown> {
    let pricing = config.materials.get(&inputs.material).ok_or_else(|| {
        SiteError::Configuration(format!("Unknown material: {}", inputs.material))
    })?;

    let sqft = clamp_area(inputs.sqft);

    let material = pricing.per_sqft.scale(sqft);
    let labor = config.labor_per_sqft.scale(sqft);

    let add_ons = inputs
        .addons
        .iter()
        .filter_map(|name| config.add_ons.get(name))
        .fold(CostRange::ZERO, |sum, range| sum + *range);

    let base = material + labor;
    let buffer = CostRange::new(BUFFER_LOW_RATE * base.low, BUFFER_HIGH_RATE * base.high);
    let total = base + add_ons + buffer;

    Ok(EstimateBreakdown {
        material: material.round(),
        labor: labor.round(),
        add_ons: add_ons.round(),
        buffer: buffer.round(),
        total: total.round(),
        currency: config.currency.clone(),
    })
}
