//! Data models for pricing, estimates, and the project gallery.
//!
//! This module contains the plain data structures shared by the estimator,
//! the gallery navigator, and the web API. Models are independent of any
//! rendering or transport concerns.

pub mod estimate;
pub mod gallery;
pub mod pricing;
pub mod range;

// Re-export all model types
pub use estimate::{parse_area, parse_leading_integer, EstimateBreakdown, EstimateInputs};
pub use gallery::{GalleryCard, DEFAULT_CARD_TITLE};
pub use pricing::{MaterialPricing, NamedEntries, PricingConfig};
pub use range::{CostRange, MoneyRange};
