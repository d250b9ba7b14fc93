//! Shared test fixtures for estimator, gallery, and web API tests.
#![allow(dead_code)] // Each test binary uses a different subset

use std::fs;
use std::path::{Path, PathBuf};

use countertop_site::config::{Config, LeadConfig, PricingSettings, RedesignConfig};
use countertop_site::models::{GalleryCard, PricingConfig};

/// Pricing document in the site's `assets/config.json` shape.
pub const SAMPLE_PRICING_JSON: &str = r#"{
    "currency": "CAD",
    "labor_per_sqft": [20, 30],
    "materials": {
        "Quartz": {"per_sqft": [30, 50]},
        "Granite": {"per_sqft": [25, 45]},
        "Laminate": {"per_sqft": [10, 18]}
    },
    "add_ons": {
        "Sink cutout": [150, 250],
        "Backsplash": [400, 900]
    },
    "disclaimer": "Estimates are approximate and confirmed after an on-site measure."
}"#;

/// Lead recipient used by [`test_config`].
pub const TEST_RECIPIENT: &str = "quotes@example.com";

/// Parsed [`SAMPLE_PRICING_JSON`].
pub fn sample_pricing() -> PricingConfig {
    PricingConfig::from_json_str(SAMPLE_PRICING_JSON).expect("sample pricing is valid")
}

/// Writes [`SAMPLE_PRICING_JSON`] into `dir` and returns its path.
pub fn write_pricing_file(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, SAMPLE_PRICING_JSON).expect("Failed to write pricing file");
    path
}

/// Service config that keeps leads under `dir` and talks to `api_base`.
pub fn test_config(dir: &Path, api_base: &str) -> Config {
    Config {
        pricing: PricingSettings {
            path: dir.join("config.json"),
        },
        leads: LeadConfig {
            recipient: TEST_RECIPIENT.to_string(),
            store_dir: dir.join("leads"),
            ..LeadConfig::default()
        },
        redesign: RedesignConfig {
            api_base: api_base.to_string(),
            api_key_env: "COUNTERTOP_SITE_TEST_UNSET_KEY".to_string(),
            ..RedesignConfig::default()
        },
    }
}

/// Writes `config` as TOML into `dir` and returns its path.
pub fn write_config_file(dir: &Path, config: &Config) -> PathBuf {
    let path = dir.join("config.toml");
    config.save_to(&path).expect("Failed to write config file");
    path
}

/// Gallery cards across three categories, in page order.
///
/// Indices: 0 Kitchen, 1 Bath, 2 Kitchen, 3 Outdoor, 4 Kitchen.
pub fn sample_cards() -> Vec<GalleryCard> {
    vec![
        GalleryCard::new("Kitchen", "Walnut island", "img/k1.jpg").with_full("img/k1-full.jpg"),
        GalleryCard::new("Bath", "Floating vanity", "img/b1.jpg"),
        GalleryCard::new("Kitchen", "", "img/k2.jpg"),
        GalleryCard::new("Outdoor", "Patio bar", "img/o1.jpg"),
        GalleryCard::new("Kitchen", "Waterfall edge", "img/k3.jpg").with_full("img/k3-full.jpg"),
    ]
}
