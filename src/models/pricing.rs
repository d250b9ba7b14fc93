//! Pricing configuration for the estimator.
//!
//! The site ships a single JSON document describing labor rates, material
//! rates, flat-cost add-ons and the disclaimer shown beside the estimate:
//!
//! ```json
//! {
//!   "currency": "CAD",
//!   "labor_per_sqft": [10, 20],
//!   "materials": { "Quartz": { "per_sqft": [40, 60] } },
//!   "add_ons": { "Sink cutout": [150, 250] },
//!   "disclaimer": "Rough estimate only."
//! }
//! ```
//!
//! Materials and add-ons keep their document order so that dropdowns and
//! chips are populated in the order the site owner wrote them.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::range::CostRange;

/// Per-square-foot pricing for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPricing {
    /// Cost range per square foot
    pub per_sqft: CostRange,
}

/// Name-keyed map that preserves the order entries appeared in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEntries<V> {
    entries: Vec<(String, V)>,
}

impl<V> NamedEntries<V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces an entry. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up an entry by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Returns true if an entry with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entry names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for NamedEntries<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S: Into<String>> FromIterator<(S, V)> for NamedEntries<V> {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for NamedEntries<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct NamedEntriesVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for NamedEntriesVisitor<V> {
    type Value = NamedEntries<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = NamedEntries::new();
        while let Some((name, value)) = access.next_entry::<String, V>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for NamedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NamedEntriesVisitor(PhantomData))
    }
}

/// Static pricing configuration consumed by the estimator.
///
/// # Validation
///
/// - `currency` must be a three-letter ISO 4217 code
/// - at least one material must be defined
/// - every range must be finite, non-negative, and ordered `low <= high`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO 4217 currency code (e.g. "CAD")
    pub currency: String,
    /// Labor cost range per square foot
    pub labor_per_sqft: CostRange,
    /// Material name to per-square-foot pricing
    pub materials: NamedEntries<MaterialPricing>,
    /// Add-on name to flat cost range
    #[serde(default)]
    pub add_ons: NamedEntries<CostRange>,
    /// Disclaimer shown next to every estimate
    #[serde(default)]
    pub disclaimer: String,
}

impl PricingConfig {
    /// Parses and validates a pricing configuration from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).context("Failed to parse pricing configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a pricing configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context(format!(
            "Failed to read pricing configuration: {}",
            path.display()
        ))?;

        let config = Self::from_json_str(&content).context(format!(
            "Invalid pricing configuration: {}",
            path.display()
        ))?;

        debug!(
            "Loaded pricing from {} ({} materials, {} add-ons)",
            path.display(),
            config.materials.len(),
            config.add_ons.len()
        );

        Ok(config)
    }

    /// Validates currency code and range ordering.
    pub fn validate(&self) -> Result<()> {
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            anyhow::bail!(
                "Currency '{}' must be a three-letter ISO 4217 code",
                self.currency
            );
        }

        if self.materials.is_empty() {
            anyhow::bail!("Pricing configuration must define at least one material");
        }

        if !self.labor_per_sqft.is_ordered() {
            anyhow::bail!(
                "Labor range [{}, {}] must be non-negative with low <= high",
                self.labor_per_sqft.low,
                self.labor_per_sqft.high
            );
        }

        for (name, material) in self.materials.iter() {
            if !material.per_sqft.is_ordered() {
                anyhow::bail!(
                    "Material '{name}' range [{}, {}] must be non-negative with low <= high",
                    material.per_sqft.low,
                    material.per_sqft.high
                );
            }
        }

        for (name, range) in self.add_ons.iter() {
            if !range.is_ordered() {
                anyhow::bail!(
                    "Add-on '{name}' range [{}, {}] must be non-negative with low <= high",
                    range.low,
                    range.high
                );
            }
        }

        Ok(())
    }
}
