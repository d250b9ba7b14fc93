//! Estimate form inputs and the computed price breakdown.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::range::MoneyRange;

/// Leading decimal number or infinity, as read from a browser form field.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid area regex")
});

/// Leading base-10 integer, as read from a range input or free text.
static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer regex"));

/// Snapshot of the estimate form at submit time.
///
/// Contact fields are free text and may be empty. `sqft` is kept exactly as
/// entered (the estimator clamps its own copy) so the lead text shows what
/// the visitor typed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimateInputs {
    /// Contact name
    #[serde(default)]
    pub name: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
    /// Contact email address
    #[serde(default)]
    pub email: String,
    /// City or postal code
    #[serde(default)]
    pub location: String,
    /// Selected material (a key of the pricing materials)
    #[serde(default)]
    pub material: String,
    /// Approximate area in square feet, unclamped
    #[serde(
        default,
        serialize_with = "serialize_area",
        deserialize_with = "deserialize_area"
    )]
    pub sqft: f64,
    /// Selected add-on names, in selection order
    #[serde(default)]
    pub addons: Vec<String>,
}

impl EstimateInputs {
    /// Creates inputs for a material and area with no contact details or add-ons.
    #[must_use]
    pub fn new(material: impl Into<String>, sqft: f64) -> Self {
        Self {
            material: material.into(),
            sqft,
            ..Self::default()
        }
    }

    /// Adds an add-on selection.
    #[must_use]
    pub fn with_addon(mut self, name: impl Into<String>) -> Self {
        self.addons.push(name.into());
        self
    }
}

/// Parses free-text area input the way a browser number field is read.
///
/// Surrounding whitespace is ignored and the longest leading decimal number
/// is used (`"120 sq ft"` reads as 120). `"Infinity"` and exponents too large
/// for `f64` read as infinite; the estimator clamps them. Anything
/// non-numeric reads as 0.
#[must_use]
pub fn parse_area(text: &str) -> f64 {
    let Some(found) = LEADING_NUMBER.find(text.trim()) else {
        return 0.0;
    };
    let number = found.as_str();
    match number.trim_start_matches(['+', '-']) {
        "Infinity" if number.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => number.parse().unwrap_or(0.0),
    }
}

/// Reads the leading base-10 integer of `text`, ignoring leading whitespace.
///
/// Returns `None` when no digits follow the optional sign. Values beyond
/// `i64` saturate by sign.
#[must_use]
pub fn parse_leading_integer(text: &str) -> Option<i64> {
    let digits = LEADING_INTEGER.find(text.trim_start())?.as_str();
    Some(digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

// JSON has no infinity; write it as text that `parse_area` reads back.
fn serialize_area<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        serializer.serialize_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        serializer.serialize_f64(*value)
    }
}

fn deserialize_area<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct AreaVisitor;

    impl Visitor<'_> for AreaVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a number or numeric text")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
            Ok(if value.is_nan() { 0.0 } else { value })
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
            Ok(parse_area(value))
        }

        fn visit_bool<E: de::Error>(self, _value: bool) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(AreaVisitor)
}

/// Price breakdown produced by the estimator.
///
/// Each range is rounded independently, so `total` can differ by a unit or
/// two from the sum of the rounded parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    /// Material cost
    pub material: MoneyRange,
    /// Labor cost
    pub labor: MoneyRange,
    /// Sum of selected add-ons
    pub add_ons: MoneyRange,
    /// Contingency margin over material and labor
    pub buffer: MoneyRange,
    /// Overall estimate
    pub total: MoneyRange,
    /// Currency code the amounts are in
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_area() {
        assert!((parse_area("120") - 120.0).abs() < f64::EPSILON);
        assert!((parse_area("  42.5 ") - 42.5).abs() < f64::EPSILON);
        assert!((parse_area("120 sq ft") - 120.0).abs() < f64::EPSILON);
        assert!((parse_area(".5") - 0.5).abs() < f64::EPSILON);
        assert!(parse_area("").abs() < f64::EPSILON);
        assert!(parse_area("abc").abs() < f64::EPSILON);
        assert!((parse_area("1e2x") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_area_infinity() {
        assert_eq!(parse_area("Infinity"), f64::INFINITY);
        assert_eq!(parse_area(" -Infinity sq ft"), f64::NEG_INFINITY);
        assert_eq!(parse_area("1e999"), f64::INFINITY);
        assert!(parse_area("infinity").abs() < f64::EPSILON);
        assert!(parse_area("Inf").abs() < f64::EPSILON);
    }

    #[test]
    fn test_infinite_area_survives_json() {
        let inputs = EstimateInputs::new("Quartz", f64::INFINITY);
        let json = serde_json::to_value(&inputs).unwrap();
        assert_eq!(json["sqft"], "Infinity");

        let back: EstimateInputs = serde_json::from_value(json).unwrap();
        assert_eq!(back.sqft, f64::INFINITY);
    }

    #[test]
    fn test_parse_leading_integer() {
        assert_eq!(parse_leading_integer("42"), Some(42));
        assert_eq!(parse_leading_integer("  -7 items"), Some(-7));
        assert_eq!(parse_leading_integer("+3"), Some(3));
        assert_eq!(parse_leading_integer("2.9"), Some(2));
        assert_eq!(parse_leading_integer("5e-7"), Some(5));
        assert_eq!(parse_leading_integer("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_integer("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer("-"), None);
        assert_eq!(parse_leading_integer(""), None);
    }

    #[test]
    fn test_deserialize_lenient_area() {
        let from_number: EstimateInputs =
            serde_json::from_str(r#"{"material":"Quartz","sqft":64}"#).unwrap();
        assert!((from_number.sqft - 64.0).abs() < f64::EPSILON);

        let from_text: EstimateInputs =
            serde_json::from_str(r#"{"material":"Quartz","sqft":"37.5"}"#).unwrap();
        assert!((from_text.sqft - 37.5).abs() < f64::EPSILON);

        let from_junk: EstimateInputs =
            serde_json::from_str(r#"{"material":"Quartz","sqft":"lots"}"#).unwrap();
        assert!(from_junk.sqft.abs() < f64::EPSILON);

        let from_null: EstimateInputs =
            serde_json::from_str(r#"{"material":"Quartz","sqft":null}"#).unwrap();
        assert!(from_null.sqft.abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_defaults() {
        let inputs: EstimateInputs = serde_json::from_str(r#"{"material":"Granite"}"#).unwrap();
        assert_eq!(inputs.material, "Granite");
        assert!(inputs.name.is_empty());
        assert!(inputs.addons.is_empty());
        assert!(inputs.sqft.abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder() {
        let inputs = EstimateInputs::new("Quartz", 30.0).with_addon("Sink cutout");
        assert_eq!(inputs.addons, vec!["Sink cutout".to_string()]);
    }
}
