//! Lead text and mail links.
//!
//! The lead text is the contract handed to the mail and storage sinks, so
//! its field order and labels are fixed.

use super::format::MoneyFormat;
use crate::models::{EstimateBreakdown, EstimateInputs};

/// Subject fallback when the visitor left the location empty.
const NEW_LEAD_LABEL: &str = "New lead";

/// Serializes the inputs and breakdown into plain-text lead details.
///
/// The area is shown as entered, before clamping.
pub fn serialize_lead(
    inputs: &EstimateInputs,
    breakdown: &EstimateBreakdown,
    formatter: &impl MoneyFormat,
) -> String {
    let money = |range| formatter.format_range(range, &breakdown.currency);

    let addons = if inputs.addons.is_empty() {
        "None".to_string()
    } else {
        inputs.addons.join(", ")
    };

    let lines = [
        format!("Name: {}", inputs.name),
        format!("Phone: {}", inputs.phone),
        format!("Email: {}", inputs.email),
        format!("City/Postal: {}", inputs.location),
        format!("Material: {}", inputs.material),
        format!("Approx. size (sq ft): {}", format_area(inputs.sqft)),
        format!("Add-ons: {addons}"),
        String::new(),
        format!("Estimate range: {}", money(breakdown.total)),
        "Breakdown:".to_string(),
        format!("- Material: {}", money(breakdown.material)),
        format!("- Labor: {}", money(breakdown.labor)),
        format!("- Add-ons: {}", money(breakdown.add_ons)),
        format!("- Buffer: {}", money(breakdown.buffer)),
    ];

    lines.join("\n")
}

/// Renders an entered area: whole numbers without decimals, others in shortest form.
#[must_use]
pub fn format_area(sqft: f64) -> String {
    if sqft.is_nan() {
        "0".to_string()
    } else if sqft.is_infinite() {
        if sqft > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{sqft}")
    }
}

/// A pre-filled lead email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadMail {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body (the serialized lead)
    pub body: String,
}

impl LeadMail {
    /// Builds the lead email for a submission.
    #[must_use]
    pub fn new(
        to: impl Into<String>,
        subject_prefix: &str,
        inputs: &EstimateInputs,
        body: String,
    ) -> Self {
        let location = if inputs.location.is_empty() {
            NEW_LEAD_LABEL
        } else {
            &inputs.location
        };

        Self {
            to: to.into(),
            subject: format!("{subject_prefix} – {location}"),
            body,
        }
    }

    /// The `mailto:` link for this email.
    #[must_use]
    pub fn link(&self) -> String {
        mailto_link(&self.to, &self.subject, &self.body)
    }
}

/// Builds a `mailto:` URI with every part percent-encoded.
#[must_use]
pub fn mailto_link(to: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        encode_uri_component(to),
        encode_uri_component(subject),
        encode_uri_component(body)
    )
}

/// Percent-encodes UTF-8 text, leaving `A-Z a-z 0-9 - _ . ! ~ * ' ( )` untouched.
#[must_use]
pub fn encode_uri_component(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
