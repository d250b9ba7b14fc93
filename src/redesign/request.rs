//! Redesign request validation and prompt building.

use std::sync::LazyLock;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SiteError};
use crate::models::parse_leading_integer;

/// Room type used when the request names none.
pub const DEFAULT_ROOM: &str = "kitchen";

/// Style used when the request names none.
pub const DEFAULT_STYLE: &str = "Modern Minimal";

/// Most variations one request may ask for.
pub const MAX_VARIATIONS: u8 = 3;

/// Standard alphabet that accepts padded and unpadded input.
const IMAGE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

static DATA_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/\w+;base64,").expect("valid data URL regex"));

/// JSON body posted by the "visualize my room" form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedesignRequest {
    /// Room photo as a data URL or raw base64
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Room type (e.g. "kitchen", "bathroom")
    #[serde(default)]
    pub room: Option<String>,
    /// Overall design style
    #[serde(default)]
    pub style: Option<String>,
    /// Countertop finish
    #[serde(default)]
    pub countertop: Option<String>,
    /// Cabinet finish
    #[serde(default)]
    pub cabinets: Option<String>,
    /// Backsplash finish
    #[serde(default)]
    pub backsplash: Option<String>,
    /// Hardware finish
    #[serde(default)]
    pub hardware: Option<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Requested number of images (number or numeric text)
    #[serde(default)]
    pub variations: Option<Value>,
}

/// A validated redesign ready to send to the image service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedesignJob {
    /// Decoded room photo
    pub image: Vec<u8>,
    /// Natural-language edit instructions
    pub prompt: String,
    /// Number of images to generate, 1..=3
    pub variations: u8,
}

impl RedesignRequest {
    /// Validates the request and decodes the photo.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Validation`] if the image is missing or is not
    /// valid base64.
    pub fn into_job(self) -> Result<RedesignJob> {
        let image = self
            .image_base64
            .as_deref()
            .filter(|data| !data.is_empty())
            .ok_or_else(|| SiteError::Validation("Missing image_base64".to_string()))?;

        let image = decode_image(image)?;

        Ok(RedesignJob {
            image,
            prompt: self.prompt(),
            variations: variation_count(self.variations.as_ref()),
        })
    }

    /// Builds the edit prompt.
    ///
    /// Fixed instructions keep the room's layout and limit changes to
    /// finishes. Each non-empty finish field adds a labeled clause in the
    /// order countertop, cabinets, backsplash, hardware, notes.
    #[must_use]
    pub fn prompt(&self) -> String {
        let room = self.room.as_deref().unwrap_or(DEFAULT_ROOM);
        let style = self.style.as_deref().unwrap_or(DEFAULT_STYLE);

        let labeled = |label: &str, value: &Option<String>, terminator: &str| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{label}: {v}{terminator}"))
        };

        let clauses = [
            Some(format!("Redesign this {room} photo in a {style} style.")),
            Some(
                "Keep the same layout and camera angle. Do not change walls/doors/windows placement."
                    .to_string(),
            ),
            Some(
                "Focus on finishes and surfaces: countertop, backsplash, cabinet color, hardware, lighting mood."
                    .to_string(),
            ),
            labeled("Countertop", &self.countertop, "."),
            labeled("Cabinets", &self.cabinets, "."),
            labeled("Backsplash", &self.backsplash, "."),
            labeled("Hardware", &self.hardware, "."),
            labeled("Extra notes", &self.notes, ""),
            Some("Photorealistic, high-end, clean, natural lighting.".to_string()),
        ];

        clauses.into_iter().flatten().collect::<Vec<_>>().join(" ")
    }
}

/// Strips an optional `data:image/...;base64,` prefix and decodes the rest.
///
/// Line breaks and other whitespace are skipped, padding is optional, and
/// URL-safe `-` / `_` are read as `+` / `/`.
pub fn decode_image(data: &str) -> Result<Vec<u8>> {
    let raw: Vec<u8> = DATA_URL_PREFIX
        .replace(data.trim_start(), "")
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| match b {
            b'-' => b'+',
            b'_' => b'/',
            other => other,
        })
        .collect();
    IMAGE_ENGINE
        .decode(raw)
        .map_err(|e| SiteError::Validation(format!("Invalid image_base64: {e}")))
}

/// Reads the requested variation count.
///
/// Values are read like the integer part of their text form: numbers are
/// truncated, except that very large or very small ones are read from their
/// exponent notation (`1e300` is 1, `5e-7` is 5). Text is read up to its
/// first non-digit. Missing, non-numeric, or zero values mean 1; the result
/// is clamped into 1..=[`MAX_VARIATIONS`].
#[must_use]
pub fn variation_count(value: Option<&Value>) -> u8 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(integer_part)),
        Some(Value::String(s)) => parse_leading_integer(s),
        _ => None,
    };

    match parsed {
        Some(n) if n != 0 => n.clamp(1, i64::from(MAX_VARIATIONS)) as u8,
        _ => 1,
    }
}

/// Integer part of a float as its shortest text form reads it.
///
/// Magnitudes at or above 1e21, or below 1e-6, print in exponent notation,
/// so only the mantissa's leading digits count.
fn integer_part(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || (magnitude > 0.0 && magnitude < 1e-6) {
        parse_leading_integer(&format!("{value:e}"))
    } else {
        Some(value.trunc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> RedesignRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_prompt_defaults() {
        let prompt = request(json!({})).prompt();
        assert_eq!(
            prompt,
            "Redesign this kitchen photo in a Modern Minimal style. \
             Keep the same layout and camera angle. Do not change walls/doors/windows placement. \
             Focus on finishes and surfaces: countertop, backsplash, cabinet color, hardware, lighting mood. \
             Photorealistic, high-end, clean, natural lighting."
        );
    }

    #[test]
    fn test_prompt_field_order() {
        let prompt = request(json!({
            "room": "bathroom",
            "style": "Scandinavian",
            "notes": "keep the tub",
            "hardware": "brass",
            "countertop": "white quartz",
            "cabinets": "",
            "backsplash": "zellige"
        }))
        .prompt();

        assert!(prompt.starts_with("Redesign this bathroom photo in a Scandinavian style."));
        assert!(prompt.contains(
            "Countertop: white quartz. Backsplash: zellige. Hardware: brass. Extra notes: keep the tub Photorealistic"
        ));
        assert!(!prompt.contains("Cabinets:"));
    }

    #[test]
    fn test_variation_count() {
        assert_eq!(variation_count(None), 1);
        assert_eq!(variation_count(Some(&json!(2))), 2);
        assert_eq!(variation_count(Some(&json!(10))), 3);
        assert_eq!(variation_count(Some(&json!(0))), 1);
        assert_eq!(variation_count(Some(&json!(-4))), 1);
        assert_eq!(variation_count(Some(&json!(2.9))), 2);
        assert_eq!(variation_count(Some(&json!("3 please"))), 3);
        assert_eq!(variation_count(Some(&json!("many"))), 1);
        assert_eq!(variation_count(Some(&json!(null))), 1);
        assert_eq!(variation_count(Some(&json!(true))), 1);
    }

    #[test]
    fn test_variation_count_exponent_numbers() {
        // Read from "1e300", "5e-7" and "2.5e-7"
        assert_eq!(variation_count(Some(&json!(1e300))), 1);
        assert_eq!(variation_count(Some(&json!(-1e300))), 1);
        assert_eq!(variation_count(Some(&json!(5e-7))), 3);
        assert_eq!(variation_count(Some(&json!(2.5e-7))), 2);
        assert_eq!(variation_count(Some(&json!(2e20))), 3);
        assert_eq!(variation_count(Some(&json!(0.5))), 1);
    }

    #[test]
    fn test_decode_image_strips_data_url() {
        assert_eq!(decode_image("data:image/png;base64,aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello");
        assert!(matches!(
            decode_image("not base64!"),
            Err(SiteError::Validation(_))
        ));
    }

    #[test]
    fn test_decode_image_is_lenient_about_layout() {
        assert_eq!(decode_image("aGVsbG8").unwrap(), b"hello");
        assert_eq!(decode_image("aGVs\nbG8=").unwrap(), b"hello");
        assert_eq!(decode_image("data:image/png;base64,aGVs\r\nbG8\n").unwrap(), b"hello");
        // 0xfb 0xff encodes as "+/8" or URL-safe "-_8"
        assert_eq!(decode_image("-_8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode_image("+/8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_into_job_requires_image() {
        let err = request(json!({"room": "kitchen"})).into_job().unwrap_err();
        assert!(matches!(err, SiteError::Validation(_)));

        let err = request(json!({"image_base64": ""})).into_job().unwrap_err();
        assert!(matches!(err, SiteError::Validation(_)));
    }

    #[test]
    fn test_into_job() {
        let job = request(json!({
            "image_base64": "data:image/jpeg;base64,aGVsbG8=",
            "variations": "10"
        }))
        .into_job()
        .unwrap();

        assert_eq!(job.image, b"hello");
        assert_eq!(job.variations, 3);
        assert!(job.prompt.contains("kitchen"));
    }
}
