//! Room redesign proxy.
//!
//! Accepts a room photo plus style preferences, builds an edit prompt, and
//! forwards both to an external image-edit service. The service credential
//! never leaves the server.
//!
//! Failure modes map onto [`SiteError`]:
//!
//! - missing or undecodable photo: [`SiteError::Validation`]
//! - no credential configured: [`SiteError::Configuration`]
//! - service answered with an error: [`SiteError::Upstream`] (relayed as-is)

#[cfg(feature = "web")]
pub mod client;
pub mod request;

#[cfg(feature = "web")]
pub use client::{extract_images, ImageEditClient};
pub use request::{
    decode_image, variation_count, RedesignJob, RedesignRequest, DEFAULT_ROOM, DEFAULT_STYLE,
    MAX_VARIATIONS,
};

use serde::{Deserialize, Serialize};

#[cfg(feature = "web")]
use crate::error::{Result, SiteError};

/// Successful redesign result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedesignResponse {
    /// Generated images, base64-encoded
    pub images: Vec<String>,
}

/// Runs one redesign: credential check, validation, then a single upstream call.
///
/// # Errors
///
/// See the module documentation.
#[cfg(feature = "web")]
pub async fn run_redesign(
    client: &ImageEditClient,
    api_key: Option<&str>,
    request: RedesignRequest,
) -> Result<RedesignResponse> {
    let api_key = api_key.filter(|key| !key.is_empty()).ok_or_else(|| {
        SiteError::Configuration("Image service API key is not set".to_string())
    })?;

    let job = request.into_job()?;
    let images = client.edit(api_key, &job).await?;

    Ok(RedesignResponse { images })
}
