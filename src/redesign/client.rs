//! HTTP client for the external image-edit service.
//!
//! Talks to an OpenAI-compatible `images/edits` endpoint using a multipart
//! upload. Exactly one request is made per redesign; failures are reported
//! once and never retried.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::request::RedesignJob;
use crate::config::RedesignConfig;
use crate::error::{Result, SiteError};

/// User agent string for outbound requests.
const USER_AGENT_VALUE: &str = concat!("countertop-site/", env!("CARGO_PKG_VERSION"));

/// File name the room photo is uploaded under.
const UPLOAD_FILE_NAME: &str = "room.png";

/// Content type the room photo is uploaded as.
const UPLOAD_CONTENT_TYPE: &str = "image/png";

/// Client for the image-edit service.
#[derive(Debug, Clone)]
pub struct ImageEditClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    size: String,
}

impl ImageEditClient {
    /// Creates a client for the configured service.
    pub fn new(config: &RedesignConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SiteError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/images/edits", config.api_base.trim_end_matches('/')),
            model: config.model.clone(),
            size: config.size.clone(),
        })
    }

    /// Full URL of the edit endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one edit request and returns the generated images as base64.
    ///
    /// # Errors
    ///
    /// - [`SiteError::Network`] if the service cannot be reached
    /// - [`SiteError::Upstream`] with the service's status and JSON body if it
    ///   answers with a non-success status
    pub async fn edit(&self, api_key: &str, job: &RedesignJob) -> Result<Vec<String>> {
        let image = Part::bytes(job.image.clone())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_CONTENT_TYPE)
            .map_err(|e| SiteError::Network(format!("failed to build upload: {e}")))?;

        let form = Form::new()
            .text("model", self.model.clone())
            .text("prompt", job.prompt.clone())
            .text("n", job.variations.to_string())
            .text("size", self.size.clone())
            .part("image", image);

        info!(
            "Requesting {} redesign variation(s) from {}",
            job.variations, self.endpoint
        );
        debug!("Redesign prompt: {}", job.prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SiteError::Network(format!("image service unreachable: {e}")))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        if !status.is_success() {
            warn!("Image service returned {}", status);
            return Err(SiteError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(extract_images(&body))
    }
}

/// Pulls the `data[].b64_json` payloads out of a success response.
#[must_use]
pub fn extract_images(body: &Value) -> Vec<String> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("b64_json").and_then(Value::as_str))
                .filter(|image| !image.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_images() {
        let body = json!({
            "created": 1,
            "data": [
                {"b64_json": "AAA"},
                {"url": "https://example.com/x.png"},
                {"b64_json": ""},
                {"b64_json": "BBB"}
            ]
        });
        assert_eq!(extract_images(&body), vec!["AAA", "BBB"]);
        assert!(extract_images(&json!({})).is_empty());
    }

    #[test]
    fn test_endpoint_joins_base() {
        let config = RedesignConfig {
            api_base: "https://api.example.com/v1/".to_string(),
            ..RedesignConfig::default()
        };
        let client = ImageEditClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/v1/images/edits");
    }
}
