//! Error taxonomy shared by the estimator and the redesign proxy.

use thiserror::Error;

/// Errors surfaced to callers of the site's operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SiteError {
    /// Bad or missing required input. The operation is aborted.
    #[error("validation error: {0}")]
    Validation(String),

    /// Required external configuration or credential is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The image service answered with a non-success status.
    /// The status and body are relayed to the caller unchanged.
    #[error("upstream service returned status {status}")]
    Upstream {
        /// HTTP status returned by the upstream service.
        status: u16,
        /// Upstream JSON body (an empty object if it was not JSON).
        body: serde_json::Value,
    },

    /// The image service could not be reached at all.
    #[error("network error: {0}")]
    Network(String),
}

impl SiteError {
    /// HTTP status this error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Configuration(_) => 501,
            Self::Upstream { status, .. } => *status,
            Self::Network(_) => 502,
        }
    }
}

/// Result alias for site operations.
pub type Result<T> = std::result::Result<T, SiteError>;
