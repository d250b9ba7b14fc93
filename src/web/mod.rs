//! Web API module for the countertop site.
//!
//! This module exposes the estimator and the redesign proxy over HTTP so
//! the static site can call them from the browser.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/pricing` - Materials, add-ons, and disclaimer for the estimate form
//! - `POST /api/estimate` - Compute an estimate, lead text, and mail link
//! - `POST /api/leads` - Compute an estimate and save it to the lead store
//! - `POST /api/redesign` - Forward a room photo to the image-edit service
//!   (also served at `/.netlify/functions/redesign` for existing frontends)

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::error::SiteError;
use crate::estimator::{
    compute_breakdown, serialize_lead, CurrencyFormat, LeadMail, LeadRecord, LeadStore,
    MoneyFormat,
};
use crate::models::{EstimateBreakdown, EstimateInputs, PricingConfig};
use crate::redesign::{run_redesign, ImageEditClient, RedesignRequest, RedesignResponse};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    config: Arc<Config>,
    /// Pricing used by the estimator (immutable after load)
    pricing: Arc<PricingConfig>,
    /// Saved leads; appends are serialized
    leads: Arc<Mutex<LeadStore>>,
    /// Client for the image-edit service
    image_client: ImageEditClient,
    /// Image service credential, if deployed with one
    api_key: Option<Arc<str>>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// The image service key is read from the environment variable named in
    /// the redesign configuration.
    pub fn new(config: Config, pricing: PricingConfig) -> anyhow::Result<Self> {
        let image_client = ImageEditClient::new(&config.redesign)?;
        let leads = LeadStore::in_dir(&config.leads.store_dir);
        let api_key = config.redesign.api_key().map(Arc::from);

        if api_key.is_none() {
            warn!(
                "{} is not set; redesign requests will be rejected",
                config.redesign.api_key_env
            );
        }

        Ok(Self {
            config: Arc::new(config),
            pricing: Arc::new(pricing),
            leads: Arc::new(Mutex::new(leads)),
            image_client,
            api_key,
        })
    }

    /// Replaces the image service key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty()).map(Arc::from);
        self
    }

    /// Returns the pricing configuration.
    #[must_use]
    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Pricing summary for populating the estimate form.
#[derive(Debug, Serialize)]
pub struct PricingResponse {
    /// Currency code.
    pub currency: String,
    /// Material names in display order.
    pub materials: Vec<String>,
    /// Add-on choices in display order.
    pub add_ons: Vec<AddOnInfo>,
    /// Disclaimer text.
    pub disclaimer: String,
}

/// One add-on choice.
#[derive(Debug, Serialize)]
pub struct AddOnInfo {
    /// Add-on name (the value submitted back).
    pub name: String,
    /// Flat cost range.
    pub range: [u64; 2],
    /// Chip label, e.g. "Sink cutout ($150 – $250)".
    pub label: String,
}

/// Formatted ranges for display.
#[derive(Debug, Serialize)]
pub struct FormattedBreakdown {
    /// Material range.
    pub material: String,
    /// Labor range.
    pub labor: String,
    /// Add-ons range.
    pub add_ons: String,
    /// Buffer range.
    pub buffer: String,
    /// Total range.
    pub total: String,
}

impl FormattedBreakdown {
    fn new(breakdown: &EstimateBreakdown, formatter: &impl MoneyFormat) -> Self {
        let money = |range| formatter.format_range(range, &breakdown.currency);
        Self {
            material: money(breakdown.material),
            labor: money(breakdown.labor),
            add_ons: money(breakdown.add_ons),
            buffer: money(breakdown.buffer),
            total: money(breakdown.total),
        }
    }
}

/// Estimate response.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    /// Rounded ranges.
    pub breakdown: EstimateBreakdown,
    /// Ranges formatted as currency.
    pub formatted: FormattedBreakdown,
    /// Plain-text lead details.
    pub lead_text: String,
    /// Pre-filled `mailto:` link, if a lead recipient is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailto: Option<String>,
    /// Disclaimer text.
    pub disclaimer: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Computes an estimate, reporting an unknown material as 400.
fn estimate(
    pricing: &PricingConfig,
    inputs: &EstimateInputs,
) -> Result<EstimateBreakdown, (StatusCode, Json<ApiError>)> {
    compute_breakdown(pricing, inputs).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid estimate request", e.to_string())),
        )
    })
}

/// Maps a redesign failure onto the proxy's HTTP contract.
fn redesign_error_response(err: SiteError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
    match err {
        // Relayed unchanged
        SiteError::Upstream { body, .. } => (status, Json(body)).into_response(),
        SiteError::Validation(message)
        | SiteError::Configuration(message)
        | SiteError::Network(message) => (status, Json(ApiError::new(message))).into_response(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/pricing - Estimate form choices.
async fn get_pricing(State(state): State<AppState>) -> Json<PricingResponse> {
    let pricing = state.pricing();

    let add_ons = pricing
        .add_ons
        .iter()
        .map(|(name, range)| {
            let rounded = range.round();
            AddOnInfo {
                name: name.to_string(),
                range: rounded.into(),
                label: format!(
                    "{name} ({})",
                    CurrencyFormat.format_range(rounded, &pricing.currency)
                ),
            }
        })
        .collect();

    Json(PricingResponse {
        currency: pricing.currency.clone(),
        materials: pricing.materials.names().map(str::to_string).collect(),
        add_ons,
        disclaimer: pricing.disclaimer.clone(),
    })
}

/// POST /api/estimate - Compute an estimate and the lead it would send.
async fn post_estimate(
    State(state): State<AppState>,
    Json(inputs): Json<EstimateInputs>,
) -> Result<Json<EstimateResponse>, (StatusCode, Json<ApiError>)> {
    let breakdown = estimate(&state.pricing, &inputs)?;

    let lead_text = serialize_lead(&inputs, &breakdown, &CurrencyFormat);

    let leads = &state.config.leads;
    let mailto = (!leads.recipient.is_empty()).then(|| {
        LeadMail::new(&leads.recipient, &leads.subject, &inputs, lead_text.clone()).link()
    });

    Ok(Json(EstimateResponse {
        formatted: FormattedBreakdown::new(&breakdown, &CurrencyFormat),
        breakdown,
        lead_text,
        mailto,
        disclaimer: state.pricing.disclaimer.clone(),
    }))
}

/// POST /api/leads - Save a lead with its estimate.
async fn post_lead(
    State(state): State<AppState>,
    Json(inputs): Json<EstimateInputs>,
) -> Result<(StatusCode, Json<LeadRecord>), (StatusCode, Json<ApiError>)> {
    let breakdown = estimate(&state.pricing, &inputs)?;
    let record = LeadRecord::new(inputs, breakdown);

    // File I/O runs off the async workers; the mutex serializes appends.
    let leads = Arc::clone(&state.leads);
    let saved = record.clone();
    let result = tokio::task::spawn_blocking(move || {
        let store = leads
            .lock()
            .map_err(|_| anyhow::anyhow!("Lead store lock is poisoned"))?;
        store.append(saved)
    })
    .await
    .map_err(|e| anyhow::anyhow!("Lead store task failed: {e}"))
    .and_then(|saved| saved);

    result.map_err(|e| {
        error!("Failed to save lead: {e:#}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Failed to save lead", e.to_string())),
        )
    })?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// ANY /api/redesign - Redesign proxy.
///
/// Checks run in order: credential (501), method (405), JSON body (400),
/// then the redesign itself.
async fn redesign(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    let Some(api_key) = state.api_key.as_deref() else {
        return (
            StatusCode::NOT_IMPLEMENTED,
            Json(ApiError::new(format!(
                "{} is not set",
                state.config.redesign.api_key_env
            ))),
        )
            .into_response();
    };

    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(ApiError::new("Method not allowed")),
        )
            .into_response();
    }

    let request: RedesignRequest = if body.is_empty() {
        RedesignRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiError::with_details("Invalid JSON", e.to_string())),
                )
                    .into_response();
            }
        }
    };

    match run_redesign(&state.image_client, Some(api_key), request).await {
        Ok(response) => (StatusCode::OK, Json::<RedesignResponse>(response)).into_response(),
        Err(err) => {
            warn!("Redesign failed: {err}");
            redesign_error_response(err)
        }
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The marketing pages are served from a different origin than this API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Estimator endpoints
        .route("/api/pricing", get(get_pricing))
        .route("/api/estimate", post(post_estimate))
        .route("/api/leads", post(post_lead))
        // Redesign proxy
        .route("/api/redesign", any(redesign))
        .route("/.netlify/functions/redesign", any(redesign))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Service configuration
/// * `pricing` - Pricing used by the estimator
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(
    config: Config,
    pricing: PricingConfig,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(config, pricing)?;
    let app = create_router(state);

    info!("Starting {} API on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
