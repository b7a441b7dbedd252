//! HTTP boundary: a single `GET /` route serving the rate dataset.

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::core::{CombinedRow, RateError, RateTableProvider};
use crate::pipeline;
use crate::providers::BmfProvider;

pub struct AppState {
    pub provider: Arc<dyn RateTableProvider>,
    pub horizon_months: u32,
    pub today: fn() -> NaiveDate,
}

impl AppState {
    pub fn new(provider: Arc<dyn RateTableProvider>, horizon_months: u32) -> Self {
        AppState {
            provider,
            horizon_months,
            today: local_today,
        }
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Renders as `{"error": "..."}` with a status derived from the failure kind.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<RateError> for AppError {
    fn from(e: RateError) -> Self {
        let status = match &e {
            RateError::InvalidTaxCode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RateError::Network(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            RateError::Network(_)
            | RateError::MalformedTable(_)
            | RateError::NumericFormat(_)
            | RateError::SeriesLengthMismatch { .. } => StatusCode::BAD_GATEWAY,
        };
        AppError {
            status,
            message: e.to_string(),
        }
    }
}

async fn get_rates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CombinedRow>>, AppError> {
    let today = (state.today)();
    let rows = pipeline::build_dataset(state.provider.as_ref(), today, state.horizon_months)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to build rate dataset"))?;
    Ok(Json(rows))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(get_rates)).with_state(state)
}

pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let provider = BmfProvider::new(&config.provider.base_url, config.provider.timeout())
        .context("Failed to create HTTP client")?;
    let state = Arc::new(AppState::new(Arc::new(provider), config.horizon_months));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, router(state))
        .await
        .context("HTTP server failed")
}
