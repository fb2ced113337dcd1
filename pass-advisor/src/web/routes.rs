//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::advisor::Advisor;
use crate::network::{MalformedGraphError, Network};
use crate::roster::Roster;
use crate::source::LoadError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/optimize", get(optimize_files).post(optimize_inline))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Advise on the configured network and roster files.
async fn optimize_files(State(state): State<AppState>) -> Result<Json<OptimizeResponse>, AppError> {
    let network = state.files.load_network().await?;
    let roster = state.files.load_roster().await?;

    Ok(Json(advise(&state, &network, &roster).await))
}

/// Advise on a network and roster supplied in the request body.
async fn optimize_inline(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<OptimizeResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: OptimizeRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(&body), "JSON parse error: {e}");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let network = req.network.into_network()?;
    let roster = Roster::from_records(req.trains.into_iter().map(Into::into));

    Ok(Json(advise(&state, &network, &roster).await))
}

async fn advise(state: &AppState, network: &Network, roster: &Roster) -> OptimizeResponse {
    let occupancy = state.occupancy.get_or_build(network).await;
    let advice = Advisor::new(network, &occupancy, &state.config).advise(roster);

    info!(
        network = %network.version(),
        trains = roster.len(),
        excluded = roster.excluded(),
        recommendations = advice.recommendations().len(),
        "advised"
    );

    OptimizeResponse::from_advice(&advice)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<MalformedGraphError> for AppError {
    fn from(e: MalformedGraphError) -> Self {
        AppError::BadRequest {
            message: format!("malformed network: {e}"),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        if e.is_bad_input() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
