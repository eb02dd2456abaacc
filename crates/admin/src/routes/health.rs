//! Health check endpoints.

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::db::ShippingMethodStore;
use crate::state::AppState;

/// Build the health check router.
pub fn router<S: ShippingMethodStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness::<S>))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies store connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness<S: ShippingMethodStore>(State(state): State<AppState<S>>) -> StatusCode {
    match state.shipping_methods().store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
