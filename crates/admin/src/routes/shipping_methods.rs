//! Shipping method API handlers.
//!
//! Request bodies are free-form JSON objects; field coercion happens in the
//! service, so `{"price": "5.99"}` and `{"price": 5.99}` are equivalent.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::db::{DeleteAck, ShippingMethodStore};
use crate::error::AppError;
use crate::models::shipping_method::{MethodQuery, ShippingMethod, ShippingMethodInput};
use crate::state::AppState;

/// Build the shipping methods router.
pub fn router<S: ShippingMethodStore>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/api/v1/shipping_methods",
            get(list::<S>).post(create::<S>),
        )
        .route(
            "/api/v1/shipping_methods/{id}",
            get(show::<S>).put(update::<S>).delete(destroy::<S>),
        )
}

/// List shipping methods, optionally filtered by `?id=`.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn list<S: ShippingMethodStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<MethodQuery>,
) -> Result<Json<Vec<ShippingMethod>>, AppError> {
    let methods = state.shipping_methods().get_methods(&query).await?;
    Ok(Json(methods))
}

/// Get a single shipping method.
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 if the method does not exist.
pub async fn show<S: ShippingMethodStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<ShippingMethod>, AppError> {
    state
        .shipping_methods()
        .get_single_method(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("shipping method {id}")))
}

/// Create a shipping method.
///
/// # Errors
///
/// Returns 400 if the body is not a JSON object, 500 if the store fails.
pub async fn create<S: ShippingMethodStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<ShippingMethodInput>, JsonRejection>,
) -> Result<Json<ShippingMethod>, AppError> {
    let Json(body) = body?;
    let method = state.shipping_methods().add_method(&body).await?;
    Ok(Json(method))
}

/// Partially update a shipping method.
///
/// # Errors
///
/// Returns 400 for a malformed id, a body that is not a JSON object, or a
/// body with no known fields. Returns 404 if the method does not exist.
pub async fn update<S: ShippingMethodStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Result<Json<ShippingMethodInput>, JsonRejection>,
) -> Result<Json<ShippingMethod>, AppError> {
    let Json(body) = body?;
    state
        .shipping_methods()
        .update_method(&id, &body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("shipping method {id}")))
}

/// Delete a shipping method.
///
/// Responds 200 with the acknowledgment when a method was removed and 404
/// when nothing matched.
///
/// # Errors
///
/// Returns 400 for a malformed id.
pub async fn destroy<S: ShippingMethodStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<DeleteAck>), AppError> {
    let ack = state.shipping_methods().delete_method(&id).await?;
    let status = if ack.deleted() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(ack)))
}
