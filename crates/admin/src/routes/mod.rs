//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness check
//! GET    /health/ready                    - Readiness check (pings the store)
//!
//! # Shipping methods
//! GET    /api/v1/shipping_methods         - List (optional ?id=)
//! POST   /api/v1/shipping_methods         - Create
//! GET    /api/v1/shipping_methods/{id}    - Show
//! PUT    /api/v1/shipping_methods/{id}    - Partial update
//! DELETE /api/v1/shipping_methods/{id}    - Delete
//! ```

pub mod health;
pub mod shipping_methods;

use axum::Router;

use crate::db::ShippingMethodStore;
use crate::state::AppState;

/// Build the complete admin router.
pub fn routes<S: ShippingMethodStore>() -> Router<AppState<S>> {
    Router::new()
        .merge(health::router())
        .merge(shipping_methods::router())
}
