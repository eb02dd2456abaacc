//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{MongoShippingMethodStore, ShippingMethodStore};
use crate::services::ShippingMethodsService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It is generic over the store
/// so tests can run the full router against an in-memory store.
pub struct AppState<S = MongoShippingMethodStore> {
    inner: Arc<AppStateInner<S>>,
}

struct AppStateInner<S> {
    shipping_methods: ShippingMethodsService<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ShippingMethodStore> AppState<S> {
    /// Create a new application state over the store backing the shipping
    /// method service.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                shipping_methods: ShippingMethodsService::new(store),
            }),
        }
    }

    /// Get a reference to the shipping method service.
    #[must_use]
    pub fn shipping_methods(&self) -> &ShippingMethodsService<S> {
        &self.inner.shipping_methods
    }
}
