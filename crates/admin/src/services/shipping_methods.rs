//! Shipping method management.
//!
//! [`ShippingMethodsService`] validates identifiers, normalizes input and
//! issues single-document operations against a [`ShippingMethodStore`].
//! Writes re-read the affected document so callers always receive the
//! stored state. Concurrent updates to one method are last-writer-wins.

use bson::oid::ObjectId;
use bson::{Document, doc};
use thiserror::Error;
use tracing::instrument;

use shopdesk_core::ShippingMethodId;
use shopdesk_core::parse::get_object_id_if_valid;

use crate::db::{DeleteAck, RepositoryError, ShippingMethodDocument, ShippingMethodStore};
use crate::models::shipping_method::{
    MethodQuery, NewShippingMethod, ShippingMethod, ShippingMethodInput, ShippingMethodPatch,
};

/// Errors that can occur during shipping method operations.
#[derive(Debug, Error)]
pub enum ShippingMethodError {
    /// The identifier is not a valid object id. The store was not queried.
    #[error("Invalid identifier")]
    InvalidIdentifier(String),

    /// An update supplied no recognized fields.
    #[error("Required fields are missing")]
    EmptyUpdate,

    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Shipping method service.
///
/// Constructed once per process with its store; share it behind an `Arc`.
#[derive(Debug)]
pub struct ShippingMethodsService<S> {
    store: S,
}

impl<S: ShippingMethodStore> ShippingMethodsService<S> {
    /// Create a new shipping method service over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// List shipping methods.
    ///
    /// If `query.id` is a valid identifier only that method is returned,
    /// otherwise every method is. An invalid id is not an error here.
    ///
    /// # Errors
    ///
    /// Returns `ShippingMethodError::Store` if the store fails or holds a
    /// malformed document.
    #[instrument(skip(self))]
    pub async fn get_methods(
        &self,
        query: &MethodQuery,
    ) -> Result<Vec<ShippingMethod>, ShippingMethodError> {
        let filter = get_object_id_if_valid(query.id.as_deref())
            .map_or_else(Document::new, |oid| doc! { "_id": oid });

        let methods = self.find(filter).await?;
        tracing::debug!(count = methods.len(), "Listed shipping methods");
        Ok(methods)
    }

    /// Get a single shipping method.
    ///
    /// Returns `Ok(None)` if no method has this id.
    ///
    /// # Errors
    ///
    /// Returns `ShippingMethodError::InvalidIdentifier` if `id` is malformed.
    /// Returns `ShippingMethodError::Store` if the store fails.
    #[instrument(skip(self))]
    pub async fn get_single_method(
        &self,
        id: &str,
    ) -> Result<Option<ShippingMethod>, ShippingMethodError> {
        let id = parse_id(id)?;
        self.find_by_id(id.as_object_id()).await
    }

    /// Insert a new shipping method and return it as stored.
    ///
    /// Every field is set; missing or invalid input falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ShippingMethodError::Store` if the insert fails or the new
    /// document cannot be read back.
    #[instrument(skip(self, data))]
    pub async fn add_method(
        &self,
        data: &ShippingMethodInput,
    ) -> Result<ShippingMethod, ShippingMethodError> {
        let method = NewShippingMethod::from_input(data);
        let document = bson::to_document(&method).map_err(RepositoryError::from)?;

        let ids = self.store.insert_many(vec![document]).await?;
        let id = ids.first().copied().ok_or(RepositoryError::NotFound)?;
        tracing::info!(id = %id, name = %method.name, "Shipping method created");

        Ok(self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)?)
    }

    /// Apply a partial update and return the refreshed method.
    ///
    /// Only fields present in `data` change. Returns `Ok(None)` if no method
    /// has this id.
    ///
    /// # Errors
    ///
    /// Returns `ShippingMethodError::InvalidIdentifier` if `id` is malformed.
    /// Returns `ShippingMethodError::EmptyUpdate` if `data` has no known fields.
    /// Returns `ShippingMethodError::Store` if the store fails.
    #[instrument(skip(self, data))]
    pub async fn update_method(
        &self,
        id: &str,
        data: &ShippingMethodInput,
    ) -> Result<Option<ShippingMethod>, ShippingMethodError> {
        let id = parse_id(id)?;

        let patch = ShippingMethodPatch::from_input(data);
        if patch.is_empty() {
            return Err(ShippingMethodError::EmptyUpdate);
        }
        let fields = bson::to_document(&patch).map_err(RepositoryError::from)?;

        let ack = self
            .store
            .update_one(doc! { "_id": id.as_object_id() }, doc! { "$set": fields })
            .await?;
        tracing::info!(
            id = %id,
            matched = ack.matched_count,
            modified = ack.modified_count,
            "Shipping method updated"
        );

        self.find_by_id(id.as_object_id()).await
    }

    /// Delete a shipping method.
    ///
    /// Deleting an unknown id is not an error; the acknowledgment reports
    /// zero deletions.
    ///
    /// # Errors
    ///
    /// Returns `ShippingMethodError::InvalidIdentifier` if `id` is malformed.
    /// Returns `ShippingMethodError::Store` if the store fails.
    #[instrument(skip(self))]
    pub async fn delete_method(&self, id: &str) -> Result<DeleteAck, ShippingMethodError> {
        let id = parse_id(id)?;

        let ack = self
            .store
            .delete_one(doc! { "_id": id.as_object_id() })
            .await?;
        tracing::info!(id = %id, deleted = ack.deleted_count, "Shipping method deleted");

        Ok(ack)
    }

    async fn find_by_id(
        &self,
        id: ObjectId,
    ) -> Result<Option<ShippingMethod>, ShippingMethodError> {
        Ok(self.find(doc! { "_id": id }).await?.into_iter().next())
    }

    async fn find(&self, filter: Document) -> Result<Vec<ShippingMethod>, ShippingMethodError> {
        let documents = self.store.find(filter).await?;

        documents
            .into_iter()
            .map(|document| {
                ShippingMethodDocument::try_from(document)
                    .map(ShippingMethod::from)
                    .map_err(ShippingMethodError::from)
            })
            .collect()
    }
}

fn parse_id(id: &str) -> Result<ShippingMethodId, ShippingMethodError> {
    ShippingMethodId::parse(id).map_err(|_| ShippingMethodError::InvalidIdentifier(id.to_owned()))
}
