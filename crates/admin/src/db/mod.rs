//! Document store access for the admin service.
//!
//! # Database: `MongoDB` (name from `ADMIN_DATABASE_NAME`)
//!
//! ## Collections
//!
//! - `shippingMethods` - Shipping methods offered at checkout
//!
//! # Store Abstraction
//!
//! Services talk to a collection through [`ShippingMethodStore`], a thin
//! collection-style interface (`find`, `insert_many`, `update_one`,
//! `delete_one`) over raw BSON documents. Two implementations exist:
//!
//! - [`MongoShippingMethodStore`] - the production `MongoDB` collection
//! - [`MemoryShippingMethodStore`] - an in-process collection for tests and dry runs
//!
//! Every operation is atomic for a single document; there are no
//! multi-document transactions.

pub mod memory;
pub mod shipping_methods;

use std::future::Future;
use std::time::Duration;

use bson::Document;
use bson::oid::ObjectId;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use crate::config::AdminConfig;

pub use memory::MemoryShippingMethodStore;
pub use shipping_methods::{MongoShippingMethodStore, ShippingMethodDocument};

/// Application name reported to the `MongoDB` server.
const APP_NAME: &str = "shopdesk-admin";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from the `MongoDB` driver.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A value could not be encoded as BSON.
    #[error("encoding error: {0}")]
    Encoding(#[from] bson::ser::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The store cannot serve requests (e.g., poisoned in-memory lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused a well-formed request it cannot apply, such as an
    /// unsupported update operator or a duplicate `_id`.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// Acknowledgment of an `update_one` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateAck {
    /// Number of documents matching the filter (0 or 1).
    pub matched_count: u64,
    /// Number of documents actually changed (0 or 1).
    pub modified_count: u64,
}

/// Acknowledgment of a `delete_one` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteAck {
    /// Number of documents removed (0 or 1).
    pub deleted_count: u64,
}

impl DeleteAck {
    /// Returns true if a document was removed.
    #[must_use]
    pub const fn deleted(&self) -> bool {
        self.deleted_count > 0
    }
}

/// Collection-style access to stored shipping method documents.
///
/// Filters are equality matches on top-level fields (`{}` matches every
/// document). Updates use the `$set` operator.
pub trait ShippingMethodStore: Send + Sync + 'static {
    /// Return every document matching `filter`, in insertion order.
    fn find(
        &self,
        filter: Document,
    ) -> impl Future<Output = Result<Vec<Document>, RepositoryError>> + Send;

    /// Insert `documents`, returning the generated `_id` of each in order.
    fn insert_many(
        &self,
        documents: Vec<Document>,
    ) -> impl Future<Output = Result<Vec<ObjectId>, RepositoryError>> + Send;

    /// Apply `update` to the first document matching `filter`.
    fn update_one(
        &self,
        filter: Document,
        update: Document,
    ) -> impl Future<Output = Result<UpdateAck, RepositoryError>> + Send;

    /// Remove the first document matching `filter`.
    fn delete_one(
        &self,
        filter: Document,
    ) -> impl Future<Output = Result<DeleteAck, RepositoryError>> + Send;

    /// Check that the store is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Connect to `MongoDB` and select the configured database.
///
/// The driver connects lazily; server selection fails after 10 seconds
/// instead of the driver default of 30.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the connection string is invalid.
pub async fn connect(config: &AdminConfig) -> Result<Database, RepositoryError> {
    let mut options = ClientOptions::parse(config.mongodb_uri.expose_secret()).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(Duration::from_secs(10));

    let client = Client::with_options(options)?;
    Ok(client.database(&config.database_name))
}
