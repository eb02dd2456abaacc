//! In-memory shipping method store for testing.
//!
//! Provides [`MemoryShippingMethodStore`], a thread-safe in-process
//! collection. It understands the subset of the query language the service
//! uses: top-level equality filters and the `$set` update operator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bson::oid::ObjectId;
use bson::{Bson, Document};

use super::{DeleteAck, RepositoryError, ShippingMethodStore, UpdateAck};

/// Thread-safe in-memory document collection.
///
/// Documents keep insertion order. `insert_many` assigns an `_id` to any
/// document that lacks one.
///
/// # Example
///
/// ```rust
/// use shopdesk_admin::db::MemoryShippingMethodStore;
/// use shopdesk_admin::services::ShippingMethodsService;
///
/// let service = ShippingMethodsService::new(MemoryShippingMethodStore::new());
/// ```
#[derive(Debug, Default)]
pub struct MemoryShippingMethodStore {
    documents: Mutex<Vec<Document>>,
    operations: AtomicUsize,
}

impl MemoryShippingMethodStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations served so far (pings excluded).
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Acquires the collection lock, counting the call as one operation.
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Document>>, RepositoryError> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        self.documents.lock().map_err(|err| lock_error(&err))
    }
}

/// Converts a poisoned lock into a repository error.
fn lock_error<T>(err: &PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable(format!("collection lock poisoned: {err}"))
}

/// Returns true if every filter field equals the document's field.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

/// Extracts the `$set` fields from an update document.
fn set_fields(update: &Document) -> Result<&Document, RepositoryError> {
    if let Some(key) = update.keys().find(|key| key.as_str() != "$set") {
        return Err(RepositoryError::InvalidOperation(format!(
            "unsupported update operator: {key}"
        )));
    }

    let fields = update.get_document("$set").map_err(|_| {
        RepositoryError::InvalidOperation("update document must contain $set".to_string())
    })?;

    if fields.is_empty() {
        return Err(RepositoryError::InvalidOperation(
            "'$set' is empty; it requires at least one field".to_string(),
        ));
    }

    if fields.contains_key("_id") {
        return Err(RepositoryError::InvalidOperation(
            "performing an update on the path '_id' would modify the immutable field '_id'"
                .to_string(),
        ));
    }

    Ok(fields)
}

impl ShippingMethodStore for MemoryShippingMethodStore {
    async fn find(&self, filter: Document) -> Result<Vec<Document>, RepositoryError> {
        let documents = self.lock()?;
        Ok(documents
            .iter()
            .filter(|document| matches(document, &filter))
            .cloned()
            .collect())
    }

    async fn insert_many(&self, documents: Vec<Document>) -> Result<Vec<ObjectId>, RepositoryError> {
        let mut stored = self.lock()?;
        let mut ids = Vec::with_capacity(documents.len());

        for mut document in documents {
            let id = match document.get("_id") {
                Some(Bson::ObjectId(oid)) => *oid,
                Some(other) => {
                    return Err(RepositoryError::DataCorruption(format!(
                        "non-ObjectId _id: {other}"
                    )));
                }
                None => {
                    let oid = ObjectId::new();
                    document.insert("_id", oid);
                    oid
                }
            };

            if stored.iter().any(|existing| existing.get("_id") == Some(&Bson::ObjectId(id))) {
                return Err(RepositoryError::InvalidOperation(format!(
                    "duplicate key error: _id {id}"
                )));
            }

            stored.push(document);
            ids.push(id);
        }

        Ok(ids)
    }

    async fn update_one(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<UpdateAck, RepositoryError> {
        let fields = set_fields(&update)?;
        let mut stored = self.lock()?;

        let Some(document) = stored.iter_mut().find(|document| matches(document, &filter)) else {
            return Ok(UpdateAck {
                matched_count: 0,
                modified_count: 0,
            });
        };

        let mut modified = false;
        for (key, value) in fields {
            if document.get(key) != Some(value) {
                document.insert(key.clone(), value.clone());
                modified = true;
            }
        }

        Ok(UpdateAck {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteAck, RepositoryError> {
        let mut stored = self.lock()?;

        let deleted_count = match stored.iter().position(|document| matches(document, &filter)) {
            Some(index) => {
                stored.remove(index);
                1
            }
            None => 0,
        };

        Ok(DeleteAck { deleted_count })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.documents.lock().map(|_| ()).map_err(|err| lock_error(&err))
    }
}
