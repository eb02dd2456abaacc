//! `MongoDB` collection backing shipping methods.

use bson::oid::ObjectId;
use bson::{Bson, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use serde::{Deserialize, Deserializer};

use shopdesk_core::ShippingMethodId;

use super::{DeleteAck, RepositoryError, ShippingMethodStore, UpdateAck};
use crate::models::shipping_method::{ShippingConditions, ShippingMethod, null_as_default};

/// Name of the collection holding shipping methods.
pub const COLLECTION: &str = "shippingMethods";

// =============================================================================
// Stored Document Type
// =============================================================================

/// A shipping method exactly as stored, keyed by `_id`.
///
/// Fields that are missing or `null` in older documents take the same
/// defaults an insert would have written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShippingMethodDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: f64,
    #[serde(default = "default_enabled", deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: ShippingConditions,
}

const fn default_enabled() -> bool {
    true
}

fn null_as_enabled<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_enabled))
}

impl TryFrom<Document> for ShippingMethodDocument {
    type Error = RepositoryError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        bson::from_document(document).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid shipping method document: {e}"))
        })
    }
}

/// Output projection: `_id` becomes the string `id`, the stored key is dropped.
impl From<ShippingMethodDocument> for ShippingMethod {
    fn from(document: ShippingMethodDocument) -> Self {
        Self {
            id: ShippingMethodId::new(document.id),
            name: document.name,
            description: document.description,
            position: document.position,
            enabled: document.enabled,
            price: document.price,
            conditions: document.conditions,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Shipping method store backed by a `MongoDB` collection.
///
/// Cheap to clone; clones share the driver's connection pool.
#[derive(Debug, Clone)]
pub struct MongoShippingMethodStore {
    database: Database,
    collection: Collection<Document>,
}

impl MongoShippingMethodStore {
    /// Create a store over the `shippingMethods` collection of `database`.
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(COLLECTION),
        }
    }
}

impl ShippingMethodStore for MongoShippingMethodStore {
    async fn find(&self, filter: Document) -> Result<Vec<Document>, RepositoryError> {
        let cursor = self.collection.find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn insert_many(&self, documents: Vec<Document>) -> Result<Vec<ObjectId>, RepositoryError> {
        let result = self.collection.insert_many(documents).await?;

        let mut inserted: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
        inserted.sort_by_key(|(index, _)| *index);

        inserted
            .into_iter()
            .map(|(_, id)| match id {
                Bson::ObjectId(oid) => Ok(oid),
                other => Err(RepositoryError::DataCorruption(format!(
                    "inserted document has non-ObjectId _id: {other}"
                ))),
            })
            .collect()
    }

    async fn update_one(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<UpdateAck, RepositoryError> {
        let result = self.collection.update_one(filter, update).await?;
        Ok(UpdateAck {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteAck, RepositoryError> {
        let result = self.collection.delete_one(filter).await?;
        Ok(DeleteAck {
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.database.run_command(bson::doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn test_document_decodes_all_fields() {
        let oid = ObjectId::new();
        let stored = doc! {
            "_id": oid,
            "name": "Standard",
            "description": "3-5 business days",
            "position": 2.0,
            "enabled": false,
            "price": 5.99,
            "conditions": {},
        };

        let decoded = ShippingMethodDocument::try_from(stored).unwrap();
        assert_eq!(decoded.id, oid);
        assert_eq!(decoded.name, "Standard");
        assert_eq!(decoded.description, "3-5 business days");
        assert!((decoded.position - 2.0).abs() < f64::EPSILON);
        assert!(!decoded.enabled);
        assert!((decoded.price - 5.99).abs() < f64::EPSILON);
        assert_eq!(decoded.conditions, ShippingConditions::default());
    }

    #[test]
    fn test_document_missing_fields_take_defaults() {
        let decoded = ShippingMethodDocument::try_from(doc! { "_id": ObjectId::new() }).unwrap();
        assert_eq!(decoded.name, "");
        assert!(decoded.enabled);
        assert!(decoded.price.abs() < f64::EPSILON);
    }

    #[test]
    fn test_document_null_fields_take_defaults() {
        let decoded = ShippingMethodDocument::try_from(doc! {
            "_id": ObjectId::new(),
            "name": null,
            "description": null,
            "position": null,
            "enabled": null,
            "price": null,
            "conditions": { "countries": null, "states": ["CA"], "weight_max": null },
        })
        .unwrap();
        assert_eq!(decoded.name, "");
        assert_eq!(decoded.description, "");
        assert!(decoded.position.abs() < f64::EPSILON);
        assert!(decoded.enabled);
        assert!(decoded.price.abs() < f64::EPSILON);
        assert!(decoded.conditions.countries.is_empty());
        assert_eq!(decoded.conditions.states, vec!["CA".to_string()]);
        assert!(decoded.conditions.weight_max.is_none());
    }

    #[test]
    fn test_document_null_conditions_take_defaults() {
        let decoded = ShippingMethodDocument::try_from(doc! {
            "_id": ObjectId::new(),
            "name": "Pickup",
            "conditions": null,
        })
        .unwrap();
        assert!(decoded.conditions.is_empty());
    }

    #[test]
    fn test_document_integer_numbers_decode() {
        let decoded = ShippingMethodDocument::try_from(doc! {
            "_id": ObjectId::new(),
            "position": 3_i32,
            "price": 10_i64,
        })
        .unwrap();
        assert!((decoded.position - 3.0).abs() < f64::EPSILON);
        assert!((decoded.price - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_document_without_id_is_corruption() {
        let err = ShippingMethodDocument::try_from(doc! { "name": "Orphan" }).unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[test]
    fn test_projection_exposes_hex_id() {
        let oid = ObjectId::new();
        let method = ShippingMethod::from(
            ShippingMethodDocument::try_from(doc! { "_id": oid, "name": "Pickup" }).unwrap(),
        );
        let json = serde_json::to_value(&method).unwrap();
        assert_eq!(json["id"], oid.to_hex());
        assert!(json.get("_id").is_none());
        assert_eq!(json["name"], "Pickup");
    }
}
