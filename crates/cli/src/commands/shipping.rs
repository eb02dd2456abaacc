//! Shipping method management commands.
//!
//! # Usage
//!
//! ```bash
//! # List every shipping method, or one by id
//! sd-cli shipping list
//! sd-cli shipping list --id 5a1f0c2b9d3e4f5a6b7c8d9e
//!
//! # Create a method (missing fields take defaults)
//! sd-cli shipping add --name "Standard" --price 5.99
//!
//! # Change only the given fields
//! sd-cli shipping update 5a1f0c2b9d3e4f5a6b7c8d9e --enabled false
//!
//! # Remove a method
//! sd-cli shipping delete 5a1f0c2b9d3e4f5a6b7c8d9e
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_MONGODB_URI` - `MongoDB` connection string
//! - `ADMIN_DATABASE_NAME` - Database name (default: shop)

use serde_json::{Map, Value};

use shopdesk_admin::db::{DeleteAck, ShippingMethodStore};
use shopdesk_admin::models::{MethodQuery, ShippingMethod, ShippingMethodInput};
use shopdesk_admin::services::ShippingMethodsService;

use super::CommandError;

/// Field values supplied on the command line.
///
/// `None` means the flag was not given, so the field is left out of the
/// input entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub position: Option<f64>,
    pub enabled: Option<bool>,
    pub price: Option<f64>,
}

impl MethodFields {
    /// Convert to the JSON object shape the service accepts.
    #[must_use]
    pub fn into_input(self) -> ShippingMethodInput {
        let mut input = Map::new();
        if let Some(name) = self.name {
            input.insert("name".to_string(), Value::String(name));
        }
        if let Some(description) = self.description {
            input.insert("description".to_string(), Value::String(description));
        }
        if let Some(position) = self.position {
            input.insert("position".to_string(), Value::from(position));
        }
        if let Some(enabled) = self.enabled {
            input.insert("enabled".to_string(), Value::Bool(enabled));
        }
        if let Some(price) = self.price {
            input.insert("price".to_string(), Value::from(price));
        }
        input
    }
}

/// List shipping methods.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn list<S: ShippingMethodStore>(
    service: &ShippingMethodsService<S>,
    id: Option<String>,
) -> Result<Vec<ShippingMethod>, CommandError> {
    let methods = service.get_methods(&MethodQuery { id }).await?;
    tracing::info!(count = methods.len(), "Found shipping methods");
    Ok(methods)
}

/// Create a shipping method.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn add<S: ShippingMethodStore>(
    service: &ShippingMethodsService<S>,
    fields: MethodFields,
) -> Result<ShippingMethod, CommandError> {
    let method = service.add_method(&fields.into_input()).await?;
    tracing::info!(id = %method.id, name = %method.name, "Created shipping method");
    Ok(method)
}

/// Update the given fields of a shipping method.
///
/// # Errors
///
/// Returns `CommandError::ShippingMethod` if the id is malformed or no field
/// was given, `CommandError::NotFound` if the method does not exist.
pub async fn update<S: ShippingMethodStore>(
    service: &ShippingMethodsService<S>,
    id: &str,
    fields: MethodFields,
) -> Result<ShippingMethod, CommandError> {
    let method = service
        .update_method(id, &fields.into_input())
        .await?
        .ok_or_else(|| CommandError::NotFound(id.to_owned()))?;
    tracing::info!(id = %method.id, "Updated shipping method");
    Ok(method)
}

/// Delete a shipping method.
///
/// # Errors
///
/// Returns `CommandError::ShippingMethod` if the id is malformed,
/// `CommandError::NotFound` if nothing was deleted.
pub async fn delete<S: ShippingMethodStore>(
    service: &ShippingMethodsService<S>,
    id: &str,
) -> Result<DeleteAck, CommandError> {
    let ack = service.delete_method(id).await?;
    if !ack.deleted() {
        return Err(CommandError::NotFound(id.to_owned()));
    }

    tracing::info!(id = %id, "Deleted shipping method");
    Ok(ack)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopdesk_admin::db::MemoryShippingMethodStore;
    use shopdesk_admin::services::ShippingMethodError;

    use super::*;

    fn service() -> ShippingMethodsService<MemoryShippingMethodStore> {
        ShippingMethodsService::new(MemoryShippingMethodStore::new())
    }

    #[test]
    fn test_into_input_skips_missing_flags() {
        let input = MethodFields {
            name: Some("Pickup".to_string()),
            enabled: Some(false),
            ..MethodFields::default()
        }
        .into_input();

        assert_eq!(input.len(), 2);
        assert_eq!(input["name"], "Pickup");
        assert_eq!(input["enabled"], false);
    }

    #[tokio::test]
    async fn test_add_list_update_delete() {
        let service = service();
        let added = add(
            &service,
            MethodFields {
                name: Some("Standard".to_string()),
                price: Some(5.99),
                ..MethodFields::default()
            },
        )
        .await
        .unwrap();

        let listed = list(&service, None).await.unwrap();
        assert_eq!(listed, vec![added.clone()]);

        let id = added.id.to_string();
        let updated = update(
            &service,
            &id,
            MethodFields {
                position: Some(2.0),
                ..MethodFields::default()
            },
        )
        .await
        .unwrap();
        assert!((updated.position - 2.0).abs() < f64::EPSILON);
        assert_eq!(updated.name, "Standard");

        let ack = delete(&service, &id).await.unwrap();
        assert_eq!(ack.deleted_count, 1);
        assert!(list(&service, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_without_flags_is_rejected() {
        let service = service();
        let added = add(&service, MethodFields::default()).await.unwrap();

        let err = update(&service, &added.id.to_string(), MethodFields::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::ShippingMethod(ShippingMethodError::EmptyUpdate)
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = service();
        let err = delete(&service, "5a1f0c2b9d3e4f5a6b7c8d9e").await.unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)));
    }
}
