//! Seed shipping methods from a YAML file.
//!
//! The file is a list of shipping method objects in the same loose shape the
//! admin API accepts:
//!
//! ```yaml
//! - name: Standard
//!   description: 3-5 business days
//!   price: 5.99
//! - name: Express
//!   price: "19.50"
//!   position: 1
//! - name: Store pickup
//!   enabled: false
//! ```
//!
//! Every entry goes through the same normalization as `POST
//! /api/v1/shipping_methods`.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use shopdesk_admin::db::ShippingMethodStore;
use shopdesk_admin::models::{ShippingMethod, ShippingMethodInput};
use shopdesk_admin::services::ShippingMethodsService;

use super::CommandError;

/// Read and validate a seed file without touching the store.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub async fn load_file(path: &Path) -> Result<Vec<ShippingMethodInput>, CommandError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: path.display().to_string(),
            source,
        })?;

    parse_entries(&content)
}

/// Parse seed entries from YAML text.
///
/// # Errors
///
/// Returns `CommandError::Yaml` for malformed YAML and
/// `CommandError::InvalidSeed` if the document is not a list of objects or an
/// entry has no name.
pub fn parse_entries(content: &str) -> Result<Vec<ShippingMethodInput>, CommandError> {
    let entries: Vec<Value> = serde_yaml::from_str(content)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(map) => match map.get("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => Ok(map),
                _ => Err(CommandError::InvalidSeed(format!(
                    "entry {index} must have a non-empty name"
                ))),
            },
            other => Err(CommandError::InvalidSeed(format!(
                "entry {index} must be a mapping, got {other}"
            ))),
        })
        .collect()
}

/// Insert every entry, in file order.
///
/// Stops at the first failure; entries inserted before it are kept.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub async fn shipping_methods<S: ShippingMethodStore>(
    service: &ShippingMethodsService<S>,
    entries: &[ShippingMethodInput],
) -> Result<Vec<ShippingMethod>, CommandError> {
    let mut created = Vec::with_capacity(entries.len());

    for entry in entries {
        let method = service.add_method(entry).await?;
        info!(id = %method.id, name = %method.name, "Seeded shipping method");
        created.push(method);
    }

    info!(count = created.len(), "Seeding complete");
    Ok(created)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopdesk_admin::db::MemoryShippingMethodStore;

    use super::*;

    const SEED: &str = r#"
- name: Standard
  description: 3-5 business days
  price: 5.99
- name: Express
  price: "19.50"
  position: 1
- name: Store pickup
  enabled: false
"#;

    #[test]
    fn test_parse_entries() {
        let entries = parse_entries(SEED).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1]["price"], "19.50");
    }

    #[test]
    fn test_parse_entries_requires_name() {
        let err = parse_entries("- price: 3\n").unwrap_err();
        assert!(matches!(err, CommandError::InvalidSeed(ref msg) if msg.contains("entry 0")));
    }

    #[test]
    fn test_parse_entries_requires_mappings() {
        let err = parse_entries("- just a string\n").unwrap_err();
        assert!(matches!(err, CommandError::InvalidSeed(_)));
    }

    #[test]
    fn test_parse_entries_rejects_non_list() {
        assert!(matches!(
            parse_entries("name: Standard\n"),
            Err(CommandError::Yaml(_))
        ));
    }

    #[tokio::test]
    async fn test_seed_normalizes_entries() {
        let service = ShippingMethodsService::new(MemoryShippingMethodStore::new());
        let entries = parse_entries(SEED).unwrap();

        let created = shipping_methods(&service, &entries).await.unwrap();
        assert_eq!(created.len(), 3);
        assert!((created[1].price - 19.5).abs() < f64::EPSILON);
        assert!((created[1].position - 1.0).abs() < f64::EPSILON);
        assert!(!created[2].enabled);
        assert!(created[0].enabled);
    }

    #[tokio::test]
    async fn test_load_file_missing() {
        let err = load_file(Path::new("/nonexistent/seed.yaml")).await.unwrap_err();
        assert!(matches!(err, CommandError::Io { .. }));
    }
}
