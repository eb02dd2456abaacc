//! Shipping method domain types.
//!
//! Input normalization lives here: admin clients send loosely-typed JSON
//! objects, and [`NewShippingMethod::from_input`] / [`ShippingMethodPatch::from_input`]
//! coerce each known field with the helpers in `shopdesk_core::parse`.
//! Unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use shopdesk_core::ShippingMethodId;
use shopdesk_core::parse::{get_boolean_if_valid, get_number_if_positive, get_string};

/// JSON object as received from API clients.
pub type ShippingMethodInput = Map<String, Value>;

/// A shipping method as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingMethod {
    pub id: ShippingMethodId,
    pub name: String,
    pub description: String,
    pub position: f64,
    pub enabled: bool,
    pub price: f64,
    pub conditions: ShippingConditions,
}

/// Rules restricting where and when a shipping method is offered.
///
/// Reserved for checkout filtering; every field is empty on insert and the
/// admin API does not yet edit them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingConditions {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub countries: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub states: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub cities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_total_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_total_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_max: Option<f64>,
}

/// Deserialize a stored `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ShippingConditions {
    /// Returns true if no condition is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A fully-populated document for insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewShippingMethod {
    pub name: String,
    pub description: String,
    pub position: f64,
    pub enabled: bool,
    pub price: f64,
    pub conditions: ShippingConditions,
}

impl NewShippingMethod {
    /// Normalize client input, applying defaults for every missing or invalid field.
    ///
    /// - `name`, `description`: text, empty if absent
    /// - `position`, `price`: positive number, otherwise `0`
    /// - `enabled`: boolean, `true` if absent or invalid
    #[must_use]
    pub fn from_input(input: &ShippingMethodInput) -> Self {
        Self {
            name: get_string(input.get("name")),
            description: get_string(input.get("description")),
            position: get_number_if_positive(input.get("position")).unwrap_or(0.0),
            enabled: get_boolean_if_valid(input.get("enabled"), true),
            price: get_number_if_positive(input.get("price")).unwrap_or(0.0),
            conditions: ShippingConditions::default(),
        }
    }
}

/// A partial update: only fields present in the client input are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShippingMethodPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ShippingMethodPatch {
    /// Normalize client input, keeping only the fields that were supplied.
    ///
    /// A supplied field is coerced exactly as on insert, so `"price": -3`
    /// resets the price to `0` rather than being skipped.
    #[must_use]
    pub fn from_input(input: &ShippingMethodInput) -> Self {
        Self {
            name: input.get("name").map(|v| get_string(Some(v))),
            description: input.get("description").map(|v| get_string(Some(v))),
            position: input
                .get("position")
                .map(|v| get_number_if_positive(Some(v)).unwrap_or(0.0)),
            enabled: input
                .get("enabled")
                .map(|v| get_boolean_if_valid(Some(v), true)),
            price: input
                .get("price")
                .map(|v| get_number_if_positive(Some(v)).unwrap_or(0.0)),
        }
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.position.is_none()
            && self.enabled.is_none()
            && self.price.is_none()
    }
}

/// Parameters for listing shipping methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MethodQuery {
    /// Restrict the listing to this id. Ignored unless it is a valid id.
    pub id: Option<String>,
}

impl MethodQuery {
    /// Query for a single id.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(value: Value) -> ShippingMethodInput {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_new_from_input_applies_defaults() {
        let method = NewShippingMethod::from_input(&input(json!({
            "name": "Standard",
            "price": 5.99,
        })));

        assert_eq!(
            method,
            NewShippingMethod {
                name: "Standard".to_string(),
                description: String::new(),
                position: 0.0,
                enabled: true,
                price: 5.99,
                conditions: ShippingConditions::default(),
            }
        );
    }

    #[test]
    fn test_new_from_input_coerces_strings() {
        let method = NewShippingMethod::from_input(&input(json!({
            "name": 42,
            "position": "3",
            "enabled": "false",
            "price": "12.50",
        })));

        assert_eq!(method.name, "42");
        assert!((method.position - 3.0).abs() < f64::EPSILON);
        assert!(!method.enabled);
        assert!((method.price - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_from_input_clamps_negative_numbers() {
        let method = NewShippingMethod::from_input(&input(json!({
            "position": -4,
            "price": "-1",
            "enabled": "maybe",
        })));

        assert!(method.position.abs() < f64::EPSILON);
        assert!(method.price.abs() < f64::EPSILON);
        assert!(method.enabled);
    }

    #[test]
    fn test_patch_only_includes_supplied_fields() {
        let patch = ShippingMethodPatch::from_input(&input(json!({ "enabled": false })));
        assert_eq!(
            patch,
            ShippingMethodPatch {
                enabled: Some(false),
                ..ShippingMethodPatch::default()
            }
        );
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_normalizes_supplied_values() {
        let patch = ShippingMethodPatch::from_input(&input(json!({
            "name": null,
            "price": -3,
            "position": "2",
        })));

        assert_eq!(patch.name.as_deref(), Some(""));
        assert_eq!(patch.price, Some(0.0));
        assert_eq!(patch.position, Some(2.0));
        assert!(patch.description.is_none());
    }

    #[test]
    fn test_patch_ignores_unknown_fields() {
        let patch = ShippingMethodPatch::from_input(&input(json!({ "logo": "x.png" })));
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = ShippingMethodPatch {
            price: Some(7.0),
            ..ShippingMethodPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "price": 7.0 }));
    }

    #[test]
    fn test_conditions_serialize_empty() {
        let conditions = ShippingConditions::default();
        assert!(conditions.is_empty());
        assert_eq!(serde_json::to_value(&conditions).unwrap(), json!({}));
    }

    #[test]
    fn test_method_query_deserializes_optional_id() {
        let query: MethodQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query, MethodQuery::default());

        let query: MethodQuery = serde_json::from_value(json!({ "id": "abc" })).unwrap();
        assert_eq!(query, MethodQuery::by_id("abc"));
    }
}
