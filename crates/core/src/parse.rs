//! Lenient field coercion for loosely-typed JSON input.
//!
//! Admin forms and API clients send fields in whatever shape is convenient
//! (`"5.99"` vs `5.99`, `"true"` vs `true`). These helpers normalize a single
//! field into the type the store expects, falling back to "no value" instead
//! of failing, so callers decide on defaults.
//!
//! Every helper takes `Option<&Value>` where `None` means the field was absent
//! from the input object.

use bson::oid::ObjectId;
use serde_json::Value;

/// Coerce a field to a string.
///
/// Strings pass through unchanged, numbers and booleans are rendered as text.
/// `null`, absent fields, arrays and objects become the empty string.
///
/// ```
/// use serde_json::json;
/// use shopdesk_core::parse::get_string;
///
/// assert_eq!(get_string(Some(&json!("Standard"))), "Standard");
/// assert_eq!(get_string(Some(&json!(42))), "42");
/// assert_eq!(get_string(None), "");
/// ```
#[must_use]
pub fn get_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => String::new(),
    }
}

/// Coerce a field to a finite, non-zero number.
///
/// Accepts JSON numbers and strings whose trimmed content parses as a float.
/// Zero, `NaN`, infinities and anything unparseable yield `None`.
#[must_use]
pub fn get_number_if_valid(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (number.is_finite() && number != 0.0).then_some(number)
}

/// Coerce a field to a strictly positive number.
///
/// Callers typically apply `unwrap_or(0.0)`, which maps zero, negatives and
/// invalid input to `0`.
///
/// ```
/// use serde_json::json;
/// use shopdesk_core::parse::get_number_if_positive;
///
/// assert_eq!(get_number_if_positive(Some(&json!("5.99"))), Some(5.99));
/// assert_eq!(get_number_if_positive(Some(&json!(-1))), None);
/// ```
#[must_use]
pub fn get_number_if_positive(value: Option<&Value>) -> Option<f64> {
    get_number_if_valid(value).filter(|n| *n > 0.0)
}

/// Coerce a field to a boolean, falling back to `default`.
///
/// Accepts JSON booleans and the exact strings `"true"` and `"false"`.
#[must_use]
pub fn get_boolean_if_valid(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) if s == "true" => true,
        Some(Value::String(s)) if s == "false" => false,
        _ => default,
    }
}

/// Parse an object id if the input is a valid 24-character hex string.
#[must_use]
pub fn get_object_id_if_valid(value: Option<&str>) -> Option<ObjectId> {
    value.and_then(|s| ObjectId::parse_str(s).ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_get_string() {
        assert_eq!(get_string(Some(&json!("Express"))), "Express");
        assert_eq!(get_string(Some(&json!(1.5))), "1.5");
        assert_eq!(get_string(Some(&json!(true))), "true");
        assert_eq!(get_string(Some(&Value::Null)), "");
        assert_eq!(get_string(Some(&json!(["a"]))), "");
        assert_eq!(get_string(Some(&json!({"a": 1}))), "");
        assert_eq!(get_string(None), "");
    }

    #[test]
    fn test_get_number_if_valid() {
        assert_eq!(get_number_if_valid(Some(&json!(3))), Some(3.0));
        assert_eq!(get_number_if_valid(Some(&json!(-2.5))), Some(-2.5));
        assert_eq!(get_number_if_valid(Some(&json!(" 7.25 "))), Some(7.25));
        assert_eq!(get_number_if_valid(Some(&json!(0))), None);
        assert_eq!(get_number_if_valid(Some(&json!("abc"))), None);
        assert_eq!(get_number_if_valid(Some(&json!("NaN"))), None);
        assert_eq!(get_number_if_valid(Some(&json!("inf"))), None);
        assert_eq!(get_number_if_valid(Some(&json!(true))), None);
        assert_eq!(get_number_if_valid(None), None);
    }

    #[test]
    fn test_get_number_if_positive() {
        assert_eq!(get_number_if_positive(Some(&json!(5.99))), Some(5.99));
        assert_eq!(get_number_if_positive(Some(&json!("10"))), Some(10.0));
        assert_eq!(get_number_if_positive(Some(&json!(-0.01))), None);
        assert_eq!(get_number_if_positive(Some(&json!(0))), None);
        assert_eq!(get_number_if_positive(Some(&Value::Null)), None);
    }

    #[test]
    fn test_get_boolean_if_valid() {
        assert!(!get_boolean_if_valid(Some(&json!(false)), true));
        assert!(get_boolean_if_valid(Some(&json!("true")), false));
        assert!(!get_boolean_if_valid(Some(&json!("false")), true));
        assert!(get_boolean_if_valid(Some(&json!("yes")), true));
        assert!(!get_boolean_if_valid(Some(&json!(1)), false));
        assert!(get_boolean_if_valid(None, true));
    }

    #[test]
    fn test_get_object_id_if_valid() {
        let oid = get_object_id_if_valid(Some("5a1f0c2b9d3e4f5a6b7c8d9e")).unwrap();
        assert_eq!(oid.to_hex(), "5a1f0c2b9d3e4f5a6b7c8d9e");
        assert!(get_object_id_if_valid(Some("not-an-id")).is_none());
        assert!(get_object_id_if_valid(None).is_none());
    }
}
