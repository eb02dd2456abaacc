//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers around the
//! document store's 12-byte object id. Wrappers prevent accidentally mixing
//! IDs from different entity types, and their string form is always the
//! 24-character lowercase hex encoding.

/// Errors that can occur when parsing an entity ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is not a 24-character hexadecimal string.
    #[error("invalid identifier: {0:?}")]
    Invalid(String),
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `bson::oid::ObjectId` with:
/// - `Serialize`/`Deserialize` as the 24-char hex string
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `parse()`, `is_valid()`, `generate()`, `as_object_id()`
/// - `From<ObjectId>` and `Into<ObjectId>` implementations
///
/// # Example
///
/// ```rust
/// # use shopdesk_core::define_id;
/// define_id!(ZoneId);
/// define_id!(CarrierId);
///
/// let zone_id = ZoneId::parse("5a1f0c2b9d3e4f5a6b7c8d9e").unwrap();
/// assert_eq!(zone_id.to_string(), "5a1f0c2b9d3e4f5a6b7c8d9e");
///
/// // These are different types, so this won't compile:
/// // let _: CarrierId = zone_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name($crate::bson::oid::ObjectId);

        impl $name {
            /// Create an ID from an existing object id.
            #[must_use]
            pub const fn new(id: $crate::bson::oid::ObjectId) -> Self {
                Self(id)
            }

            /// Generate a fresh, unique ID.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::bson::oid::ObjectId::new())
            }

            /// Parse an ID from its 24-character hex form.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Invalid` if the input is not exactly 24 hex digits.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::IdError> {
                $crate::bson::oid::ObjectId::parse_str(s)
                    .map(Self)
                    .map_err(|_| $crate::IdError::Invalid(s.to_owned()))
            }

            /// Returns true if `s` is a syntactically valid ID.
            #[must_use]
            pub fn is_valid(s: &str) -> bool {
                Self::parse(s).is_ok()
            }

            /// Get the underlying object id.
            #[must_use]
            pub const fn as_object_id(&self) -> $crate::bson::oid::ObjectId {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0.to_hex())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$crate::bson::oid::ObjectId> for $name {
            fn from(id: $crate::bson::oid::ObjectId) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $crate::bson::oid::ObjectId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

// Define standard entity IDs
define_id!(ShippingMethodId);
