//! Business logic services for admin.
//!
//! # Services
//!
//! - `shipping_methods` - Shipping method CRUD with input normalization

pub mod shipping_methods;

pub use shipping_methods::{ShippingMethodError, ShippingMethodsService};
