//! Domain models for admin.

pub mod shipping_method;

pub use shipping_method::{
    MethodQuery, NewShippingMethod, ShippingConditions, ShippingMethod, ShippingMethodInput,
    ShippingMethodPatch,
};
