//! Shopdesk Core - Shared types library.
//!
//! This crate provides common types used across all Shopdesk components:
//! - `admin` - Admin API service backed by the document store
//! - `cli` - Command-line tools for managing store data
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs
//! - [`parse`] - Lenient coercion of loosely-typed JSON input fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod parse;
pub mod types;

pub use bson;
pub use types::*;
