//! Shopdesk Admin library.
//!
//! This crate provides the admin API as a library, allowing it to be tested
//! and reused by the CLI.
//!
//! # Layers
//!
//! - [`routes`] - axum handlers mapping HTTP to service calls
//! - [`services`] - validation, normalization and store orchestration
//! - [`db`] - collection-style store over `MongoDB` (or memory, for tests)
//! - [`models`] - shipping method types and input normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
