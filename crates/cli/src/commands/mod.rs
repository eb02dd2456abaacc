//! Command implementations for `sd-cli`.
//!
//! Commands take a [`ShippingMethodsService`](shopdesk_admin::services::ShippingMethodsService)
//! so they run unchanged against `MongoDB` or the in-memory store.

pub mod seed;
pub mod shipping;

use thiserror::Error;

use shopdesk_admin::config::ConfigError;
use shopdesk_admin::db::RepositoryError;
use shopdesk_admin::services::ShippingMethodError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store connection or query failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Shipping method operation was rejected.
    #[error("{0}")]
    ShippingMethod(#[from] ShippingMethodError),

    /// Seed file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Seed file is not valid YAML.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Result could not be rendered as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Seed file content failed validation.
    #[error("Invalid seed file: {0}")]
    InvalidSeed(String),

    /// Target shipping method does not exist.
    #[error("Shipping method not found: {0}")]
    NotFound(String),
}
