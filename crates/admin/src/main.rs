//! Shopdesk Admin - Admin API for store management.
//!
//! This binary serves the admin API on port 3001.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `MongoDB` document store (`shippingMethods` collection)
//! - Sentry error tracking, `tracing` structured logs
//!
//! # Security
//!
//! The admin API performs no authentication of its own. Bind it to a private
//! interface (the default is 127.0.0.1) or put it behind an authenticating
//! proxy.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::borrow::Cow;
use std::time::Duration;

use axum::Router;
use axum::http::{Request, Response};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sentry::integrations::tracing as sentry_tracing;
use shopdesk_admin::config::AdminConfig;
use shopdesk_admin::db::{self, MongoShippingMethodStore};
use shopdesk_admin::routes;
use shopdesk_admin::state::AppState;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "shopdesk_admin=info,tower_http=debug";

type StartupError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AdminConfig::from_env()?;

    // Sentry must be initialized before the subscriber so the layer has a hub
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    // The driver connects lazily; readiness reports whether the server is reachable
    let database = db::connect(&config).await?;
    tracing::info!(database = %config.database_name, "MongoDB client created");

    let addr = config.socket_addr();
    let state = AppState::new(MongoShippingMethodStore::new(&database));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("admin listening on http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Initialize Sentry error tracking. The guard must outlive the server.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config.sentry_environment.clone().map(Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Install the global subscriber: JSON on Fly.io, text locally, plus Sentry.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let is_fly = std::env::var("FLY_APP_NAME").is_ok();
    let json_layer = is_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

/// Warnings and errors become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Mount the admin routes with request tracing and the Sentry layers.
fn app(state: AppState<MongoShippingMethodStore>) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                status = tracing::field::Empty,
                latency_ms = tracing::field::Empty,
            )
        })
        .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
            span.record("status", response.status().as_u16());
            span.record(
                "latency_ms",
                u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            );
            DefaultOnResponse::default().on_response(response, latency, span);
        });

    routes::routes::<MongoShippingMethodStore>()
        .layer(trace)
        .with_state(state)
        // Outermost so every request gets a hub
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
