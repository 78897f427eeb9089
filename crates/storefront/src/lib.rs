//! Stark Storefront library.
//!
//! This crate provides the storefront HTTP surface as a library, allowing it
//! to be tested end-to-end and embedded by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request, http::Response, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(&state.config().server);

    traced(routes::routes().layer(session_layer).with_state(state))
}

/// Router used when a required configuration key is absent.
///
/// Every route except `/health` answers `503 Configuration missing: <key>`.
pub fn configuration_missing_app(key: &str) -> Router {
    let key = key.to_string();
    let unavailable = move || {
        let key = key.clone();
        async move { AppError::ConfigurationMissing(key) }
    };

    traced(
        Router::new()
            .route("/health", get(routes::health))
            .fallback(unavailable),
    )
}

/// Wrap `router` in request-id and request tracing layers.
fn traced(router: Router) -> Router {
    router
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<axum::body::Body>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
}
