//! HTTP server exposing the pneumonia classifier.
//!
//! Routes:
//!
//! - `GET /summary` — static model description
//! - `POST /inference` — classify a multipart `image` upload
//! - `GET /best-hyperparameters` — training configuration
//! - `GET /health` — liveness probe

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::ServerState;

/// Builds the application router around an already loaded classifier.
pub fn router(state: Arc<ServerState>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/summary", get(handlers::metadata::summary))
        .route("/inference", post(handlers::inference::classify))
        .route(
            "/best-hyperparameters",
            get(handlers::metadata::best_hyperparameters),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
