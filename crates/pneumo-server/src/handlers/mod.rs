//! HTTP route handlers for the classifier server.

pub mod inference;
pub mod metadata;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
