//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pneumo_core::InferenceError;
use serde::Serialize;

pub const MISSING_IMAGE_MESSAGE: &str = "The image field is required";
pub const UNPROCESSABLE_IMAGE_MESSAGE: &str = "Could not process the image field";

/// Request-level failures. Every variant is reported as a client error.
#[derive(Debug)]
pub enum AppError {
    MissingImage,
    Unprocessable(String),
}

impl From<InferenceError> for AppError {
    fn from(e: InferenceError) -> Self {
        match e {
            InferenceError::MissingField => AppError::MissingImage,
            InferenceError::InvalidImage(details) | InferenceError::ModelFailure(details) => {
                AppError::Unprocessable(details)
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            AppError::MissingImage => ErrorResponse {
                error: MISSING_IMAGE_MESSAGE,
                details: None,
            },
            AppError::Unprocessable(details) => ErrorResponse {
                error: UNPROCESSABLE_IMAGE_MESSAGE,
                details: Some(details),
            },
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
