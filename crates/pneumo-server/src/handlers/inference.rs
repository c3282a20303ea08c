//! Image classification handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use pneumo_core::{InferenceError, Prediction};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::services::inference as inference_service;
use crate::ServerState;

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

/// POST /inference - Classify an uploaded chest X-ray.
pub async fn classify(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Prediction>, AppError> {
    let multipart = multipart.map_err(|e| {
        warn!("Rejected non-multipart upload: {}", e);
        AppError::MissingImage
    })?;

    let bytes = read_image_field(multipart).await.map_err(|e| {
        warn!("Failed to read image field: {}", e);
        AppError::from(e)
    })?;

    debug!(size = bytes.len(), "Received image upload");

    let prediction = inference_service::classify_blocking(state.classifier.clone(), bytes)
        .await
        .map_err(|e| {
            warn!("Failed to classify image: {}", e);
            AppError::from(e)
        })?;

    info!(
        prediction = %prediction.prediction,
        probabilities = ?prediction.probabilities,
        "Classified image"
    );
    Ok(Json(prediction))
}

/// Returns the bytes of the first file uploaded under [`IMAGE_FIELD`].
///
/// Only parts that carry a file name count as uploads; plain form values with
/// the same name are skipped. The first upload decides: an empty file name
/// means no file was chosen. A body that breaks off or exceeds the upload
/// limit is an unreadable image, not a missing one.
async fn read_image_field(mut multipart: Multipart) -> Result<Bytes, InferenceError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(InferenceError::MissingField),
            Err(e) => {
                debug!("Failed to read multipart body: {}", e);
                return Err(InferenceError::InvalidImage(e.to_string()));
            }
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        match field.file_name() {
            None => continue,
            Some("") => return Err(InferenceError::MissingField),
            Some(_) => {}
        }

        return field
            .bytes()
            .await
            .map_err(|e| InferenceError::InvalidImage(e.to_string()));
    }
}
