//! Inference pipeline: decode, preprocess, run the model, apply the decision rule.

use std::sync::Arc;

use axum::body::Bytes;
use pneumo_core::{preprocess, Classifier, InferenceError, Prediction};

/// Classifies raw image bytes with the given model.
pub fn classify(classifier: &dyn Classifier, bytes: &[u8]) -> Result<Prediction, InferenceError> {
    let tensor = preprocess(bytes)?;
    let scores = classifier.predict(&tensor)?;
    Prediction::from_scores(scores)
}

/// Runs [`classify`] on the blocking thread pool.
pub async fn classify_blocking(
    classifier: Arc<dyn Classifier>,
    bytes: Bytes,
) -> Result<Prediction, InferenceError> {
    tokio::task::spawn_blocking(move || classify(classifier.as_ref(), &bytes))
        .await
        .map_err(|e| InferenceError::ModelFailure(e.to_string()))?
}
