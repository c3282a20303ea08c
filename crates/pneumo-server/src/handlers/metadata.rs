//! Static model metadata handlers.

use axum::Json;
use pneumo_core::{Hyperparameters, ModelSummary};

/// GET /summary - Describe the deployed model.
pub async fn summary() -> Json<ModelSummary> {
    Json(ModelSummary::deployed())
}

/// GET /best-hyperparameters - Training configuration of the deployed model.
pub async fn best_hyperparameters() -> Json<Hyperparameters> {
    Json(Hyperparameters::best())
}
