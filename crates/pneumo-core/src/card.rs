//! Static records describing the deployed model.

use serde::{Deserialize, Serialize};

/// Descriptive fields returned by the summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub version: String,
    pub name: String,
    pub description: String,
    pub accuracy: f64,
}

impl ModelSummary {
    /// Summary of the model this service ships with.
    pub fn deployed() -> Self {
        Self {
            version: "v1".into(),
            name: "pneumonia-detection-cnn".into(),
            description: "A CNN that classifies chest X-ray images as normal vs. pneumonia".into(),
            accuracy: 1.0,
        }
    }
}

/// Training configuration of the deployed model, keyed the way it was reported
/// by the hyperparameter search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    #[serde(rename = "Conv blocks")]
    pub conv_blocks: u32,
    #[serde(rename = "Filters (first block)")]
    pub first_block_filters: u32,
    #[serde(rename = "Dense units")]
    pub dense_units: u32,
    #[serde(rename = "Dropout")]
    pub dropout: f64,
    #[serde(rename = "Optimizer")]
    pub optimizer: String,
    #[serde(rename = "Learning rate")]
    pub learning_rate: f64,
}

impl Hyperparameters {
    /// Best configuration found during tuning.
    pub fn best() -> Self {
        Self {
            conv_blocks: 2,
            first_block_filters: 64,
            dense_units: 192,
            dropout: 0.2,
            optimizer: "rmsprop".into(),
            learning_rate: 0.001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_json() {
        let json = serde_json::to_value(ModelSummary::deployed()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "version": "v1",
                "name": "pneumonia-detection-cnn",
                "description": "A CNN that classifies chest X-ray images as normal vs. pneumonia",
                "accuracy": 1.0
            })
        );
    }

    #[test]
    fn test_hyperparameters_json() {
        let json = serde_json::to_value(Hyperparameters::best()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Conv blocks": 2,
                "Filters (first block)": 64,
                "Dense units": 192,
                "Dropout": 0.2,
                "Optimizer": "rmsprop",
                "Learning rate": 0.001
            })
        );
    }
}
