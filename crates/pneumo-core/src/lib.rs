//! Core domain types for the pneumo classifier service.
//!
//! This crate holds everything the HTTP layer and the model backend share:
//!
//! - [`Classifier`] — the capability a loaded model provides
//! - [`ImageTensor`] and [`preprocess`] — turning uploaded bytes into model input
//! - [`Prediction`] and [`Label`] — the argmax decision over class scores
//! - [`InferenceError`] — the per-request error taxonomy
//! - [`ModelSummary`] and [`Hyperparameters`] — static records about the deployed model
//!
//! # Example
//!
//! ```rust
//! use pneumo_core::{Label, Prediction};
//!
//! let prediction = Prediction::from_scores(vec![0.27, 0.73]).unwrap();
//! assert_eq!(prediction.prediction, Label::Pneumonia);
//! assert_eq!(prediction.probabilities, vec![0.27, 0.73]);
//! ```

mod card;
mod preprocess;

pub use card::{Hyperparameters, ModelSummary};
pub use preprocess::{preprocess, ImageTensor, INPUT_CHANNELS, INPUT_HEIGHT, INPUT_WIDTH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of classes the deployed model scores.
pub const NUM_CLASSES: usize = 2;

/// Errors that can occur while serving a single inference request.
///
/// `InvalidImage` and `ModelFailure` carry the detail message reported to the
/// client; the HTTP layer does not distinguish them by status code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The upload field was not present in the request.
    #[error("The image field is required")]
    MissingField,

    /// The uploaded bytes could not be decoded or resized.
    #[error("{0}")]
    InvalidImage(String),

    /// The model rejected the input or produced unusable output.
    #[error("{0}")]
    ModelFailure(String),
}

/// A loaded model that maps a preprocessed image to class scores.
///
/// Implementations are shared across concurrent requests and must be safe to
/// call from several threads at once.
pub trait Classifier: Send + Sync {
    /// Runs the model on a single `(1, 150, 150, 3)` tensor.
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError>;
}

/// Diagnosis label derived from the class scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Normal,
    Pneumonia,
}

impl Label {
    /// Maps a class index to its label. Index 1 is pneumonia, anything else normal.
    pub fn from_class_index(index: usize) -> Self {
        match index {
            1 => Label::Pneumonia,
            _ => Label::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Normal => "normal",
            Label::Pneumonia => "pneumonia",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Label chosen by argmax over `probabilities`.
    pub prediction: Label,
    /// Raw model output, index 0 = normal, index 1 = pneumonia.
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Builds a prediction from the raw model output.
    ///
    /// Scores are passed through unchanged. Output that does not hold exactly
    /// [`NUM_CLASSES`] values is reported as a model failure.
    pub fn from_scores(scores: Vec<f32>) -> Result<Self, InferenceError> {
        if scores.len() != NUM_CLASSES {
            return Err(InferenceError::ModelFailure(format!(
                "expected {} class scores, model returned {}",
                NUM_CLASSES,
                scores.len()
            )));
        }

        let index = argmax(&scores).unwrap_or(0);
        Ok(Self {
            prediction: Label::from_class_index(index),
            probabilities: scores,
        })
    }
}

/// Index of the largest score. The first occurrence wins on ties.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;
    let mut best = (0, *first);
    for (i, &score) in rest.iter().enumerate() {
        if score > best.1 {
            best = (i + 1, score);
        }
    }
    Some(best.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_largest() {
        assert_eq!(argmax(&[0.1, 0.9]), Some(1));
        assert_eq!(argmax(&[0.6, 0.4]), Some(0));
        assert_eq!(argmax(&[0.2, 0.1, 0.7]), Some(2));
    }

    #[test]
    fn test_argmax_first_occurrence_wins_on_tie() {
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
        assert_eq!(argmax(&[0.1, 0.45, 0.45]), Some(1));
    }

    #[test]
    fn test_argmax_empty() {
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_label_from_class_index() {
        assert_eq!(Label::from_class_index(0), Label::Normal);
        assert_eq!(Label::from_class_index(1), Label::Pneumonia);
        assert_eq!(Label::from_class_index(7), Label::Normal);
    }

    #[test]
    fn test_prediction_from_scores() {
        let p = Prediction::from_scores(vec![0.9, 0.1]).unwrap();
        assert_eq!(p.prediction, Label::Normal);

        let p = Prediction::from_scores(vec![0.3, 0.7]).unwrap();
        assert_eq!(p.prediction, Label::Pneumonia);
        assert_eq!(p.probabilities, vec![0.3, 0.7]);
    }

    #[test]
    fn test_prediction_tie_is_normal() {
        let p = Prediction::from_scores(vec![0.5, 0.5]).unwrap();
        assert_eq!(p.prediction, Label::Normal);
    }

    #[test]
    fn test_prediction_rejects_wrong_class_count() {
        let err = Prediction::from_scores(vec![0.8]).unwrap_err();
        assert_eq!(
            err,
            InferenceError::ModelFailure("expected 2 class scores, model returned 1".into())
        );
        assert!(Prediction::from_scores(vec![]).is_err());
        assert!(Prediction::from_scores(vec![0.1, 0.2, 0.7]).is_err());
    }

    #[test]
    fn test_prediction_serializes_flat_probabilities() {
        let p = Prediction::from_scores(vec![0.25, 0.75]).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "prediction": "pneumonia", "probabilities": [0.25, 0.75] })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(InferenceError::MissingField.to_string(), "The image field is required");
        assert_eq!(InferenceError::InvalidImage("bad header".into()).to_string(), "bad header");
    }
}
