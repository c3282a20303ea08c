//! ONNX model backend for pneumo.
//!
//! [`OnnxClassifier`] loads the exported network once with `tract-onnx`,
//! pins its input to `f32[1, 150, 150, 3]`, and runs it for every request.

use std::path::{Path, PathBuf};

use pneumo_core::{Classifier, ImageTensor, InferenceError};
use thiserror::Error;
use tracing::{debug, info};
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Errors raised while loading the model artifact at startup.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("model artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load model from {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },
}

/// Classifier backed by an optimized tract plan.
pub struct OnnxClassifier {
    plan: Plan,
}

impl OnnxClassifier {
    /// Loads and optimizes the model at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelLoadError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(ModelLoadError::Load {
                path: path.to_path_buf(),
                message: "not a regular file".into(),
            });
        }

        let plan = build_plan(path).map_err(|e| ModelLoadError::Load {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        })?;

        info!(path = %path.display(), "Loaded ONNX model");
        Ok(Self { plan })
    }
}

fn build_plan(path: &Path) -> TractResult<Plan> {
    let [batch, height, width, channels] = ImageTensor::SHAPE;
    tract_onnx::onnx()
        .model_for_path(path)?
        .with_input_fact(
            0,
            InferenceFact::dt_shape(f32::datum_type(), tvec!(batch, height, width, channels)),
        )?
        .into_optimized()?
        .into_runnable()
}

impl Classifier for OnnxClassifier {
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError> {
        let tensor = Tensor::from_shape(&input.shape(), &input.to_f32())
            .map_err(|e| InferenceError::ModelFailure(format!("{e:#}")))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| InferenceError::ModelFailure(format!("{e:#}")))?;

        let Some(first) = outputs.first() else {
            return Err(InferenceError::ModelFailure("model produced no outputs".into()));
        };

        let scores: Vec<f32> = first
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::ModelFailure(format!("{e:#}")))?
            .iter()
            .copied()
            .collect();

        debug!(?scores, "Model output");
        Ok(scores)
    }
}
