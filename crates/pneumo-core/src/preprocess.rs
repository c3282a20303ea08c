//! Image decoding and resizing into the model's input tensor.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageReader, RgbImage};
use tracing::debug;

use crate::InferenceError;

/// Width in pixels the model was trained on.
pub const INPUT_WIDTH: u32 = 150;
/// Height in pixels the model was trained on.
pub const INPUT_HEIGHT: u32 = 150;
/// RGB.
pub const INPUT_CHANNELS: usize = 3;

// Bicubic, matching the training pipeline's default resampling.
const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// A single RGB image laid out as `(1, height, width, channels)` with raw
/// 8-bit pixel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTensor {
    data: Vec<u8>,
}

impl ImageTensor {
    pub const SHAPE: [usize; 4] = [1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, INPUT_CHANNELS];

    /// Wraps an already resized RGB image.
    pub fn from_rgb(image: RgbImage) -> Result<Self, InferenceError> {
        if image.dimensions() != (INPUT_WIDTH, INPUT_HEIGHT) {
            let (w, h) = image.dimensions();
            return Err(InferenceError::InvalidImage(format!(
                "expected a {}x{} image, got {}x{}",
                INPUT_WIDTH, INPUT_HEIGHT, w, h
            )));
        }
        Ok(Self { data: image.into_raw() })
    }

    pub fn shape(&self) -> [usize; 4] {
        Self::SHAPE
    }

    /// Pixel values in NHWC order.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Pixel values widened to `f32` without rescaling.
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&v| f32::from(v)).collect()
    }
}

/// Decodes uploaded bytes and reshapes them into the model's input tensor.
///
/// Any raster format the `image` crate recognises is accepted. The image is
/// converted to RGB (alpha dropped, grayscale expanded) and resized to
/// 150x150. Pixel values are not normalized.
pub fn preprocess(bytes: &[u8]) -> Result<ImageTensor, InferenceError> {
    let decoded = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| InferenceError::InvalidImage(e.to_string()))?
        .decode()
        .map_err(|e| InferenceError::InvalidImage(e.to_string()))?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(InferenceError::InvalidImage("image has no pixels".into()));
    }

    debug!(
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "Decoded upload"
    );

    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, INPUT_WIDTH, INPUT_HEIGHT, RESAMPLE_FILTER);
    ImageTensor::from_rgb(resized)
}
