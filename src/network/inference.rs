use serde::{Deserialize, Serialize};

use crate::activation::argmax;
use crate::error::{Error, Result};
use crate::network::forward::{forward, normalize};
use crate::network::model::Model;

/// Classification of a single sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Argmax of `probabilities`; the lowest index wins ties.
    pub class: usize,
    /// Softmax output, one entry per class, summing to 1.
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Probability assigned to the predicted class.
    pub fn confidence(&self) -> f32 {
        self.probabilities[self.class]
    }
}

/// Classifies one raw pixel buffer (0-255 per pixel).
///
/// Rejects buffers whose length is not the model's input size.
pub fn predict(model: &Model, pixels: &[u8]) -> Result<Prediction> {
    check_len(model, pixels.len())?;
    Ok(classify(model, &normalize(pixels)))
}

/// Same as [`predict`] for an input already scaled to [0, 1].
pub fn predict_normalized(model: &Model, input: &[f32]) -> Result<Prediction> {
    check_len(model, input.len())?;
    Ok(classify(model, input))
}

fn check_len(model: &Model, got: usize) -> Result<()> {
    if got != model.input_size() {
        return Err(Error::ShapeMismatch {
            expected: model.input_size(),
            got,
        });
    }
    Ok(())
}

fn classify(model: &Model, input: &[f32]) -> Prediction {
    let result = forward(model, input);
    Prediction {
        class: argmax(&result.probabilities),
        probabilities: result.probabilities,
    }
}
