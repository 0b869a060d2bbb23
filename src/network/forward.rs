use crate::activation::{relu, softmax};
use crate::math::matrix::dot_from;
use crate::network::model::Model;

/// Everything one forward pass produces for a single sample.
///
/// `pre_hidden` is kept so the backward pass can apply the ReLU mask on the
/// pre-activation; `logits` are the output scores before softmax.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResult {
    pub pre_hidden: Vec<f32>,
    pub hidden: Vec<f32>,
    pub logits: Vec<f32>,
    pub probabilities: Vec<f32>,
}

/// Scales raw 0-255 intensities to [0, 1].
pub fn normalize(pixels: &[u8]) -> Vec<f32> {
    pixels.iter().map(|&p| p as f32 / 255.0).collect()
}

/// Forward pass over an already-normalized input vector.
///
/// # Panics
/// Panics if `input.len()` differs from the model's input size.
pub fn forward(model: &Model, input: &[f32]) -> ForwardResult {
    assert_eq!(
        input.len(),
        model.input_size(),
        "forward: input length does not match model input size"
    );

    let hidden_size = model.hidden_size();
    let mut pre_hidden = Vec::with_capacity(hidden_size);
    let mut hidden = Vec::with_capacity(hidden_size);
    for j in 0..hidden_size {
        let z = dot_from(model.b1[j], model.w1.row(j), input);
        pre_hidden.push(z);
        hidden.push(relu(z));
    }

    let logits: Vec<f32> = (0..model.output_size())
        .map(|j| dot_from(model.b2[j], model.w2.row(j), &hidden))
        .collect();

    let mut probabilities = logits.clone();
    softmax(&mut probabilities);

    ForwardResult {
        pre_hidden,
        hidden,
        logits,
        probabilities,
    }
}

/// Forward pass straight from a raw pixel buffer.
pub fn forward_pixels(model: &Model, pixels: &[u8]) -> ForwardResult {
    forward(model, &normalize(pixels))
}
