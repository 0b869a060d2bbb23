use rand::Rng;

use crate::math::matrix::Matrix;

/// Number of pixels in a 28×28 input image.
pub const INPUT_SIZE: usize = 784;
/// Number of ReLU units in the hidden layer.
pub const HIDDEN_SIZE: usize = 128;
/// Number of output classes (digits 0-9).
pub const OUTPUT_SIZE: usize = 10;

/// Trained parameters of the two-layer perceptron.
///
/// Shape: `w1` is hidden×input, `b1` has `hidden` entries, `w2` is
/// output×hidden and `b2` has `output` entries. The shape is fixed when the
/// model is built and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub w1: Matrix,
    pub b1: Vec<f32>,
    pub w2: Matrix,
    pub b2: Vec<f32>,
}

impl Model {
    /// Freshly He-initialized production model (784 → 128 → 10).
    pub fn new() -> Model {
        Model::he_with_rng(INPUT_SIZE, HIDDEN_SIZE, OUTPUT_SIZE, &mut rand::thread_rng())
    }

    /// All-zero model of the given shape.
    pub fn with_shape(input: usize, hidden: usize, output: usize) -> Model {
        Model {
            w1: Matrix::zeros(hidden, input),
            b1: vec![0.0; hidden],
            w2: Matrix::zeros(output, hidden),
            b2: vec![0.0; output],
        }
    }

    /// He-uniform weights scaled by each layer's fan-in, zero biases.
    pub fn he_with_rng<R: Rng + ?Sized>(
        input: usize,
        hidden: usize,
        output: usize,
        rng: &mut R,
    ) -> Model {
        Model {
            w1: Matrix::he_uniform(hidden, input, rng),
            b1: vec![0.0; hidden],
            w2: Matrix::he_uniform(output, hidden, rng),
            b2: vec![0.0; output],
        }
    }

    pub fn input_size(&self) -> usize {
        self.w1.cols
    }

    pub fn hidden_size(&self) -> usize {
        self.w1.rows
    }

    pub fn output_size(&self) -> usize {
        self.w2.rows
    }

    /// Total number of scalar parameters.
    pub fn parameter_count(&self) -> usize {
        self.w1.data.len() + self.b1.len() + self.w2.data.len() + self.b2.len()
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new()
    }
}
