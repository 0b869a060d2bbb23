use crate::math::matrix::Matrix;
use crate::network::model::Model;

/// Per-batch gradient accumulator with the same shape as a [`Model`].
///
/// Created zeroed at the start of a mini-batch, summed into by the backward
/// pass for every sample, applied once, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub w1: Matrix,
    pub b1: Vec<f32>,
    pub w2: Matrix,
    pub b2: Vec<f32>,
}

impl Gradients {
    pub fn zeros_for(model: &Model) -> Gradients {
        Gradients {
            w1: Matrix::zeros(model.w1.rows, model.w1.cols),
            b1: vec![0.0; model.b1.len()],
            w2: Matrix::zeros(model.w2.rows, model.w2.cols),
            b2: vec![0.0; model.b2.len()],
        }
    }

    /// Adds another accumulator of the same shape into this one.
    pub fn accumulate(&mut self, other: &Gradients) {
        self.w1 += &other.w1;
        self.w2 += &other.w2;
        for (a, b) in self.b1.iter_mut().zip(other.b1.iter()) {
            *a += b;
        }
        for (a, b) in self.b2.iter_mut().zip(other.b2.iter()) {
            *a += b;
        }
    }

    /// Multiplies every entry by `factor`.
    pub fn scale(&mut self, factor: f32) {
        self.w1.data.iter_mut().for_each(|v| *v *= factor);
        self.w2.data.iter_mut().for_each(|v| *v *= factor);
        self.b1.iter_mut().for_each(|v| *v *= factor);
        self.b2.iter_mut().for_each(|v| *v *= factor);
    }
}
