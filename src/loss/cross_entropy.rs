/// Categorical cross-entropy for a softmax output and an integer class label.
pub struct CrossEntropyLoss;

/// Small epsilon added inside log() to prevent log(0) = -inf.
const EPS: f32 = 1e-12;

impl CrossEntropyLoss {
    /// Scalar loss `-log(p[label] + eps)`.
    ///
    /// `probabilities` : softmax output, shape [n_classes]
    /// `label`         : index of the true class
    pub fn loss(probabilities: &[f32], label: usize) -> f32 {
        -(probabilities[label] + EPS).ln()
    }

    /// Gradient of softmax + cross-entropy w.r.t. the logits:
    ///   ∂L/∂z_j = p_j - 1{j == label}
    pub fn derivative(probabilities: &[f32], label: usize) -> Vec<f32> {
        probabilities
            .iter()
            .enumerate()
            .map(|(j, &p)| if j == label { p - 1.0 } else { p })
            .collect()
    }
}
