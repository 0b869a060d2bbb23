/// ReLU: `x` when strictly positive, otherwise `0`.
pub fn relu(x: f32) -> f32 {
    if x > 0.0 { x } else { 0.0 }
}

/// Derivative of ReLU evaluated at the pre-activation `x`.
///
/// Zero at `x == 0`, so a unit sitting exactly on the hinge passes no gradient.
pub fn relu_derivative(x: f32) -> f32 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

/// In-place softmax with max subtraction.
///
/// Subtracting the largest score before exponentiating keeps `exp()` in
/// range for large logits and leaves the result unchanged, since softmax is
/// invariant to adding a constant to every input.
pub fn softmax(scores: &mut [f32]) {
    if scores.is_empty() {
        return;
    }
    let mut max = scores[0];
    for &value in scores.iter().skip(1) {
        if value > max {
            max = value;
        }
    }

    let mut sum = 0.0f32;
    for value in scores.iter_mut() {
        *value = (*value - max).exp();
        sum += *value;
    }
    for value in scores.iter_mut() {
        *value /= sum;
    }
}

/// Index of the largest value; the earliest index wins ties.
///
/// Returns `0` for an empty slice.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for i in 1..values.len() {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}
