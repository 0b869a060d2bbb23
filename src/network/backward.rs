use crate::activation::relu_derivative;
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::network::forward::ForwardResult;
use crate::network::gradients::Gradients;
use crate::network::model::Model;

/// Softmax + cross-entropy backprop for one sample.
///
/// Adds this sample's gradients into `grads`; the model itself is only read.
/// `input` must be the same normalized vector the forward pass consumed.
///
/// - output delta: `d_out[j] = p[j] - 1{j == label}`
/// - hidden delta: `d_h[j] = sum_k d_out[k] * w2[k][j]`, masked to zero where
///   the pre-activation was `<= 0`
pub fn backward(
    model: &Model,
    input: &[f32],
    result: &ForwardResult,
    label: usize,
    grads: &mut Gradients,
) {
    let output_size = model.output_size();
    assert!(label < output_size, "backward: label {} out of range", label);
    debug_assert_eq!(input.len(), model.input_size());

    let d_out = CrossEntropyLoss::derivative(&result.probabilities, label);

    for (j, &delta) in d_out.iter().enumerate() {
        grads.b2[j] += delta;
        for (g, &h) in grads.w2.row_mut(j).iter_mut().zip(result.hidden.iter()) {
            *g += delta * h;
        }
    }

    for j in 0..model.hidden_size() {
        if relu_derivative(result.pre_hidden[j]) == 0.0 {
            continue;
        }
        let mut d_h = 0.0f32;
        for (k, &delta) in d_out.iter().enumerate() {
            d_h += delta * model.w2.get(k, j);
        }
        grads.b1[j] += d_h;
        for (g, &x) in grads.w1.row_mut(j).iter_mut().zip(input.iter()) {
            *g += d_h * x;
        }
    }
}
