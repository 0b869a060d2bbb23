// Tests for the numeric primitives: ReLU, softmax and argmax.

use approx::assert_relative_eq;

use ferrite_digits::activation::{argmax, relu, relu_derivative, softmax};

#[test]
fn relu_zeroes_non_positive_inputs() {
    assert_eq!(relu(2.5), 2.5);
    assert_eq!(relu(0.0), 0.0);
    assert_eq!(relu(-3.0), 0.0);
    assert_eq!(relu_derivative(0.0), 0.0);
    assert_eq!(relu_derivative(-1.0), 0.0);
    assert_eq!(relu_derivative(1e-6), 1.0);
}

#[test]
fn softmax_is_a_distribution() {
    let mut scores = vec![1.0, -2.0, 0.5, 3.0, 0.0, -7.5, 2.2, 0.1, -0.3, 1.9];
    softmax(&mut scores);
    assert!(scores.iter().all(|&p| p >= 0.0));
    assert_relative_eq!(scores.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
}

#[test]
fn softmax_is_shift_invariant() {
    let base = vec![0.3f32, -1.2, 2.0, 0.0, 4.5, -0.7, 1.1, 0.9, -3.0, 2.7];
    let mut plain = base.clone();
    softmax(&mut plain);

    for c in [-20.0f32, -1.0, 1.0, 10.0, 16.0] {
        let mut shifted: Vec<f32> = base.iter().map(|x| x + c).collect();
        softmax(&mut shifted);
        for (a, b) in plain.iter().zip(shifted.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-5);
        }
    }
}

#[test]
fn softmax_handles_large_magnitudes() {
    let mut scores = vec![1000.0f32, 999.0, -1000.0];
    softmax(&mut scores);
    assert!(scores.iter().all(|p| p.is_finite()));
    assert_relative_eq!(scores.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(scores[0] / scores[1], 1.0f32.exp(), epsilon = 1e-3);
    assert_eq!(scores[2], 0.0);
}

#[test]
fn softmax_of_equal_scores_is_uniform() {
    let mut scores = vec![0.0f32; 10];
    softmax(&mut scores);
    for p in scores {
        assert_relative_eq!(p, 0.1, epsilon = 1e-7);
    }
}

#[test]
fn argmax_prefers_the_earliest_maximum() {
    let mut probs = vec![0.05f32; 10];
    probs[3] = 0.3;
    probs[7] = 0.3;
    assert_eq!(argmax(&probs), 3);

    assert_eq!(argmax(&[0.1; 10]), 0);
    assert_eq!(argmax(&[0.0, 0.2, 0.9, 0.9]), 2);
    assert_eq!(argmax(&[]), 0);
}
