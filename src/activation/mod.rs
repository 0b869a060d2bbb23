pub mod activation;

pub use activation::{argmax, relu, relu_derivative, softmax};
