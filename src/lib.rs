pub mod activation;
pub mod data;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::{argmax, softmax};
pub use data::Dataset;
pub use error::{Error, Result};
pub use loss::CrossEntropyLoss;
pub use math::matrix::Matrix;
pub use network::{
    backward, forward, forward_pixels, predict, ForwardResult, Gradients, Model, Prediction,
    HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE,
};
pub use optim::{Sgd, StepDecay};
pub use train::{train_loop, EpochStats, TrainConfig};
