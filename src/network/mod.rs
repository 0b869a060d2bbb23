pub mod backward;
pub mod forward;
pub mod gradients;
pub mod inference;
pub mod model;
pub mod snapshot;

pub use backward::backward;
pub use forward::{forward, forward_pixels, normalize, ForwardResult};
pub use gradients::Gradients;
pub use inference::{predict, predict_normalized, Prediction};
pub use model::{Model, HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE};
pub use snapshot::{snapshot_len, SNAPSHOT_LEN};
