use serde::{Deserialize, Serialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean cross-entropy loss over all samples in this epoch.
    pub train_loss: f64,
    /// Fraction of samples whose argmax matched the label while training, in [0, 1].
    pub train_accuracy: f64,
    /// Number of correctly classified samples this epoch.
    pub correct: usize,
    /// Learning rate used for every update in this epoch.
    pub learning_rate: f32,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
