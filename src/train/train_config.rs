use std::sync::mpsc;

use crate::train::epoch_stats::EpochStats;

/// Full passes over the training set.
pub const EPOCHS: usize = 100;
/// Samples per mini-batch.
pub const BATCH_SIZE: usize = 32;
/// Learning rate of the first epoch.
pub const LEARNING_RATE: f32 = 0.05;
/// The learning rate decays after every epoch whose 0-based index is a multiple of this.
pub const DECAY_EVERY: usize = 20;
/// Multiplier applied at each decay.
pub const DECAY_FACTOR: f32 = 0.8;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        : total number of full passes over the training data
/// - `batch_size`    : samples per mini-batch
/// - `learning_rate` : initial SGD step size
/// - `decay_every`   : epochs between learning-rate decays (0 disables decay)
/// - `decay_factor`  : multiplier applied at each decay
/// - `threads`       : worker count; `None` uses rayon's global pool
/// - `progress_tx`   : optional channel sender; one `EpochStats` is sent per
///                     completed epoch. A dropped receiver is ignored and
///                     training runs to completion.
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f32,
    pub decay_every: usize,
    pub decay_factor: f32,
    pub threads: Option<usize>,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default decay schedule, the global
    /// pool and no progress channel.
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f32) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            decay_every: DECAY_EVERY,
            decay_factor: DECAY_FACTOR,
            threads: None,
            progress_tx: None,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(EPOCHS, BATCH_SIZE, LEARNING_RATE)
    }
}
