use std::ops::Range;
use std::sync::{PoisonError, RwLock};
use std::time::Instant;

use rayon::prelude::*;

use crate::activation::argmax;
use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::network::backward::backward;
use crate::network::forward::forward;
use crate::network::gradients::Gradients;
use crate::network::model::Model;
use crate::optim::schedule::StepDecay;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `model` for `config.epochs` epochs and returns the mean training
/// loss of the **last** epoch.
///
/// Mini-batches of one epoch are processed in parallel. Each worker owns its
/// batch's gradient accumulator and reads the model under a shared lock; the
/// SGD update takes the exclusive lock, so exactly one batch is applied at a
/// time and no worker sees a half-applied update.
///
/// # Errors
/// - `InvalidConfig` if `batch_size == 0`, the dataset is empty, or the
///   thread pool cannot be built
/// - `ShapeMismatch` if the dataset sample length differs from the model input
/// - `InvalidDataset` if a label is outside the model's output range
pub fn train_loop(model: &mut Model, dataset: &Dataset, config: &TrainConfig) -> Result<f64> {
    validate(model, dataset, config)?;

    let pool = match config.threads {
        Some(n) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| Error::InvalidConfig(e.to_string()))?,
        ),
        None => None,
    };

    let mut schedule = StepDecay::new(config.learning_rate, config.decay_every, config.decay_factor);
    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let optimizer = Sgd::new(schedule.get_lr());

        let outcome = match &pool {
            Some(pool) => pool.install(|| run_one_epoch(model, dataset, &optimizer, config.batch_size)),
            None => run_one_epoch(model, dataset, &optimizer, config.batch_size),
        };

        let n = dataset.len() as f64;
        last_train_loss = outcome.loss_sum / n;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: last_train_loss,
            train_accuracy: outcome.correct as f64 / n,
            correct: outcome.correct,
            learning_rate: optimizer.learning_rate,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if let Some(ref tx) = config.progress_tx {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(stats);
        }

        schedule.step();
    }

    Ok(last_train_loss)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Associative per-batch tally, merged across workers.
#[derive(Debug, Default, Clone, Copy)]
struct EpochOutcome {
    correct: usize,
    loss_sum: f64,
}

impl EpochOutcome {
    fn merge(self, other: EpochOutcome) -> EpochOutcome {
        EpochOutcome {
            correct: self.correct + other.correct,
            loss_sum: self.loss_sum + other.loss_sum,
        }
    }
}

fn validate(model: &Model, dataset: &Dataset, config: &TrainConfig) -> Result<()> {
    if config.batch_size == 0 {
        return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
    }
    if dataset.is_empty() {
        return Err(Error::InvalidConfig("training set is empty".into()));
    }
    if dataset.sample_len() != model.input_size() {
        return Err(Error::ShapeMismatch {
            expected: model.input_size(),
            got: dataset.sample_len(),
        });
    }
    if let Some(&label) = dataset
        .labels()
        .iter()
        .find(|&&label| label as usize >= model.output_size())
    {
        return Err(Error::InvalidDataset(format!(
            "label {} is out of range for {} output classes",
            label,
            model.output_size()
        )));
    }
    Ok(())
}

/// Runs one full epoch of parallel mini-batch SGD in dataset order.
fn run_one_epoch(
    model: &mut Model,
    dataset: &Dataset,
    optimizer: &Sgd,
    batch_size: usize,
) -> EpochOutcome {
    let n = dataset.len();
    let shared = RwLock::new(model);
    let batch_starts: Vec<usize> = (0..n).step_by(batch_size).collect();

    // One batch per task so idle workers pull the next unprocessed batch.
    batch_starts
        .par_iter()
        .with_max_len(1)
        .map(|&start| {
            let batch = start..(start + batch_size).min(n);

            let (grads, outcome) = {
                let model = shared.read().unwrap_or_else(PoisonError::into_inner);
                accumulate_batch(&**model, dataset, batch)
            };

            let mut model = shared.write().unwrap_or_else(PoisonError::into_inner);
            // A trailing partial batch is still divided by the nominal size.
            optimizer.step(&mut **model, &grads, batch_size);
            outcome
        })
        .reduce(EpochOutcome::default, EpochOutcome::merge)
}

/// Forward + backward over one batch into a fresh accumulator.
fn accumulate_batch(model: &Model, dataset: &Dataset, batch: Range<usize>) -> (Gradients, EpochOutcome) {
    let mut grads = Gradients::zeros_for(model);
    let mut outcome = EpochOutcome::default();

    for idx in batch {
        let (Some(input), Some(label)) = (dataset.normalized(idx), dataset.label(idx)) else {
            continue;
        };
        let label = label as usize;

        let result = forward(model, input);
        if argmax(&result.probabilities) == label {
            outcome.correct += 1;
        }
        outcome.loss_sum += CrossEntropyLoss::loss(&result.probabilities, label) as f64;

        backward(model, input, &result, label, &mut grads);
    }

    (grads, outcome)
}
