/// Step decay of the learning rate across epochs.
///
/// After every epoch whose 0-based index is a multiple of `every`, the rate is
/// multiplied by `factor`. With `every = 20` that happens after epochs 0, 20,
/// 40, ... so epoch 1 already trains at `initial * factor`.
#[derive(Debug, Clone)]
pub struct StepDecay {
    initial_lr: f32,
    lr: f32,
    epoch: usize,
    every: usize,
    factor: f32,
}

impl StepDecay {
    pub fn new(initial_lr: f32, every: usize, factor: f32) -> StepDecay {
        StepDecay {
            initial_lr,
            lr: initial_lr,
            epoch: 0,
            every,
            factor,
        }
    }

    /// Learning rate for the current epoch.
    pub fn get_lr(&self) -> f32 {
        self.lr
    }

    /// Marks the current epoch finished and decays the rate if it is due.
    pub fn step(&mut self) {
        if self.every > 0 && self.epoch % self.every == 0 {
            self.lr *= self.factor;
        }
        self.epoch += 1;
    }

    pub fn reset(&mut self) {
        self.lr = self.initial_lr;
        self.epoch = 0;
    }
}
