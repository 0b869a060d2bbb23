use crate::network::gradients::Gradients;
use crate::network::model::Model;

pub struct Sgd {
    pub learning_rate: f32,
}

impl Sgd {
    pub fn new(learning_rate: f32) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one batch update: `param -= lr * grad / batch_size`.
    ///
    /// `grads` holds the summed gradients of the batch. The trainer passes the
    /// configured batch size even for a shorter final batch.
    pub fn step(&self, model: &mut Model, grads: &Gradients, batch_size: usize) {
        let factor = self.learning_rate / batch_size as f32;
        model.w1.sub_scaled(&grads.w1, factor);
        model.w2.sub_scaled(&grads.w2, factor);
        for (b, g) in model.b1.iter_mut().zip(grads.b1.iter()) {
            *b -= factor * g;
        }
        for (b, g) in model.b2.iter_mut().zip(grads.b2.iter()) {
            *b -= factor * g;
        }
    }
}
