pub mod schedule;
pub mod sgd;

pub use schedule::StepDecay;
pub use sgd::Sgd;
