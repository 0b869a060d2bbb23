pub mod matrix;

pub use matrix::{dot_from, Matrix};
