use thiserror::Error;

/// Every failure the library reports to its callers.
///
/// The library never prints; the studio (or any other front end) decides how
/// to present these.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// Structural problem in an IDX file pair or in a hand-built dataset.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A buffer whose length does not match the model shape.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("image must be 28x28, got {width}x{height}")]
    ImageDimensions { width: u32, height: u32 },

    /// Snapshot file length differs from the model's fixed blob size.
    #[error("snapshot size mismatch: expected {expected} bytes, got {got}")]
    SnapshotSize { expected: usize, got: usize },

    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
