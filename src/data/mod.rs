pub mod dataset;
pub mod idx;
pub mod image;

pub use dataset::Dataset;
pub use idx::{load_idx_pair, parse_idx_pair};
pub use self::image::{decode_grayscale_28, load_grayscale_28, IMAGE_SIDE};
