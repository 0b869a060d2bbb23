//! Single-image sources for inference.
//!
//! Decodes PGM (binary or ASCII PNM) as well as PNG/JPEG/BMP/GIF into the
//! 784-byte grayscale buffer the inference path consumes. Images are not
//! resized: anything other than 28×28 is rejected.

use std::path::Path;

use image::DynamicImage;

use crate::error::{Error, Result};

/// Required width and height of a single input image.
pub const IMAGE_SIDE: u32 = 28;

/// Reads an image file and returns its 28×28 grayscale pixels, row-major.
///
/// The format is detected from the file contents, so a `.pgm` with a
/// misleading extension still decodes.
pub fn load_grayscale_28<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let img = image::io::Reader::open(path)?.with_guessed_format()?.decode()?;
    to_grayscale_28(img)
}

/// Same as [`load_grayscale_28`] for image bytes already in memory.
pub fn decode_grayscale_28(bytes: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)?;
    to_grayscale_28(img)
}

fn to_grayscale_28(img: DynamicImage) -> Result<Vec<u8>> {
    let (width, height) = (img.width(), img.height());
    if width != IMAGE_SIDE || height != IMAGE_SIDE {
        return Err(Error::ImageDimensions { width, height });
    }
    Ok(img.to_luma8().into_raw())
}
