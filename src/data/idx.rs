//! Reader for the IDX binary format used by MNIST and its derivatives
//! (Fashion-MNIST, EMNIST, …).
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x03        (number of dimensions = 3)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x01        (number of dimensions = 1)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index in [0, n_classes)
//! ```

use std::fs;
use std::path::Path;

use crate::data::dataset::Dataset;
use crate::data::image::IMAGE_SIDE;
use crate::error::{Error, Result};

/// Reads an MNIST-style IDX image/label file pair from disk.
///
/// Unlike [`parse_idx_pair`], the image file must declare 28×28 images.
pub fn load_idx_pair<P: AsRef<Path>, Q: AsRef<Path>>(
    image_path: P,
    label_path: Q,
    n_classes: usize,
) -> Result<Dataset> {
    let image_bytes = fs::read(image_path)?;
    let label_bytes = fs::read(label_path)?;
    let side = IMAGE_SIDE as usize;
    parse_pair(&image_bytes, &label_bytes, n_classes, Some((side, side)))
}

/// Parses an in-memory IDX3 image file and IDX1 label file into a [`Dataset`].
///
/// Any image shape is accepted. Bytes past the sizes declared in the headers
/// are ignored.
pub fn parse_idx_pair(image_bytes: &[u8], label_bytes: &[u8], n_classes: usize) -> Result<Dataset> {
    parse_pair(image_bytes, label_bytes, n_classes, None)
}

fn parse_pair(
    image_bytes: &[u8],
    label_bytes: &[u8],
    n_classes: usize,
    shape: Option<(usize, usize)>,
) -> Result<Dataset> {
    // ── Image file validation ───────────────────────────────────────────────

    check_header(image_bytes, 16, 0x03, "image")?;

    let n_items = read_be_u32(image_bytes, 4);
    let rows = read_be_u32(image_bytes, 8);
    let cols = read_be_u32(image_bytes, 12);

    if let Some((want_rows, want_cols)) = shape {
        if rows != want_rows || cols != want_cols {
            return Err(invalid(format!(
                "IDX image file: images are {}×{}, expected {}×{}.",
                rows, cols, want_rows, want_cols
            )));
        }
    }

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        invalid(format!("IDX image file: rows * cols overflows (rows={}, cols={}).", rows, cols))
    })?;
    if n_pixels == 0 {
        return Err(invalid("IDX image file: images have zero pixels.".to_owned()));
    }
    let data_len = n_items.checked_mul(n_pixels).ok_or_else(|| {
        invalid(format!(
            "IDX image file: n_items * n_pixels overflows (n_items={}, n_pixels={}).",
            n_items, n_pixels
        ))
    })?;

    if image_bytes.len() - 16 < data_len {
        return Err(invalid(format!(
            "IDX image file too short: header declares {} items of {}×{} pixels \
             ({} data bytes needed after header), but file is only {} bytes total.",
            n_items,
            rows,
            cols,
            data_len,
            image_bytes.len()
        )));
    }

    // ── Label file validation ───────────────────────────────────────────────

    check_header(label_bytes, 8, 0x01, "label")?;

    let label_count = read_be_u32(label_bytes, 4);
    if label_count != n_items {
        return Err(invalid(format!(
            "IDX file mismatch: image file declares {} items but label file declares {}.",
            n_items, label_count
        )));
    }
    if label_bytes.len() - 8 < n_items {
        return Err(invalid(format!(
            "IDX label file too short: header declares {} labels but file is only {} bytes.",
            n_items,
            label_bytes.len()
        )));
    }

    let labels = label_bytes[8..8 + n_items].to_vec();
    if let Some(i) = labels.iter().position(|&class| class as usize >= n_classes) {
        return Err(invalid(format!(
            "IDX label at index {}: class index {} is out of range for n_classes={}.",
            i, labels[i], n_classes
        )));
    }

    let images = image_bytes[16..16 + data_len].to_vec();
    Dataset::new(images, labels, n_pixels)
}

fn check_header(bytes: &[u8], header_len: usize, dims: u8, kind: &str) -> Result<()> {
    if bytes.len() < header_len {
        return Err(invalid(format!(
            "IDX {} file too short: expected at least {} header bytes, got {}.",
            kind,
            header_len,
            bytes.len()
        )));
    }
    if bytes[0] != 0x00 || bytes[1] != 0x00 {
        return Err(invalid(format!(
            "IDX {} file: bytes 0-1 must be 0x00 0x00 (reserved), got 0x{:02X} 0x{:02X}.",
            kind, bytes[0], bytes[1]
        )));
    }
    if bytes[2] != 0x08 {
        return Err(invalid(format!(
            "IDX {} file: byte 2 (dtype) must be 0x08 (uint8), got 0x{:02X}.",
            kind, bytes[2]
        )));
    }
    if bytes[3] != dims {
        return Err(invalid(format!(
            "IDX {} file: byte 3 (dimensions) must be {}, got {}.",
            kind, dims, bytes[3]
        )));
    }
    Ok(())
}

fn read_be_u32(bytes: &[u8], at: usize) -> usize {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]) as usize
}

fn invalid(msg: String) -> Error {
    Error::InvalidDataset(msg)
}
