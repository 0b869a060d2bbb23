use crate::error::{Error, Result};
use crate::network::forward::normalize;

/// Ordered, immutable collection of labelled samples.
///
/// Raw bytes are kept for display; the normalized `f32` copy is built once
/// here so the training loop never re-divides by 255.
#[derive(Debug, Clone)]
pub struct Dataset {
    sample_len: usize,
    images: Vec<u8>,
    labels: Vec<u8>,
    normalized: Vec<f32>,
}

impl Dataset {
    /// Builds a dataset from `labels.len()` contiguous samples of
    /// `sample_len` bytes each.
    pub fn new(images: Vec<u8>, labels: Vec<u8>, sample_len: usize) -> Result<Dataset> {
        if sample_len == 0 {
            return Err(Error::InvalidDataset("sample length must be at least 1".into()));
        }
        if images.len() != labels.len() * sample_len {
            return Err(Error::InvalidDataset(format!(
                "{} image bytes do not hold {} samples of {} bytes",
                images.len(),
                labels.len(),
                sample_len
            )));
        }
        let normalized = normalize(&images);
        Ok(Dataset {
            sample_len,
            images,
            labels,
            normalized,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn sample_len(&self) -> usize {
        self.sample_len
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Raw 0-255 pixels of sample `index`, or `None` when out of range.
    pub fn image(&self, index: usize) -> Option<&[u8]> {
        if index >= self.len() {
            return None;
        }
        Some(&self.images[index * self.sample_len..(index + 1) * self.sample_len])
    }

    pub fn label(&self, index: usize) -> Option<u8> {
        self.labels.get(index).copied()
    }

    /// Pixels of sample `index` scaled to [0, 1].
    pub fn normalized(&self, index: usize) -> Option<&[f32]> {
        if index >= self.len() {
            return None;
        }
        Some(&self.normalized[index * self.sample_len..(index + 1) * self.sample_len])
    }
}
