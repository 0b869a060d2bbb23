//! Fixed-size binary model snapshots.
//!
//! Layout: `w1` (row-major), `b1`, `w2` (row-major), `b2`, every value an
//! `f32` in native byte order. There is no header, version or checksum, so a
//! snapshot written for a different shape, or one with corrupted content of
//! the right length, is accepted as-is. Only the total length is checked.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::model::{Model, HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE};

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// Byte length of a snapshot for the given shape.
pub fn snapshot_len(input: usize, hidden: usize, output: usize) -> usize {
    (hidden * input + hidden + output * hidden + output) * F32_BYTES
}

/// Byte length of a production (784 → 128 → 10) snapshot.
pub const SNAPSHOT_LEN: usize =
    (HIDDEN_SIZE * INPUT_SIZE + HIDDEN_SIZE + OUTPUT_SIZE * HIDDEN_SIZE + OUTPUT_SIZE) * F32_BYTES;

impl Model {
    /// Serializes the parameters in snapshot layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.parameter_count() * F32_BYTES);
        let sections: [&[f32]; 4] = [&self.w1.data, &self.b1, &self.w2.data, &self.b2];
        for section in sections {
            for value in section {
                out.extend_from_slice(&value.to_ne_bytes());
            }
        }
        out
    }

    /// Rebuilds a production-shaped model from snapshot bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Model> {
        Model::from_bytes_with_shape(bytes, INPUT_SIZE, HIDDEN_SIZE, OUTPUT_SIZE)
    }

    /// Rebuilds a model of an explicit shape from snapshot bytes.
    pub fn from_bytes_with_shape(
        bytes: &[u8],
        input: usize,
        hidden: usize,
        output: usize,
    ) -> Result<Model> {
        let expected = snapshot_len(input, hidden, output);
        if bytes.len() != expected {
            return Err(Error::SnapshotSize {
                expected,
                got: bytes.len(),
            });
        }

        let mut values = bytes.chunks_exact(F32_BYTES).map(|chunk| {
            f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        });
        let mut take = |n: usize| -> Vec<f32> { values.by_ref().take(n).collect() };

        let w1 = Matrix::from_data(hidden, input, take(hidden * input));
        let b1 = take(hidden);
        let w2 = Matrix::from_data(output, hidden, take(output * hidden));
        let b2 = take(output);

        Ok(Model { w1, b1, w2, b2 })
    }

    /// Writes the snapshot to `path`, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a production-shaped snapshot from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Model> {
        let bytes = fs::read(path)?;
        Model::from_bytes(&bytes)
    }

    /// Like [`Model::load`], but a missing file yields `Ok(None)`.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Model>> {
        match fs::read(path) {
            Ok(bytes) => Model::from_bytes(&bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
