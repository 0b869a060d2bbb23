use rand::Rng;
use std::ops::AddAssign;

/// Dense row-major `f32` matrix.
///
/// Rows are contiguous, so `row(i)` is a plain slice and dot products against
/// a layer's weight row stay cache friendly.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// He-uniform initialization: `(u * 2 - 1) * sqrt(2 / cols)` with `u` in [0, 1].
    ///
    /// `cols` is the fan-in (number of input connections per row).
    pub fn he_uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let scale = (2.0 / cols as f32).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for value in res.data.iter_mut() {
            *value = (rng.gen::<f32>() * 2.0 - 1.0) * scale;
        }
        res
    }

    pub fn from_data(rows: usize, cols: usize, data: Vec<f32>) -> Matrix {
        if data.len() != rows * cols {
            panic!(
                "Matrix data has {} values, expected {}x{}",
                data.len(),
                rows,
                cols
            )
        }
        Matrix { rows, cols, data }
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f32] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// `self -= factor * rhs`, element-wise.
    pub fn sub_scaled(&mut self, rhs: &Matrix, factor: f32) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }
        for (w, g) in self.data.iter_mut().zip(rhs.data.iter()) {
            *w -= factor * g;
        }
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }
        for (a, b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a += b;
        }
    }
}

/// Dot product accumulated onto `init`, summing in index order.
pub fn dot_from(init: f32, a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = init;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += x * y;
    }
    sum
}
