use ndarray::{Array2, ArrayView2};
use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::ops::{Index, IndexMut};

use crate::error::LossError;

/// Dense row-major matrix of `f64`.
///
/// Entry `(i, j)` lives at `data[i * cols + j]`.
/// Deserialization goes through [`Matrix::from_vec`], so a buffer that does
/// not hold `rows * cols` values is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = LossError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Matrix::from_vec(raw.rows, raw.cols, raw.data)
    }
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // Both uniforms in (0, 1] so ln() never sees 0.
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Gaussian samples from N(0, std_dev²).
    ///
    /// Small `std_dev` (e.g. 1e-4) gives the near-uniform class scores a
    /// freshly initialized linear classifier starts from.
    pub fn randn<R: Rng + ?Sized>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let data = (0..rows * cols)
            .map(|_| Matrix::sample_standard_normal(rng) * std_dev)
            .collect();
        Matrix { rows, cols, data }
    }

    /// Builds a matrix from nested rows. All rows must share one length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix, LossError> {
        let rows = data.len();
        let cols = data.first().ok_or(LossError::EmptyMatrix)?.len();
        if data.iter().any(|row| row.len() != cols) {
            return Err(LossError::RaggedRows);
        }
        Ok(Matrix {
            rows,
            cols,
            data: data.into_iter().flatten().collect(),
        })
    }

    /// Wraps a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix, LossError> {
        if data.len() != rows * cols {
            return Err(LossError::LengthMismatch { rows, cols, found: data.len() });
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Triple-loop product `self · rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix, LossError> {
        if self.cols != rhs.rows {
            return Err(LossError::DimensionMismatch {
                context: "matmul inner dimension",
                expected: self.cols,
                found: rhs.rows,
            });
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self[(i, k)] * rhs[(k, j)];
                }

                res[(i, j)] = sum;
            }
        }

        Ok(res)
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Sum of squared entries, i.e. `sum(W ⊙ W)`.
    pub fn sum_squares(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum()
    }

    pub fn scale(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|x| *x *= factor);
    }

    /// `self += alpha * other`, element-wise.
    pub fn add_scaled(&mut self, alpha: f64, other: &Matrix) -> Result<(), LossError> {
        if self.shape() != other.shape() {
            return Err(LossError::DimensionMismatch {
                context: "add_scaled element count",
                expected: self.data.len(),
                found: other.data.len(),
            });
        }
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += alpha * b;
        }
        Ok(())
    }

    /// Largest element-wise absolute difference. Infinite when shapes differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        if self.shape() != other.shape() {
            return f64::INFINITY;
        }
        self.data.iter().zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Zero-copy ndarray view over the same buffer.
    pub fn view(&self) -> Result<ArrayView2<'_, f64>, LossError> {
        Ok(ArrayView2::from_shape((self.rows, self.cols), &self.data)?)
    }
}

impl From<Array2<f64>> for Matrix {
    fn from(array: Array2<f64>) -> Self {
        let (rows, cols) = array.dim();
        // iter() walks in logical row-major order whatever the memory layout.
        let data = array.iter().copied().collect();
        Matrix { rows, cols, data }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}
