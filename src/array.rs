//! Array types exchanged between the table, transformation units and the mapper.
//!
//! A [`FeatureArray`] is what a column selection or a single unit yields; it
//! may be 1-D, 2-D dense, sparse, or text. A [`FeatureMatrix`] is the stacked
//! result of a whole mapper and is always 2-D and numeric.

use crate::error::{MapperError, Result};
use ndarray::{Array1, Array2, Axis};
use sprs::{CsMat, TriMat};

/// Output of a column selection or of a single transformation step.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureArray {
    /// One value per row.
    Vector(Array1<f64>),
    /// Dense `(rows, columns)` block.
    Matrix(Array2<f64>),
    /// Sparse `(rows, columns)` block in compressed row storage.
    Sparse(CsMat<f64>),
    /// One text value per row.
    Text(Array1<String>),
    /// Text `(rows, columns)` block.
    TextMatrix(Array2<String>),
}

impl FeatureArray {
    /// Number of dimensions (1 for vectors, 2 otherwise).
    pub fn ndim(&self) -> usize {
        match self {
            FeatureArray::Vector(_) | FeatureArray::Text(_) => 1,
            _ => 2,
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.shape()[0]
    }

    /// Shape as reported by the array; vectors report a single dimension.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            FeatureArray::Vector(v) => vec![v.len()],
            FeatureArray::Matrix(m) => vec![m.nrows(), m.ncols()],
            FeatureArray::Sparse(s) => vec![s.rows(), s.cols()],
            FeatureArray::Text(t) => vec![t.len()],
            FeatureArray::TextMatrix(t) => vec![t.nrows(), t.ncols()],
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, FeatureArray::Sparse(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FeatureArray::Text(_) | FeatureArray::TextMatrix(_))
    }

    /// Dense 2-D numeric copy. Vectors become a single column.
    ///
    /// # Errors
    /// `InvalidParameter` for text data, which has no numeric form.
    pub fn to_dense(&self) -> Result<Array2<f64>> {
        match self {
            FeatureArray::Vector(v) => Ok(v.clone().insert_axis(Axis(1))),
            FeatureArray::Matrix(m) => Ok(m.clone()),
            FeatureArray::Sparse(s) => Ok(sparse_to_dense(s)),
            text => Err(MapperError::InvalidParameter(format!(
                "text data of shape {:?} has no numeric form",
                text.shape()
            ))),
        }
    }

    /// 2-D text copy. A text vector becomes a single column.
    ///
    /// # Errors
    /// `InvalidParameter` for numeric data.
    pub fn to_text(&self) -> Result<Array2<String>> {
        match self {
            FeatureArray::Text(t) => Ok(t.clone().insert_axis(Axis(1))),
            FeatureArray::TextMatrix(t) => Ok(t.clone()),
            numeric => Err(MapperError::InvalidParameter(format!(
                "expected text data, got numeric data of shape {:?}",
                numeric.shape()
            ))),
        }
    }
}

impl From<Array1<f64>> for FeatureArray {
    fn from(v: Array1<f64>) -> Self {
        FeatureArray::Vector(v)
    }
}

impl From<Array2<f64>> for FeatureArray {
    fn from(m: Array2<f64>) -> Self {
        FeatureArray::Matrix(m)
    }
}

impl From<CsMat<f64>> for FeatureArray {
    fn from(s: CsMat<f64>) -> Self {
        FeatureArray::Sparse(s)
    }
}

impl From<Array1<String>> for FeatureArray {
    fn from(t: Array1<String>) -> Self {
        FeatureArray::Text(t)
    }
}

impl From<Array2<String>> for FeatureArray {
    fn from(t: Array2<String>) -> Self {
        FeatureArray::TextMatrix(t)
    }
}

/// Reshape one feature's output to two dimensions.
///
/// 2-D inputs are returned unchanged; a vector of length N (numeric or
/// text) becomes an `(N, 1)` column in the same element order.
pub fn normalize(array: FeatureArray) -> FeatureArray {
    match array {
        FeatureArray::Vector(v) => FeatureArray::Matrix(v.insert_axis(Axis(1))),
        FeatureArray::Text(t) => FeatureArray::TextMatrix(t.insert_axis(Axis(1))),
        two_dim => two_dim,
    }
}

/// Stacked output of a mapper.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureMatrix {
    Dense(Array2<f64>),
    Sparse(CsMat<f64>),
}

impl FeatureMatrix {
    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            FeatureMatrix::Dense(m) => (m.nrows(), m.ncols()),
            FeatureMatrix::Sparse(s) => (s.rows(), s.cols()),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, FeatureMatrix::Sparse(_))
    }

    /// Dense copy of the matrix.
    pub fn to_dense(&self) -> Array2<f64> {
        match self {
            FeatureMatrix::Dense(m) => m.clone(),
            FeatureMatrix::Sparse(s) => sparse_to_dense(s),
        }
    }

    /// Consume into a dense matrix.
    pub fn into_dense(self) -> Array2<f64> {
        match self {
            FeatureMatrix::Dense(m) => m,
            FeatureMatrix::Sparse(s) => sparse_to_dense(&s),
        }
    }
}

impl From<FeatureMatrix> for FeatureArray {
    fn from(m: FeatureMatrix) -> Self {
        match m {
            FeatureMatrix::Dense(d) => FeatureArray::Matrix(d),
            FeatureMatrix::Sparse(s) => FeatureArray::Sparse(s),
        }
    }
}

pub(crate) fn sparse_to_dense(s: &CsMat<f64>) -> Array2<f64> {
    let mut out = Array2::zeros((s.rows(), s.cols()));
    for (&value, (row, col)) in s.iter() {
        out[[row, col]] += value;
    }
    out
}

/// Horizontally concatenate dense 2-D blocks sharing the same row count.
pub fn hstack_dense(blocks: &[Array2<f64>]) -> Result<Array2<f64>> {
    let rows = check_rows(blocks.iter().map(|b| b.nrows()))?;
    let cols: usize = blocks.iter().map(|b| b.ncols()).sum();
    let mut out = Array2::zeros((rows, cols));
    let mut offset = 0;
    for block in blocks {
        let width = block.ncols();
        out.slice_mut(ndarray::s![.., offset..offset + width])
            .assign(block);
        offset += width;
    }
    Ok(out)
}

/// Horizontally concatenate 2-D blocks into one CSR matrix.
///
/// Dense blocks are converted on the fly; only non-zero entries are stored.
/// Text blocks are rejected.
pub fn hstack_sparse(blocks: &[FeatureArray]) -> Result<CsMat<f64>> {
    let rows = check_rows(blocks.iter().map(|b| b.n_rows()))?;
    let cols: usize = blocks.iter().map(|b| b.shape().get(1).copied().unwrap_or(1)).sum();
    let mut tri = TriMat::new((rows, cols));
    let mut offset = 0;
    for block in blocks {
        match block {
            FeatureArray::Sparse(s) => {
                for (&value, (row, col)) in s.iter() {
                    tri.add_triplet(row, offset + col, value);
                }
                offset += s.cols();
            }
            dense => {
                let m = dense.to_dense()?;
                for ((row, col), &value) in m.indexed_iter() {
                    if value != 0.0 {
                        tri.add_triplet(row, offset + col, value);
                    }
                }
                offset += m.ncols();
            }
        }
    }
    Ok(tri.to_csr())
}

fn check_rows(mut rows: impl Iterator<Item = usize>) -> Result<usize> {
    let first = rows.next().unwrap_or(0);
    for (i, r) in rows.enumerate() {
        if r != first {
            return Err(MapperError::InvalidShape {
                expected: format!("{} rows", first),
                got: format!("{} rows in block {}", r, i + 1),
            });
        }
    }
    Ok(first)
}
