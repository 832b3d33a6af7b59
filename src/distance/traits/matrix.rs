//! Host-side condition distance matrix.

use crate::error::{EvalError, EvalResult};
use serde::{Serialize, Serializer};

/// Dense `rows × cols` matrix of finite distances, row-major.
///
/// Entry `(i, j)` is the distance between condition `i` of the first
/// operand and condition `j` of the second.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ConditionMatrix {
    /// Wrap row-major values, rejecting NaN and infinities.
    pub fn new(
        rows: usize,
        cols: usize,
        values: Vec<f64>,
        context: &'static str,
    ) -> EvalResult<Self> {
        if values.len() != rows * cols {
            return Err(EvalError::shape(
                context,
                format!(
                    "expected {} values for a {rows}x{cols} matrix, got {}",
                    rows * cols,
                    values.len()
                ),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EvalError::NonFinite { context });
        }
        Ok(Self { rows, cols, values })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.cols..(i + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Main diagonal, up to `min(rows, cols)` entries.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols))
            .map(|i| self.get(i, i))
            .collect()
    }

    /// Nested row vectors, the layout used in reports.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }
}

impl Serialize for ConditionMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let m = ConditionMatrix::new(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], "test").unwrap();
        assert_eq!(m.get(1, 2), 5.0);
        assert_eq!(m.row(1), &[3.0, 4.0, 5.0]);
        assert_eq!(m.diagonal(), vec![0.0, 4.0]);
        assert!(!m.is_square());
        assert_eq!(m.to_rows(), vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = ConditionMatrix::new(1, 2, vec![0.0, f64::NAN], "test").unwrap_err();
        assert!(matches!(err, EvalError::NonFinite { context: "test" }));

        let err = ConditionMatrix::new(2, 2, vec![0.0; 3], "test").unwrap_err();
        assert!(matches!(err, EvalError::Shape { .. }));
    }
}
