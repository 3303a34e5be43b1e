//! Dense square matrix indexed by user index.

use crate::error::{Result, SimilarityError};
use data_loader::UserIndex;
use std::fmt;

/// Square `size x size` matrix of similarity values, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// A `size x size` matrix of zeros
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Build from explicit rows; every row must have `rows.len()` entries
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(SimilarityError::DimensionMismatch {
                    expected: size,
                    found: row.len(),
                });
            }
            values.extend(row);
        }
        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// # Panics
    /// If `i` or `j` is out of bounds.
    pub fn get(&self, i: UserIndex, j: UserIndex) -> f64 {
        self.values[i * self.size + j]
    }

    pub(crate) fn set(&mut self, i: UserIndex, j: UserIndex, value: f64) {
        self.values[i * self.size + j] = value;
    }

    /// One user's similarities to every other user
    pub fn row(&self, i: UserIndex) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    pub fn diagonal_is_zero(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0.0)
    }
}

/// Tab-separated table, one row per line
impl fmt::Display for SimilarityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size {
            let line = self
                .row(i)
                .iter()
                .map(|v| format!("{:.1}", v))
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let m = SimilarityMatrix::zeros(3);
        assert_eq!(m.size(), 3);
        assert!(m.row(2).iter().all(|&v| v == 0.0));
        assert!(m.is_symmetric());
        assert!(m.diagonal_is_zero());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(SimilarityMatrix::from_rows(vec![vec![0.0], vec![0.0, 1.0]]).is_err());
    }

    #[test]
    fn test_display() {
        let m = SimilarityMatrix::from_rows(vec![vec![0.0, 9.0], vec![9.0, 0.0]]).unwrap();
        assert_eq!(m.to_string(), "0.0\t9.0\n9.0\t0.0\n");
    }
}
