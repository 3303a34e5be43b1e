//! Global similarity: the elementwise sum of every per-movie matrix.
//!
//! A [`GlobalSimilarity`] can only be produced by summing from a fresh zero
//! matrix, so computing it twice over the same inputs always yields the same
//! result. Holding one is proof that aggregation has completed.

use crate::error::{Result, SimilarityError};
use crate::matrix::SimilarityMatrix;
use crate::polarity::Polarity;
use data_loader::UserIndex;
use rayon::prelude::*;

/// Finalized user × user similarity; larger means more similar
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalSimilarity {
    matrix: SimilarityMatrix,
}

impl GlobalSimilarity {
    pub const POLARITY: Polarity = Polarity::HigherIsCloser;

    /// Sum `matrices` into a new `size x size` matrix
    ///
    /// Rows are summed in parallel; within a cell, matrices are added in the
    /// order given so the result is deterministic.
    pub fn sum<'a, I>(size: usize, matrices: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a SimilarityMatrix>,
    {
        let matrices: Vec<&SimilarityMatrix> = matrices.into_iter().collect();
        if let Some(bad) = matrices.iter().find(|m| m.size() != size) {
            return Err(SimilarityError::DimensionMismatch {
                expected: size,
                found: bad.size(),
            });
        }

        let mut global = SimilarityMatrix::zeros(size);
        if size > 0 {
            global
                .values_mut()
                .par_chunks_mut(size)
                .enumerate()
                .for_each(|(i, row)| {
                    for matrix in &matrices {
                        for (cell, value) in row.iter_mut().zip(matrix.row(i)) {
                            *cell += *value;
                        }
                    }
                });
        }

        Ok(Self { matrix: global })
    }

    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    pub fn similarity(&self, a: UserIndex, b: UserIndex) -> f64 {
        self.matrix.get(a, b)
    }

    pub fn row(&self, user: UserIndex) -> &[f64] {
        self.matrix.row(user)
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}
