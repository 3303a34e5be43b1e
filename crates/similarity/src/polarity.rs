//! Which direction of a similarity value means "closer".
//!
//! The aggregated similarity grows with agreement while a distance shrinks
//! with it. Each measure declares its polarity so that neighbour ranking
//! never has to guess.

use data_loader::UserIndex;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Larger values are closer (summed agreement)
    HigherIsCloser,
    /// Smaller values are closer (distances)
    LowerIsCloser,
}

impl Polarity {
    /// Ordering that sorts the closest value first
    pub fn closest_first(self, a: f64, b: f64) -> Ordering {
        match self {
            Polarity::HigherIsCloser => b.total_cmp(&a),
            Polarity::LowerIsCloser => a.total_cmp(&b),
        }
    }
}

/// Another user selected for a target, with the raw value that selected them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: UserIndex,
    pub value: f64,
}

impl Neighbor {
    pub fn new(index: UserIndex, value: f64) -> Self {
        Self { index, value }
    }
}
