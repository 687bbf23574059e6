//! Seasonal decomposition.

mod classical;

pub use classical::{ClassicalDecomposition, Decomposition};
