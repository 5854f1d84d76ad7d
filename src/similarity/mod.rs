use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use num::Float;
use rayon::prelude::*;

use crate::{
    error::Error,
    utils::math::vector::{math::cosine_with_norms, SparseVec},
};

/// Dense all-pairs cosine similarity, row-major.
///
/// Symmetric, every cell in [0, 1]. The diagonal is 1.0 for items with a
/// nonzero vector and 0.0 for items without one.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compare every vector with every other one.
    /// `parallel` spreads rows over the rayon pool; the result is the same.
    pub fn compute<N>(vectors: &[SparseVec<N>], parallel: bool) -> Self
    where
        N: Float + Send + Sync,
    {
        let never = AtomicBool::new(false);
        match Self::compute_cancellable(vectors, parallel, &never) {
            Ok(matrix) => matrix,
            Err(_) => unreachable!("cancel flag is never raised"),
        }
    }

    /// Like `compute`, checking `cancel` before each row.
    pub fn compute_cancellable<N>(
        vectors: &[SparseVec<N>],
        parallel: bool,
        cancel: &AtomicBool,
    ) -> Result<Self, Error>
    where
        N: Float + Send + Sync,
    {
        let now = Instant::now();
        let size = vectors.len();
        let norms: Vec<f64> = vectors.iter().map(|v| v.norm()).collect();

        let row = |i: usize| -> Option<Vec<f64>> {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            Some(
                (0..size)
                    .map(|j| {
                        if i == j {
                            if norms[i] > 0.0 { 1.0 } else { 0.0 }
                        } else {
                            cosine_with_norms(vectors[i].dot(&vectors[j]), norms[i], norms[j])
                                .clamp(0.0, 1.0)
                        }
                    })
                    .collect(),
            )
        };

        let rows: Option<Vec<Vec<f64>>> = if parallel {
            (0..size).into_par_iter().map(row).collect()
        } else {
            (0..size).map(row).collect()
        };
        let rows = rows.ok_or(Error::Cancelled)?;

        let cells: Vec<f64> = rows.into_iter().flatten().collect();
        tracing::debug!(
            items = size,
            parallel,
            "took {}ms to compute similarity matrix",
            now.elapsed().as_micros() as f64 / 1000.0
        );
        Ok(Self { size, cells })
    }

    /// number of rows (and columns)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// sim(i, j), None when out of range
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.cells[i * self.size + j])
        } else {
            None
        }
    }

    /// every similarity of item `i`, indexed by the other item
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.size {
            Some(&self.cells[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }
}
