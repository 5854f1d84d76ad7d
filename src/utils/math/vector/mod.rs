pub mod math;

use num::Float;

/// Sparse vector with implicit zeros.
/// Holds the indices and values of its nonzero elements.
///
/// Indices are kept strictly ascending, so two vectors can be combined with a
/// single merge pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVec<N = f64>
where
    N: Float,
{
    ind: Vec<usize>,
    val: Vec<N>,
    len: usize,
}

impl<N> SparseVec<N>
where
    N: Float,
{
    /// All-zero vector of dimension `len`.
    pub fn zeros(len: usize) -> Self {
        Self {
            ind: Vec::new(),
            val: Vec::new(),
            len,
        }
    }

    /// Build from `(index, value)` pairs in any order.
    /// Zero values are dropped and duplicate indices are summed.
    /// Indices at or beyond `len` are ignored.
    pub fn from_pairs(len: usize, pairs: impl IntoIterator<Item = (usize, N)>) -> Self {
        let mut pairs: Vec<(usize, N)> = pairs.into_iter().filter(|(i, _)| *i < len).collect();
        pairs.sort_by_key(|(i, _)| *i);

        let mut ind: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut val: Vec<N> = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            match ind.last() {
                Some(&last) if last == i => {
                    if let Some(acc) = val.last_mut() {
                        *acc = *acc + v;
                    }
                }
                _ => {
                    ind.push(i);
                    val.push(v);
                }
            }
        }
        let mut vec = Self { ind, val, len };
        vec.drop_zeros();
        vec
    }

    fn drop_zeros(&mut self) {
        let mut keep = 0;
        for k in 0..self.ind.len() {
            if !self.val[k].is_zero() {
                self.ind[keep] = self.ind[k];
                self.val[keep] = self.val[k];
                keep += 1;
            }
        }
        self.ind.truncate(keep);
        self.val.truncate(keep);
    }

    /// dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of stored nonzero elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.ind.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.ind.is_empty()
    }

    pub fn get(&self, index: usize) -> N {
        match self.ind.binary_search(&index) {
            Ok(pos) => self.val[pos],
            Err(_) => N::zero(),
        }
    }

    /// `(index, value)` of the nonzero elements, ascending by index
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.ind.iter().copied().zip(self.val.iter().copied())
    }

    pub fn shrink_to_fit(&mut self) {
        self.ind.shrink_to_fit();
        self.val.shrink_to_fit();
    }
}
