use std::cmp::Ordering;

use num::Float;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Float,
{
    /// dot product
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// Walks both index lists once; only shared indices contribute.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut dot = 0_f64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    dot += to_f64(va) * to_f64(vb);
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        dot
    }

    /// ||a|| = sqrt(Σ(a_i^2))
    #[inline]
    pub fn norm(&self) -> f64 {
        self.raw_iter()
            .map(|(_, v)| {
                let v = to_f64(v);
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Scale to unit L2 norm. A zero vector stays zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }
        let inv = N::from(1.0 / norm).unwrap_or_else(N::one);
        for v in self.val.iter_mut() {
            *v = *v * inv;
        }
    }

    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    ///
    /// 0 when either vector has zero norm.
    #[inline]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        cosine_with_norms(self.dot(other), self.norm(), other.norm())
    }
}

/// Cosine from a precomputed dot product and norms.
/// Zero norms give 0, never NaN.
#[inline]
pub fn cosine_with_norms(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[inline(always)]
fn to_f64<N: Float>(v: N) -> f64 {
    v.to_f64().unwrap_or(0.0)
}
