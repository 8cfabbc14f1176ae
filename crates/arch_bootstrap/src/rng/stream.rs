//! The random stream abstraction.

/// Source of the three draws the samplers need.
///
/// Only [`next_uniform`](Self::next_uniform) is required. The integer draws
/// default to inversion of a single uniform so that a custom stream stays
/// consistent with its uniform sequence; implementations may override them
/// with exact integer sampling.
///
/// # Contract
///
/// - `next_uniform` returns a value in `[0, 1)`
/// - `next_index(n)` returns a value in `[0, n)` for `n >= 1`
/// - `next_geometric(p)` returns a value `>= 1` for `p` in `(0, 1]`, with
///   mean `1 / p`
pub trait RandomStream {
    /// Uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Uniform integer in `[0, n)`. `n` must be at least 1.
    #[inline]
    fn next_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "next_index requires n >= 1");
        let index = (self.next_uniform() * n as f64) as usize;
        index.min(n.saturating_sub(1))
    }

    /// Geometric draw on `{1, 2, ...}` with success probability `p`.
    #[inline]
    fn next_geometric(&mut self, p: f64) -> usize {
        if p >= 1.0 {
            return 1;
        }
        geometric_by_inversion(self.next_uniform(), p)
    }
}

/// Smallest `k >= 1` with `P(K <= k) >= u` for `K ~ Geometric(p)` on `{1, 2, ...}`.
///
/// `ln_1p` keeps `ln(1 - p)` non-zero for `p` below machine epsilon.
#[inline]
pub(crate) fn geometric_by_inversion(u: f64, p: f64) -> usize {
    let k = ((1.0 - u).ln() / (-p).ln_1p()).ceil();
    // NaN casts to 0 and oversized values saturate.
    (k as usize).max(1)
}

impl<R: RandomStream + ?Sized> RandomStream for &mut R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }

    #[inline]
    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }

    #[inline]
    fn next_geometric(&mut self, p: f64) -> usize {
        (**self).next_geometric(p)
    }
}
