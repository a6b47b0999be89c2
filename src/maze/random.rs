//! Random source seam and Fisher–Yates shuffle
//!
//! Generation only ever needs one kind of draw: a uniform index below some
//! bound. Every `rand::Rng` provides it; tests can script it.

use rand::Rng;

/// Uniform index draws
pub trait RandomSource {
    /// Uniform value in `0..upper`. `upper` is always at least 1.
    fn index_below(&mut self, upper: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn index_below(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

/// In-place Fisher–Yates: `i` from `len - 1` down to `1`, swap with a uniform index in `[0, i]`
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.index_below(i + 1);
        items.swap(i, j);
    }
}
