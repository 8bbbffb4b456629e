//! Exact binomial coefficients and lazy k-subset enumeration

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Number of ways to choose `r` items from `n`
///
/// Returns zero for `r < 0`, `n < 0` or `r > n`. Uses the symmetric reduction
/// `r = min(r, n - r)` and exact multiplicative accumulation, so every
/// intermediate value is an integer.
pub fn binomial(n: i64, r: i64) -> BigUint {
    if n < 0 || r < 0 || r > n {
        return BigUint::zero();
    }
    let r = r.min(n - r);

    let mut result = BigUint::one();
    for i in 1..=r {
        result *= BigUint::from((n - i + 1) as u64);
        result /= BigUint::from(i as u64);
    }
    result
}

/// Lazy generator of `k`-element subsets of `items` in lexicographic index order
///
/// Yields exactly one empty subset for `k == 0` and nothing when `k` exceeds
/// the number of items. [`Combinations::reset`] restarts the sequence.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    exhausted: bool,
    started: bool,
}

impl<'a, T: Copy> Combinations<'a, T> {
    /// Create a generator over `items` choosing `k` at a time
    pub fn new(items: &'a [T], k: usize) -> Self {
        Self {
            items,
            indices: (0..k).collect(),
            exhausted: k > items.len(),
            started: false,
        }
    }

    /// Rewind to the first subset
    pub fn reset(&mut self) {
        let k = self.indices.len();
        for (position, index) in self.indices.iter_mut().enumerate() {
            *index = position;
        }
        self.exhausted = k > self.items.len();
        self.started = false;
    }

    /// Advance the index vector to the next combination
    ///
    /// Finds the rightmost index not yet at its maximum, increments it and
    /// resets everything to its right to consecutive successors.
    fn advance(&mut self) -> bool {
        let n = self.items.len();
        let k = self.indices.len();

        let Some(pivot) = (0..k)
            .rev()
            .find(|&i| self.indices.get(i).is_some_and(|&value| value != i + n - k))
        else {
            return false;
        };

        let mut next = self.indices.get(pivot).copied().unwrap_or(0) + 1;
        for index in self.indices.iter_mut().skip(pivot) {
            *index = next;
            next += 1;
        }
        true
    }

    fn current(&self) -> Vec<T> {
        self.indices
            .iter()
            .filter_map(|&i| self.items.get(i).copied())
            .collect()
    }
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if self.started {
            if !self.advance() {
                self.exhausted = true;
                return None;
            }
        } else {
            self.started = true;
        }

        let subset = self.current();
        if self.indices.is_empty() {
            // The single empty subset has been produced
            self.exhausted = true;
        }
        Some(subset)
    }
}
