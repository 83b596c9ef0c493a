use std::iter::FusedIterator;

use statrs::function::factorial::binomial;

use super::Re;

/// Lexicographic `k`-combinations of `0..n`, produced one at a time.
///
/// A lending enumerator: [`advance`](Self::advance) hands out a view of the
/// internal index buffer, so walking all `C(n, k)` combinations allocates
/// nothing beyond the `k` indices.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Combinations of `k` out of `n`. With `k > n` there are none; with
    /// `k = 0` there is exactly one, the empty one.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    /// `C(n, k)`.
    pub fn count_hint(&self) -> f64 {
        if self.indices.len() > self.n {
            return 0.0;
        }
        binomial(self.n as u64, self.indices.len() as u64)
    }

    /// Rewind to the first combination.
    pub fn reset(&mut self) {
        let k = self.indices.len();
        *self = Self::new(self.n, k);
    }

    /// Next combination, or `None` once all have been produced.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let (n, k) = (self.n, self.indices.len());
        // rightmost position that has not reached its final value
        let Some((i, next)) = self
            .indices
            .iter()
            .enumerate()
            .rev()
            .find(|&(i, &index)| index < n - k + i)
            .map(|(i, &index)| (i, index + 1))
        else {
            self.done = true;
            return None;
        };

        // bump position i, then lay the tail out consecutively after it
        for (slot, index) in self.indices.iter_mut().skip(i).zip(next..) {
            *slot = index;
        }
        Some(&self.indices)
    }
}

/// Sums of every `k`-subset of a slice, streamed in lexicographic order of
/// the chosen positions.
#[derive(Debug, Clone)]
pub struct SubsetSums<'a> {
    values: &'a [f64],
    combinations: Combinations,
}

impl<'a> SubsetSums<'a> {
    /// Sums over all `size`-subsets of `values`.
    pub fn new(values: &'a [f64], size: usize) -> Self {
        Self {
            values,
            combinations: Combinations::new(values.len(), size),
        }
    }
}

impl Iterator for SubsetSums<'_> {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        let values = self.values;
        self.combinations
            .advance()
            .map(|chosen| chosen.iter().filter_map(|&i| values.get(i)).sum())
    }
}

impl FusedIterator for SubsetSums<'_> {}

/// Exhaustive without-replacement resampling of a fixed size, reduced to the
/// subset sum.
#[derive(Debug, Clone, Copy)]
pub struct Subsets {
    size: usize,
}

impl Subsets {
    /// Subsets with `size` elements.
    pub fn of_size(size: usize) -> Self {
        Self { size }
    }
}

impl Re<[f64]> for Subsets {
    type Item = f64;

    fn re(&self, values: &[f64]) -> impl Iterator<Item = f64> {
        SubsetSums::new(values, self.size)
    }
}
