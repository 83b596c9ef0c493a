use std::cmp::Ordering;

use num_traits::Float;

mod median;
mod rank;
mod ustat;

pub use median::Median;
pub use rank::{Ranks, TiedRank};
pub use ustat::UStatistics;

/// A computation over a data set `D` producing `T`.
pub trait Statistic<D, T> {
    /// Evaluate the statistic on `data`.
    fn compute(&self, data: &D) -> T;
}

/// Numeric order with NaN last, a total preorder `sort_by` can rely on.
pub(crate) fn nan_last<F: Float>(a: F, b: F) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}
