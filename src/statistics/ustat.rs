use num_traits::Float;
use serde::Serialize;

use crate::error::Result;
use crate::sample::{checked, Sample};

use super::{Median, Ranks, Statistic, TiedRank};

/// Everything both Mann-Whitney engines need, computed once from `x` and `y`.
///
/// The combined sample is ranked with the smaller sample first (`x` first on
/// equal sizes), which keeps the exact enumeration over `C(nx + ny, min(nx, ny))`
/// subsets as small as it can be. `u` is always reported as *U for x versus y*:
/// ```text
/// U = Rx − nx(nx + 1)/2
/// ```
/// whichever order was used internally, so swapping the samples gives
/// `nx·ny − U`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UStatistics {
    /// Mann-Whitney U of `x` versus `y`, in `[0, nx·ny]`.
    pub u: f64,
    /// Mid-ranks of the combined sample, smaller sample first.
    pub ranks: Sample<f64>,
    /// Σ (tᵢ³ − tᵢ) over tied groups of the combined sample.
    pub tie_adjustment: f64,
    /// Size of `x`.
    pub nx: usize,
    /// Size of `y`.
    pub ny: usize,
    /// `median(x) − median(y)`, the location-shift point estimate.
    pub median: f64,
}

impl UStatistics {
    /// Validates both samples and computes the shared statistics.
    ///
    /// # Errors
    /// [`TestError::EmptySample`](crate::TestError::EmptySample) or
    /// [`TestError::NotANumber`](crate::TestError::NotANumber) for malformed input.
    pub fn new<F: Float>(x: &[F], y: &[F]) -> Result<Self> {
        let x = checked("x", x)?;
        let y = checked("y", y)?;
        Ok(Self::from_checked(&x, &y))
    }

    fn from_checked(x: &[f64], y: &[f64]) -> Self {
        let (nx, ny) = (x.len(), y.len());

        let (first, second) = if nx <= ny { (x, y) } else { (y, x) };
        let combined: Vec<f64> = first.iter().chain(second).copied().collect();
        let Ranks { ranks, tie_adjustment } = TiedRank.compute(&combined);

        let n = first.len() as f64;
        let u_first = ranks.iter().take(first.len()).sum::<f64>() - n * (n + 1.0) / 2.0;
        let u = if nx <= ny {
            u_first
        } else {
            (nx * ny) as f64 - u_first
        };

        let median_x: f64 = Median.compute(&x);
        let median_y: f64 = Median.compute(&y);
        let median = median_x - median_y;

        Self {
            u,
            ranks: Sample::new(ranks),
            tie_adjustment,
            nx,
            ny,
            median,
        }
    }

    /// `true` when `x` occupies the leading block of [`ranks`](Self::ranks).
    pub fn x_first(&self) -> bool {
        self.nx <= self.ny
    }

    /// Size of the leading (smaller) group.
    pub fn min_size(&self) -> usize {
        self.nx.min(self.ny)
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.nx + self.ny
    }

    /// Whether any value repeats in the combined sample.
    pub fn has_ties(&self) -> bool {
        self.tie_adjustment > 0.0
    }

    /// `nx·ny` as a float.
    pub fn product(&self) -> f64 {
        (self.nx * self.ny) as f64
    }

    /// Rank sums `(Rx, Ry)`.
    pub fn rank_sums(&self) -> (f64, f64) {
        let split = self.min_size();
        let ranks = self.ranks.as_ref();
        let leading: f64 = ranks.iter().take(split).sum();
        let trailing: f64 = ranks.iter().skip(split).sum();
        if self.x_first() {
            (leading, trailing)
        } else {
            (trailing, leading)
        }
    }

    /// U expressed for the leading group, the one the exact enumeration draws.
    pub fn leading_u(&self) -> f64 {
        if self.x_first() {
            self.u
        } else {
            self.product() - self.u
        }
    }
}
