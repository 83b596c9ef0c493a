use std::sync::OnceLock;

use num_traits::Float;
use tracing::{debug, warn};

use crate::distribution::RankSumDistribution;
use crate::error::Result;
use crate::resample::{Combinations, Re, Subsets};
use crate::statistics::UStatistics;

use super::{location_parameter, shared_params, HypothesisTest, ParameterOfInterest, Tail};

/// Subset counts above which an enumeration is reported as expensive.
const LARGE_ENUMERATION: f64 = 1e8;

/// Exact Mann-Whitney U test.
///
/// Without ties the p-value comes from the closed-form null distribution of U
/// ([`RankSumDistribution`]). With ties every `min(nx, ny)`-subset of the
/// combined mid-ranks is enumerated and the subset U-values are compared with
/// the observed one:
/// ```text
/// U' = Σ subset − k(k + 1)/2,   k = min(nx, ny)
/// p_left = #{U' ≤ U} / C(nx + ny, k),   p_right = #{U' ≥ U} / C(nx + ny, k)
/// ```
/// That enumeration is combinatorial, so it runs on the first p-value query
/// and is cached; construction only ranks the data.
#[derive(Debug, Clone)]
pub struct ExactMannWhitneyUTest {
    stats: UStatistics,
    tails: OnceLock<(f64, f64)>,
}

impl ExactMannWhitneyUTest {
    /// Run the test on `x` versus `y`.
    ///
    /// # Errors
    /// Fails on an empty sample or a NaN observation.
    pub fn new<F: Float>(x: &[F], y: &[F]) -> Result<Self> {
        Ok(Self::from_statistics(UStatistics::new(x, y)?))
    }

    /// Build the test from statistics computed elsewhere.
    pub fn from_statistics(stats: UStatistics) -> Self {
        Self {
            stats,
            tails: OnceLock::new(),
        }
    }

    /// Shared rank statistics.
    pub fn statistics(&self) -> &UStatistics {
        &self.stats
    }

    /// Mann-Whitney U of `x` versus `y`.
    pub fn u(&self) -> f64 {
        self.stats.u
    }

    /// `(p_left, p_right)`, computing them on first use.
    pub fn tail_probabilities(&self) -> (f64, f64) {
        *self.tails.get_or_init(|| {
            if self.stats.has_ties() {
                self.enumerated_tails()
            } else {
                self.untied_tails()
            }
        })
    }

    fn untied_tails(&self) -> (f64, f64) {
        let dist = RankSumDistribution::new(self.stats.nx, self.stats.ny);
        let u = self.stats.u;
        (dist.cdf(u), dist.sf(u - 1.0))
    }

    fn enumerated_tails(&self) -> (f64, f64) {
        let k = self.stats.min_size();
        let ranks = self.stats.ranks.as_ref();

        let subsets = Combinations::new(ranks.len(), k).count_hint();
        if subsets > LARGE_ENUMERATION {
            warn!(subsets, n = ranks.len(), k, "exact tied enumeration is large");
        } else {
            debug!(subsets, n = ranks.len(), k, "enumerating tied rank subsets");
        }

        // counts describe the leading (smaller) group; flip back when that is y
        let counts = enumerate(ranks, k, self.stats.leading_u());
        let total = counts.total as f64;
        let low = counts.left as f64 / total;
        let high = counts.right as f64 / total;

        if self.stats.x_first() {
            (low, high)
        } else {
            (high, low)
        }
    }
}

/// How many subset U-values fall at or below / at or above the observed U.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TailCounts {
    total: u64,
    left: u64,
    right: u64,
}

impl TailCounts {
    #[inline]
    fn observe(mut self, candidate: f64, observed: f64) -> Self {
        self.total += 1;
        self.left += u64::from(candidate <= observed);
        self.right += u64::from(candidate >= observed);
        self
    }

    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            left: self.left + other.left,
            right: self.right + other.right,
        }
    }
}

#[cfg(not(feature = "rayon"))]
fn enumerate(ranks: &[f64], k: usize, observed: f64) -> TailCounts {
    let offset = (k * (k + 1)) as f64 / 2.0;
    Subsets::of_size(k)
        .re(ranks)
        .fold(TailCounts::default(), |acc, sum| acc.observe(sum - offset, observed))
}

/// Splits the enumeration on the first chosen position; the counters are
/// independent, so the chunks reduce to the sequential result.
#[cfg(feature = "rayon")]
fn enumerate(ranks: &[f64], k: usize, observed: f64) -> TailCounts {
    use rayon::prelude::*;

    let offset = (k * (k + 1)) as f64 / 2.0;
    (0..=ranks.len() - k)
        .into_par_iter()
        .filter_map(|first| ranks.get(first..)?.split_first())
        .map(|(&head, rest)| {
            Subsets::of_size(k - 1)
                .re(rest)
                .fold(TailCounts::default(), |acc, tail| {
                    acc.observe(head + tail - offset, observed)
                })
        })
        .reduce(TailCounts::default, TailCounts::merge)
}

impl HypothesisTest for ExactMannWhitneyUTest {
    fn name(&self) -> &'static str {
        "Exact Mann-Whitney U test"
    }

    fn pvalue(&self, tail: Tail) -> f64 {
        let (left, right) = self.tail_probabilities();
        match tail {
            Tail::Left => left,
            Tail::Right => right,
            // the closed form picks the tail on the side of the mean
            Tail::Both if !self.stats.has_ties() => {
                let p = if self.stats.u < self.stats.product() / 2.0 { left } else { right };
                (2.0 * p).min(1.0)
            }
            Tail::Both => (2.0 * left.min(right)).min(1.0),
        }
    }

    fn parameter_of_interest(&self) -> ParameterOfInterest {
        location_parameter(self.stats.median)
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        shared_params(&self.stats)
    }
}
