use std::cmp::Ordering;

use num_traits::Float;
use serde::Serialize;

use super::{nan_last, Statistic};
use crate::sample::Sample;

/// Mid-rank (fractional) ranking with tie correction.
///
/// Every observation receives the average of the 1-based ranks of all
/// observations equal to it, so `[10, 20, 20, 30]` ranks as
/// `[1, 2.5, 2.5, 4]`. Alongside the ranks, the tie adjustment
/// ```text
/// T = Σ (tᵢ³ − tᵢ)
/// ```
/// is accumulated over every group of `tᵢ` equal values; `T = 0` exactly
/// when all values are distinct.
///
/// NaN has no position in the ordering: each NaN is ranked after every
/// number and in a group of its own. Validate samples first when that
/// matters (the test constructors reject NaN).
#[derive(Debug, Clone, Copy, Default)]
pub struct TiedRank;

/// Output of [`TiedRank`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranks {
    /// One rank per observation, aligned to the input order.
    pub ranks: Vec<f64>,
    /// Σ (tᵢ³ − tᵢ) over tied groups.
    pub tie_adjustment: f64,
}

impl TiedRank {
    /// Rank `slice`; the result is aligned to the input order.
    pub fn rank<F: Float>(&self, slice: &[F]) -> Ranks {
        let mut order: Vec<(usize, F)> = slice.iter().copied().enumerate().collect();
        order.sort_by(|a, b| nan_last(a.1, b.1));

        let mut ranks = vec![0.0; slice.len()];
        let mut tie_adjustment = 0.0;
        let mut before = 0;

        for group in order.chunk_by(|a, b| a.1.partial_cmp(&b.1) == Some(Ordering::Equal)) {
            let t = group.len();
            // positions before+1 ..= before+t share their average
            let rank = (2 * before + t + 1) as f64 / 2.0;
            for &(i, _) in group {
                if let Some(slot) = ranks.get_mut(i) {
                    *slot = rank;
                }
            }

            let t = t as f64;
            tie_adjustment += t * t * t - t;
            before += group.len();
        }

        Ranks { ranks, tie_adjustment }
    }
}

impl<F: Float> Statistic<Vec<F>, Ranks> for TiedRank {
    fn compute(&self, data: &Vec<F>) -> Ranks {
        self.rank(data)
    }
}

impl<F: Float, const N: usize> Statistic<[F; N], Ranks> for TiedRank {
    fn compute(&self, data: &[F; N]) -> Ranks {
        self.rank(data)
    }
}

impl<F: Float> Statistic<Sample<F>, Ranks> for TiedRank {
    fn compute(&self, data: &Sample<F>) -> Ranks {
        self.rank(data.as_ref())
    }
}
