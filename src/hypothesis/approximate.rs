use num_traits::Float;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::trace;

use crate::distribution;
use crate::error::Result;
use crate::statistics::UStatistics;

use super::{location_parameter, shared_params, HypothesisTest, ParameterOfInterest, Tail};

/// Mann-Whitney U test by normal approximation.
///
/// # Statistical background
/// Under H₀, U is approximately normal around `nx·ny/2`. With `N = nx + ny`
/// and the tie adjustment `T`:
/// ```text
/// μ = U − nx·ny/2
/// σ = √( nx·ny·(N + 1 − T / (N(N − 1))) / 12 )
/// ```
/// p-values carry a continuity correction of ½ towards the mean. When every
/// observation is tied, `μ = σ = 0` and the p-value is 1 for every tail.
#[derive(Debug, Clone)]
pub struct ApproximateMannWhitneyUTest {
    stats: UStatistics,
    mu: f64,
    sigma: f64,
    normal: &'static Normal,
}

impl ApproximateMannWhitneyUTest {
    /// Run the test on `x` versus `y`.
    ///
    /// # Errors
    /// Fails on an empty sample or a NaN observation.
    pub fn new<F: Float>(x: &[F], y: &[F]) -> Result<Self> {
        Ok(Self::from_statistics(UStatistics::new(x, y)?))
    }

    /// Build the test from statistics computed elsewhere.
    pub fn from_statistics(stats: UStatistics) -> Self {
        let n = stats.total() as f64;
        let mu = stats.u - stats.product() / 2.0;
        let sigma = (stats.product() * (n + 1.0 - stats.tie_adjustment / (n * (n - 1.0))) / 12.0)
            .max(0.0)
            .sqrt();
        trace!(u = stats.u, mu, sigma, "normal approximation");

        Self {
            stats,
            mu,
            sigma,
            normal: distribution::init(),
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

    /// `U − nx·ny/2`.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Tie-corrected standard deviation of U under H₀.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

/// Sign with `sign(0) = 0`.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl HypothesisTest for ApproximateMannWhitneyUTest {
    fn name(&self) -> &'static str {
        "Approximate Mann-Whitney U test"
    }

    fn pvalue(&self, tail: Tail) -> f64 {
        // σ vanishes only when every observation is tied, and then μ = 0 too
        if self.sigma <= 0.0 {
            return 1.0;
        }

        match tail {
            Tail::Both => {
                let z = (self.mu - 0.5 * sign(self.mu)).abs() / self.sigma;
                (2.0 * self.normal.sf(z)).min(1.0)
            }
            Tail::Left => self.normal.cdf((self.mu + 0.5) / self.sigma),
            Tail::Right => self.normal.sf((self.mu - 0.5) / self.sigma),
        }
    }

    fn parameter_of_interest(&self) -> ParameterOfInterest {
        location_parameter(self.stats.median)
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = shared_params(&self.stats);
        params.push((
            "normal approximation (μ, σ)",
            format!("({}, {:.6})", self.mu, self.sigma),
        ));
        params
    }
}
