use num_traits::Float;
use tracing::debug;

use crate::error::Result;
use crate::statistics::{Statistic, UStatistics};

use super::{
    ApproximateMannWhitneyUTest, ExactMannWhitneyUTest, HypothesisTest, ParameterOfInterest, Tail,
};

/// Mann-Whitney U test with the engine chosen from the data.
///
/// Tests `H₀`: the distributions of `x` and `y` have equal location, without
/// assuming normality.
///
/// # Engine selection
/// The exact test is used when `nx + ny ≤ 10`, or when `nx + ny ≤ 50` and the
/// combined sample has no ties; everything else goes to the normal
/// approximation. Both limits can be moved on [`MannWhitneyU`].
///
/// # Example
/// ```rust
/// use ranksum::{mann_whitney_u_test, HypothesisTest, Tail};
///
/// let test = mann_whitney_u_test(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
/// assert!(test.is_exact());
/// assert!((test.pvalue(Tail::Both) - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub enum MannWhitneyUTest {
    /// Exact null distribution (closed form or tied enumeration).
    Exact(ExactMannWhitneyUTest),
    /// Normal approximation.
    Approximate(ApproximateMannWhitneyUTest),
}

impl MannWhitneyUTest {
    /// Run the test on `x` versus `y` with the default engine limits.
    ///
    /// # Errors
    /// Fails on an empty sample or a NaN observation.
    pub fn new<F: Float>(x: &[F], y: &[F]) -> Result<Self> {
        MannWhitneyU::default().test(x, y)
    }

    /// Whether the exact engine was selected.
    pub fn is_exact(&self) -> bool {
        matches!(self, MannWhitneyUTest::Exact(_))
    }

    /// Shared rank statistics.
    pub fn statistics(&self) -> &UStatistics {
        match self {
            MannWhitneyUTest::Exact(t) => t.statistics(),
            MannWhitneyUTest::Approximate(t) => t.statistics(),
        }
    }

    /// Mann-Whitney U of `x` versus `y`.
    pub fn u(&self) -> f64 {
        self.statistics().u
    }

    fn inner(&self) -> &dyn HypothesisTest {
        match self {
            MannWhitneyUTest::Exact(t) => t,
            MannWhitneyUTest::Approximate(t) => t,
        }
    }
}

impl HypothesisTest for MannWhitneyUTest {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn pvalue(&self, tail: Tail) -> f64 {
        self.inner().pvalue(tail)
    }

    fn parameter_of_interest(&self) -> ParameterOfInterest {
        self.inner().parameter_of_interest()
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        self.inner().params()
    }
}

impl From<ExactMannWhitneyUTest> for MannWhitneyUTest {
    fn from(t: ExactMannWhitneyUTest) -> Self {
        MannWhitneyUTest::Exact(t)
    }
}

impl From<ApproximateMannWhitneyUTest> for MannWhitneyUTest {
    fn from(t: ApproximateMannWhitneyUTest) -> Self {
        MannWhitneyUTest::Approximate(t)
    }
}

/// Engine selection for [`MannWhitneyUTest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MannWhitneyU {
    exact_limit: usize,
    untied_exact_limit: usize,
}

impl Default for MannWhitneyU {
    fn default() -> Self {
        Self {
            exact_limit: 10,
            untied_exact_limit: 50,
        }
    }
}

impl MannWhitneyU {
    /// Selector with the default limits (10 with ties, 50 without).
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest `nx + ny` sent to the exact engine regardless of ties.
    pub fn with_exact_limit(mut self, limit: usize) -> Self {
        self.exact_limit = limit;
        self
    }

    /// Largest `nx + ny` sent to the exact engine when there are no ties.
    pub fn with_untied_exact_limit(mut self, limit: usize) -> Self {
        self.untied_exact_limit = limit;
        self
    }

    /// Whether these statistics go to the exact engine.
    pub fn prefers_exact(&self, stats: &UStatistics) -> bool {
        let n = stats.total();
        n <= self.exact_limit || (n <= self.untied_exact_limit && !stats.has_ties())
    }

    /// Rank the samples once and wrap them in the selected engine.
    ///
    /// # Errors
    /// Fails on an empty sample or a NaN observation.
    pub fn test<F: Float>(&self, x: &[F], y: &[F]) -> Result<MannWhitneyUTest> {
        let stats = UStatistics::new(x, y)?;
        let exact = self.prefers_exact(&stats);
        debug!(
            nx = stats.nx,
            ny = stats.ny,
            tie_adjustment = stats.tie_adjustment,
            exact,
            "mann-whitney engine selected"
        );

        Ok(if exact {
            ExactMannWhitneyUTest::from_statistics(stats).into()
        } else {
            ApproximateMannWhitneyUTest::from_statistics(stats).into()
        })
    }
}

impl<D> Statistic<(D, D), Result<MannWhitneyUTest>> for MannWhitneyU
where
    D: AsRef<[f64]>,
{
    fn compute(&self, data: &(D, D)) -> Result<MannWhitneyUTest> {
        self.test(data.0.as_ref(), data.1.as_ref())
    }
}

/// Mann-Whitney U test, exact or approximate depending on the data.
///
/// # Errors
/// Fails on an empty sample or a NaN observation.
pub fn mann_whitney_u_test<F: Float>(x: &[F], y: &[F]) -> Result<MannWhitneyUTest> {
    MannWhitneyUTest::new(x, y)
}

/// Exact Mann-Whitney U test, whatever the sample sizes.
///
/// # Errors
/// Fails on an empty sample or a NaN observation.
pub fn exact_mann_whitney_u_test<F: Float>(x: &[F], y: &[F]) -> Result<ExactMannWhitneyUTest> {
    ExactMannWhitneyUTest::new(x, y)
}

/// Normal-approximation Mann-Whitney U test.
///
/// # Errors
/// Fails on an empty sample or a NaN observation.
pub fn approximate_mann_whitney_u_test<F: Float>(
    x: &[F],
    y: &[F],
) -> Result<ApproximateMannWhitneyUTest> {
    ApproximateMannWhitneyUTest::new(x, y)
}
