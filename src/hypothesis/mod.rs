mod approximate;
mod exact;
mod mann_whitney;
mod tail;

pub use approximate::ApproximateMannWhitneyUTest;
pub use exact::ExactMannWhitneyUTest;
pub use mann_whitney::{
    approximate_mann_whitney_u_test, exact_mann_whitney_u_test, mann_whitney_u_test,
    MannWhitneyU, MannWhitneyUTest,
};
pub use tail::Tail;

use serde::Serialize;

use crate::error::Result;
use crate::statistics::UStatistics;

/// The quantity a test makes a statement about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterOfInterest {
    /// Human-readable name.
    pub name: &'static str,
    /// Value under H₀.
    pub null_value: f64,
    /// Point estimate from the data.
    pub estimate: f64,
}

/// Common surface of a computed hypothesis test.
pub trait HypothesisTest {
    /// Display name of the test.
    fn name(&self) -> &'static str;

    /// p-value for the given alternative, in `[0, 1]`.
    fn pvalue(&self, tail: Tail) -> f64;

    /// Like [`pvalue`](Self::pvalue), naming the tail as a string.
    ///
    /// # Errors
    /// [`TestError::InvalidTail`](crate::TestError::InvalidTail) unless `tail`
    /// is one of `both`, `left`, `right`.
    fn pvalue_for(&self, tail: &str) -> Result<f64> {
        Ok(self.pvalue(tail.parse()?))
    }

    /// Alternative reported by default.
    fn default_tail(&self) -> Tail {
        Tail::Both
    }

    /// Parameter, null value and point estimate.
    fn parameter_of_interest(&self) -> ParameterOfInterest;

    /// Ordered `(label, value)` dump of the test's details.
    fn params(&self) -> Vec<(&'static str, String)>;
}

/// Parameter dump common to both Mann-Whitney variants.
pub(crate) fn shared_params(stats: &UStatistics) -> Vec<(&'static str, String)> {
    let (rx, ry) = stats.rank_sums();
    vec![
        ("number of observations in each group", format!("[{}, {}]", stats.nx, stats.ny)),
        ("Mann-Whitney-U statistic", format!("{}", stats.u)),
        ("rank sums", format!("[{rx}, {ry}]")),
        ("adjustment for ties", format!("{}", stats.tie_adjustment)),
    ]
}

/// Location parameter shared by both Mann-Whitney variants.
pub(crate) fn location_parameter(median: f64) -> ParameterOfInterest {
    ParameterOfInterest {
        name: "Location parameter (pseudomedian)",
        null_value: 0.0,
        estimate: median,
    }
}
