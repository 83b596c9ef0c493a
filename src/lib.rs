//! Mann-Whitney U (Wilcoxon rank-sum) test for two independent samples.
//!
//! [`mann_whitney_u_test`] ranks both samples once and picks an engine:
//! the exact null distribution for small samples ([`ExactMannWhitneyUTest`])
//! or a tie-corrected normal approximation otherwise
//! ([`ApproximateMannWhitneyUTest`]). Every engine answers p-value queries
//! for the `both`, `left` and `right` alternatives through [`HypothesisTest`].

mod display;
mod error;
mod hypothesis;
mod resample;
mod sample;
mod statistics;

pub mod distribution;

pub use crate::display::report;
pub use crate::distribution::RankSumDistribution;
pub use crate::error::{Result, TestError};
pub use crate::hypothesis::*;
pub use crate::resample::*;
pub use crate::sample::{Sample, SampleError};
pub use crate::statistics::*;
