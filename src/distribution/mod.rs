//! Null distributions used by the rank tests.

mod rank_sum;

pub use rank_sum::RankSumDistribution;

use std::sync::OnceLock;

use statrs::distribution::Normal;

static STANDARD_NORMAL: OnceLock<Normal> = OnceLock::new();

/// Initialise the shared standard normal distribution.
///
/// Idempotent and cheap after the first call. Call it at startup to keep the
/// one-time setup off the test path; test constructors call it as well, so
/// skipping it is never incorrect.
pub fn init() -> &'static Normal {
    STANDARD_NORMAL.get_or_init(|| Normal::new(0.0, 1.0).expect("Valid N(0,1) distribution"))
}
