use thiserror::Error;

/// Error raised when a test is asked to work on arguments it cannot accept.
///
/// Every variant is an invalid-argument condition: they are detected
/// synchronously and never coerced into a numeric answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    /// One of the two samples has no observations.
    #[error("sample `{sample}` is empty")]
    EmptySample {
        /// Which sample (`x` or `y`)
        sample: &'static str,
    },

    /// A sample contains NaN, which has no place in a ranking.
    #[error("sample `{sample}` contains NaN at index {index}")]
    NotANumber {
        /// Which sample (`x` or `y`)
        sample: &'static str,
        /// Position of the first NaN
        index: usize,
    },

    /// Tail name other than `both`, `left` or `right`.
    #[error("unrecognised tail `{0}`, expected one of `both`, `left`, `right`")]
    InvalidTail(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TestError>;
