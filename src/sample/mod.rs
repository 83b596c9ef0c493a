mod read;

pub use read::SampleError;

use num_traits::Float;
use serde::Serialize;

use crate::error::{Result, TestError};
use crate::statistics::Statistic;

/// Owned, ordered collection of observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample<T> {
    /// Observations in input order
    pub data: Vec<T>,
}

impl<T> Sample<T> {
    /// Create a new sample from raw data
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of observations in the sample
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the sample contains no observations
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Estimate a statistic from the sample data
    pub fn estimate<Output>(&self, statistic: impl Statistic<Self, Output>) -> Output {
        statistic.compute(self)
    }
}

/// Checks that `data` can take part in a rank test and widens it to `f64`.
///
/// `name` identifies the sample in the error (`x` or `y`).
pub(crate) fn checked<F: Float>(name: &'static str, data: &[F]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(TestError::EmptySample { sample: name });
    }

    data.iter()
        .enumerate()
        .map(|(index, value)| match value.to_f64() {
            Some(v) if !v.is_nan() => Ok(v),
            _ => Err(TestError::NotANumber { sample: name, index }),
        })
        .collect()
}

impl<T> FromIterator<T> for Sample<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sample::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Sample<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<T> AsRef<[T]> for Sample<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> From<Vec<T>> for Sample<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Median;

    #[test]
    fn checked_widens_f32() {
        let data = [1.5_f32, -2.0, 0.25];
        assert_eq!(checked("x", &data).unwrap(), vec![1.5, -2.0, 0.25]);
    }

    #[test]
    fn checked_rejects_empty_and_nan() {
        assert_eq!(
            checked::<f64>("y", &[]),
            Err(TestError::EmptySample { sample: "y" })
        );
        assert_eq!(
            checked("x", &[1.0, f64::NAN, 2.0]),
            Err(TestError::NotANumber { sample: "x", index: 1 })
        );
    }

    #[test]
    fn infinities_are_rankable() {
        let data = [f64::NEG_INFINITY, 0.0, f64::INFINITY];
        assert!(checked("x", &data).is_ok());
    }

    #[test]
    fn estimate_runs_statistic() {
        let sample: Sample<f64> = [4.0, 1.0, 3.0, 2.0].into_iter().collect();
        assert_eq!(sample.len(), 4);
        assert_eq!(sample.estimate(Median), 2.5);
    }

    #[test]
    fn views_and_conversions_share_data() {
        let sample = Sample::from(vec![3, 1, 2]);
        assert_eq!(sample.as_ref(), &[3, 1, 2]);
        assert!(!sample.is_empty());
        assert_eq!(sample.into_iter().collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
