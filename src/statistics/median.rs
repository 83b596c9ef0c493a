use num_traits::Float;

use super::{nan_last, Statistic};

/// Sample median.
///
/// For an even number of observations this is the mean of the two middle
/// order statistics. An empty sample yields NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct Median;

impl<D, F> Statistic<D, F> for Median
where
    D: AsRef<[F]>,
    F: Float,
{
    fn compute(&self, data: &D) -> F {
        let mut sorted = data.as_ref().to_vec();
        let n = sorted.len();
        if n == 0 {
            return F::nan();
        }

        sorted.sort_by(|&a, &b| nan_last(a, b));
        // one middle value for odd n, two for even n
        let (sum, count) = sorted
            .iter()
            .skip((n - 1) / 2)
            .take(2 - n % 2)
            .fold((F::zero(), F::zero()), |(sum, count), &v| (sum + v, count + F::one()));
        sum / count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_length_picks_middle() {
        assert_eq!(Median.compute(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn even_length_averages() {
        assert_eq!(Median.compute(&[4.0_f32, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn empty_is_nan() {
        let m: f64 = Median.compute(&Vec::<f64>::new());
        assert!(m.is_nan());
    }
}
