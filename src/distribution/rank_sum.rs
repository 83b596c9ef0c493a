use statrs::function::factorial::binomial;

/// Exact null distribution of the Mann-Whitney U statistic without ties.
///
/// Under H₀ every assignment of the ranks `1..=m+n` to a group of size `m`
/// is equally likely, so
/// ```text
/// P(U = u) = c(u; m, n) / C(m + n, m)
/// ```
/// where `c(u; m, n)` counts the partitions of `u` into at most `m` parts
/// none larger than `n`. The counts are the coefficients of the Gaussian
/// binomial `[m+n choose m]_q`, built here one factor
/// `(1 − q^(n+i)) / (1 − q^i)` at a time.
///
/// After factor `i` the coefficients are rescaled by `i / (n + i)`, the ratio
/// of consecutive binomials, so they stay probabilities throughout and large
/// groups never overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct RankSumDistribution {
    m: usize,
    n: usize,
    cumulative: Vec<f64>,
}

impl RankSumDistribution {
    /// Distribution of U for group sizes `m` and `n`.
    pub fn new(m: usize, n: usize) -> Self {
        let len = m * n + 1;
        let mut probs = vec![0.0; len];
        if let Some(first) = probs.first_mut() {
            *first = 1.0;
        }

        for i in 1..=m {
            let drop = n + i;
            // multiply by (1 − q^drop), truncated at degree `m·n`
            for start in 0..drop.min(len) {
                probs.iter_mut().skip(start).step_by(drop).fold(0.0, |previous, p| {
                    let current = *p;
                    *p -= previous;
                    current
                });
            }
            // divide by (1 − q^i)
            for start in 0..i.min(len) {
                probs.iter_mut().skip(start).step_by(i).fold(0.0, |running, p| {
                    *p += running;
                    *p
                });
            }

            let scale = i as f64 / drop as f64;
            probs.iter_mut().for_each(|p| *p *= scale);
        }

        let cumulative = probs
            .iter()
            .scan(0.0, |acc, &p| {
                *acc += p.max(0.0);
                Some(acc.min(1.0))
            })
            .collect();

        Self { m, n, cumulative }
    }

    /// Group sizes `(m, n)`.
    pub fn sizes(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// Largest attainable U, `m·n`.
    pub fn max(&self) -> usize {
        self.m * self.n
    }

    /// `m·n / 2`.
    pub fn mean(&self) -> f64 {
        self.max() as f64 / 2.0
    }

    /// Number of equally likely rank assignments, `C(m + n, m)`.
    ///
    /// Infinite once it leaves the `f64` range; the probabilities do not
    /// depend on it.
    pub fn total(&self) -> f64 {
        binomial((self.m + self.n) as u64, self.m as u64)
    }

    /// `P(U = u)`.
    pub fn pmf(&self, u: usize) -> f64 {
        let below = u
            .checked_sub(1)
            .and_then(|prev| self.cumulative.get(prev))
            .copied()
            .unwrap_or(0.0);
        self.cumulative
            .get(u)
            .map_or(0.0, |&at| (at - below).max(0.0))
    }

    /// `P(U ≤ q)`.
    pub fn cdf(&self, q: f64) -> f64 {
        if q < 0.0 {
            return 0.0;
        }
        let k = q.floor() as usize;
        if k >= self.max() {
            return 1.0;
        }
        self.cumulative.get(k).copied().unwrap_or(1.0)
    }

    /// `P(U > q)`.
    ///
    /// Evaluated through the symmetry `U ~ m·n − U` so small upper tails keep
    /// their relative precision.
    pub fn sf(&self, q: f64) -> f64 {
        self.cdf(self.max() as f64 - q.floor() - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::collections::HashMap;

    fn assert_counts(d: &RankSumDistribution, expected: &[f64]) {
        assert_eq!(d.max() + 1, expected.len());
        for (u, &count) in expected.iter().enumerate() {
            assert_relative_eq!(d.pmf(u) * d.total(), count, max_relative = 1e-12);
        }
    }

    /// `c(u; m, n) = c(u; m, n − 1) + c(u − n; m − 1, n)`, all additions.
    fn partitions(
        u: usize,
        m: usize,
        n: usize,
        memo: &mut HashMap<(usize, usize, usize), f64>,
    ) -> f64 {
        if u == 0 {
            return 1.0;
        }
        if m == 0 || n == 0 || u > m * n {
            return 0.0;
        }
        if let Some(&c) = memo.get(&(u, m, n)) {
            return c;
        }
        let without_n = partitions(u, m, n - 1, memo);
        let with_n = u.checked_sub(n).map_or(0.0, |rest| partitions(rest, m - 1, n, memo));
        memo.insert((u, m, n), without_n + with_n);
        without_n + with_n
    }

    #[test]
    fn three_by_three_counts() {
        let d = RankSumDistribution::new(3, 3);
        assert_counts(&d, &[1.0, 1.0, 2.0, 3.0, 3.0, 3.0, 3.0, 2.0, 1.0, 1.0]);
        assert_eq!(d.total(), 20.0);
        assert_abs_diff_eq!(d.cdf(0.0), 0.05, epsilon = 1e-15);
        assert_eq!(d.mean(), 4.5);
    }

    #[test]
    fn asymmetric_sizes() {
        let d = RankSumDistribution::new(4, 2);
        assert_counts(&d, &[1.0, 1.0, 2.0, 2.0, 3.0, 2.0, 2.0, 1.0, 1.0]);
        assert_eq!(d, RankSumDistribution::new(4, 2));
        assert_eq!(d.sizes(), (4, 2));
    }

    #[test]
    fn matches_additive_partition_counts() {
        for (m, n) in [(1, 1), (2, 7), (5, 5), (10, 12), (20, 15)] {
            let d = RankSumDistribution::new(m, n);
            let mut memo = HashMap::new();
            let expected: Vec<f64> = (0..=m * n).map(|u| partitions(u, m, n, &mut memo)).collect();
            assert_relative_eq!(expected.iter().sum::<f64>(), d.total(), max_relative = 1e-12);
            assert_counts(&d, &expected);
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let d = RankSumDistribution::new(25, 25);
        let mass: f64 = (0..=d.max()).map(|u| d.pmf(u)).sum();
        assert_abs_diff_eq!(mass, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn large_groups_stay_finite() {
        // C(1350, 300) is beyond the f64 range
        let d = RankSumDistribution::new(300, 1050);
        assert!(d.total().is_infinite());

        let mut previous = 0.0;
        for u in (0..=d.max()).step_by(997) {
            let q = u as f64;
            let (cdf, sf) = (d.cdf(q), d.sf(q));
            assert!(cdf.is_finite() && (0.0..=1.0).contains(&cdf), "cdf({u}) = {cdf}");
            assert!(sf.is_finite() && (0.0..=1.0).contains(&sf), "sf({u}) = {sf}");
            assert!(cdf >= previous);
            previous = cdf;
        }
        assert_abs_diff_eq!(d.cdf(d.mean()), 0.5, epsilon = 1e-3);
    }

    #[test]
    fn tails_are_complementary_and_symmetric() {
        let d = RankSumDistribution::new(6, 9);
        for u in 0..=d.max() {
            let q = u as f64;
            assert_abs_diff_eq!(d.cdf(q) + d.sf(q), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(d.cdf(q), d.sf(d.max() as f64 - q - 1.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn out_of_support() {
        let d = RankSumDistribution::new(2, 3);
        assert_eq!(d.cdf(-1.0), 0.0);
        assert_eq!(d.cdf(6.0), 1.0);
        assert_eq!(d.cdf(100.0), 1.0);
        assert_eq!(d.sf(-1.0), 1.0);
        assert_eq!(d.sf(6.0), 0.0);
        assert_eq!(d.pmf(7), 0.0);
    }
}
