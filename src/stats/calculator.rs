//! Statistics Calculator Module
//! Descriptive statistics (mean, median, sample variance, standard deviation).

use crate::data::Table;
use statrs::statistics::Statistics;
use thiserror::Error;

/// Fewer than two usable values: sample variance is undefined.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("insufficient data: need at least 2 numeric values, found {found}")]
pub struct InsufficientDataError {
    pub found: usize,
}

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub var: f64,
}

/// Summary of the salaries within one experience level.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group_name: String,
    pub summary: Result<StatisticsSummary, InsufficientDataError>,
}

impl GroupSummary {
    /// Number of values in the group, available even when statistics are not.
    pub fn count(&self) -> usize {
        match &self.summary {
            Ok(s) => s.count,
            Err(e) => e.found,
        }
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// Non-finite values are excluded and not counted. Values are sorted
    /// before any summation so the result does not depend on input order.
    pub fn compute_summary(values: &[f64]) -> Result<StatisticsSummary, InsufficientDataError> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let n = sorted.len();
        if n < 2 {
            return Err(InsufficientDataError { found: n });
        }
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().mean();
        let median = Self::median(&sorted);
        // statrs uses the unbiased (n - 1) estimator
        let var = sorted.iter().variance();
        let std = var.sqrt();

        Ok(StatisticsSummary {
            count: n,
            mean,
            median,
            std,
            var,
        })
    }

    /// Median of an already sorted, non-empty slice.
    fn median(sorted: &[f64]) -> f64 {
        let n = sorted.len();
        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    /// Salary statistics per experience level, in first-appearance order.
    pub fn compute_group_summaries(table: &Table) -> Vec<GroupSummary> {
        table
            .experience_levels()
            .into_iter()
            .map(|level| {
                let values: Vec<f64> = table
                    .records()
                    .iter()
                    .filter(|r| r.experience_level() == level)
                    .map(|r| r.salary_in_usd())
                    .collect();
                GroupSummary {
                    summary: Self::compute_summary(&values),
                    group_name: level,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn three_salaries() {
        let s = StatsCalculator::compute_summary(&[100.0, 200.0, 300.0]).unwrap();
        assert_eq!(s.count, 3);
        assert!(close(s.mean, 200.0));
        assert!(close(s.median, 200.0));
        assert!(close(s.var, 10_000.0));
        assert!(close(s.std, 100.0));
    }

    #[test]
    fn median_odd_and_even() {
        let odd = StatsCalculator::compute_summary(&[30.0, 10.0, 20.0]).unwrap();
        assert_eq!(odd.median, 20.0);

        let even = StatsCalculator::compute_summary(&[40.0, 10.0, 30.0, 20.0]).unwrap();
        assert_eq!(even.median, 25.0);
    }

    #[test]
    fn single_value_is_insufficient() {
        let err = StatsCalculator::compute_summary(&[42.0]).unwrap_err();
        assert_eq!(err, InsufficientDataError { found: 1 });

        let err = StatsCalculator::compute_summary(&[]).unwrap_err();
        assert_eq!(err.found, 0);
    }

    #[test]
    fn non_finite_values_are_excluded_from_count() {
        let s = StatsCalculator::compute_summary(&[100.0, f64::NAN, 200.0, f64::INFINITY, 300.0])
            .unwrap();
        assert_eq!(s.count, 3);
        assert!(close(s.mean, 200.0));

        let err = StatsCalculator::compute_summary(&[f64::NAN, 5.0]).unwrap_err();
        assert_eq!(err.found, 1);
    }

    #[test]
    fn std_is_sqrt_of_var() {
        let samples: [&[f64]; 4] = [
            &[1.0, 2.0],
            &[5.0, 5.0, 5.0],
            &[79833.0, 260000.0, 109024.0, 20000.0, 150000.0, 72000.0],
            &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
        ];
        for values in samples {
            let s = StatsCalculator::compute_summary(values).unwrap();
            assert!(close(s.std, s.var.sqrt()), "{values:?}");
            assert!(s.var >= 0.0);
        }
    }

    #[test]
    fn input_order_does_not_change_result() {
        let a = [0.1, 1e9, 0.3, 12345.678, 7.0, 0.2];
        let mut b = a;
        b.reverse();
        let sa = StatsCalculator::compute_summary(&a).unwrap();
        let sb = StatsCalculator::compute_summary(&b).unwrap();
        assert_eq!(sa, sb);
    }
}
