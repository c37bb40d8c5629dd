use crate::percentiles;

/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency and dispersion
/// for a dataset of `f64` values. Dispersion uses the sample (n - 1)
/// estimator, so it is only defined for two or more values.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    pub median: f64,
    /// The sample variance, or `None` with fewer than two values.
    pub variance: Option<f64>,
    /// The sample standard deviation, or `None` with fewer than two values.
    pub std_dev: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    /// `NaN` values are ignored.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use loginstats_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.variance, Some(2.5));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Use this when you already have sorted data to avoid unnecessary work.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use loginstats_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[4.0]).unwrap();
    /// assert_eq!(stats.mean, 4.0);
    /// assert_eq!(stats.std_dev, None);
    ///
    /// assert!(DescriptiveStats::from_sorted(&[]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let median = percentiles::median(sorted_values)?;
        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;

        let variance = (count > 1).then(|| {
            sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0)
        });
        let std_dev = variance.map(f64::sqrt);

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_sample_standard_deviation() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert_close(stats.mean, 5.0);
        assert_close(stats.variance.unwrap(), 32.0 / 7.0);
        assert_close(stats.std_dev.unwrap(), (32.0_f64 / 7.0).sqrt());
    }

    #[test]
    fn test_even_length_median() {
        let stats = DescriptiveStats::new([10.0, 1.0, 4.0, 2.0]).unwrap();
        assert_close(stats.median, 3.0);
    }

    #[test]
    fn test_single_value_has_no_dispersion() {
        let stats = DescriptiveStats::new([42.0]).unwrap();
        assert_close(stats.mean, 42.0);
        assert_close(stats.median, 42.0);
        assert_eq!(stats.variance, None);
        assert_eq!(stats.std_dev, None);
    }

    #[test]
    fn test_nan_values_are_ignored() {
        let stats = DescriptiveStats::new([1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_close(stats.mean, 2.0);
    }

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(std::iter::empty()).is_none());
        assert!(DescriptiveStats::new([f64::NAN]).is_none());
    }
}
