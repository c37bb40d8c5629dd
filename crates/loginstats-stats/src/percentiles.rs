/// Computes a single percentile value from sorted data.
///
/// This function uses linear interpolation between the two closest ranks.
/// For a dataset with n values, the k-th percentile sits at the fractional
/// position `(n - 1) * k / 100`; the result is interpolated between the values
/// on either side of that position.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0.0 to 100.0)
///
/// # Returns
///
/// The value at the specified percentile, or `None` if the input is empty.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// use loginstats_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), Some(2.5));
/// assert_eq!(compute_percentile(&values, 0.0), Some(1.0));
/// assert_eq!(compute_percentile(&values, 100.0), Some(4.0));
/// assert_eq!(compute_percentile(&[], 50.0), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );

    let last = sorted_values.len().checked_sub(1)?;
    let position = (last as f64 * percentile.clamp(0.0, 100.0)) / 100.0;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    let low = sorted_values[lower];
    let high = sorted_values[upper.min(last)];
    Some(low + (high - low) * fraction)
}

/// Computes the median of sorted data.
///
/// For an even number of values this is the mean of the two middle values.
///
/// ```
/// use loginstats_stats::percentiles::median;
///
/// assert_eq!(median(&[1.0, 3.0, 10.0]), Some(3.0));
/// assert_eq!(median(&[1.0, 3.0, 10.0, 20.0]), Some(6.5));
/// ```
#[must_use]
pub fn median(sorted_values: &[f64]) -> Option<f64> {
    compute_percentile(sorted_values, 50.0)
}
