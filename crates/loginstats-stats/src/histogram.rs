use std::ops::Range;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range into equally wide bins and counts the
/// frequency of values falling into each bin. Bins are laid out on a grid of
/// multiples of the bin width (optionally anchored at an origin) so that bin
/// boundaries land on round numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
///
/// Each bin represents a range of values and the count of data points falling within that range.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with bins of a fixed width.
    ///
    /// The first bin starts at the largest grid point not above the smallest
    /// value. With an `origin`, the grid is anchored at that point and the
    /// first bin never starts after it; without one the grid is anchored at
    /// zero. Bins continue until the largest value is covered.
    ///
    /// Non-finite values are ignored. An empty dataset or a non-positive bin width
    /// yields a histogram without bins.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from.
    /// * `bin_width` - The width of every bin.
    /// * `origin` - Optional grid anchor that the histogram must include.
    ///
    /// # Examples
    ///
    /// ```
    /// # use loginstats_stats::histogram::Histogram;
    /// let histogram = Histogram::with_bin_width([1.0, 2.0, 2.0, 4.0], 1.0, None);
    /// let counts = histogram.bins.iter().map(|bin| bin.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [1, 2, 0, 1]);
    /// assert_eq!(histogram.bins[0].range, 1.0..2.0);
    ///
    /// let histogram = Histogram::with_bin_width([5.5, 9.0], 4.0, Some(0.0));
    /// assert_eq!(histogram.bins[0].range, 0.0..4.0);
    /// assert_eq!(histogram.bins.len(), 3);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn with_bin_width<I>(values: I, bin_width: f64, origin: Option<f64>) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        if values.is_empty() || !bin_width.is_finite() || bin_width <= 0.0 {
            return Self { bins: vec![] };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let anchor = origin.unwrap_or(0.0);
        let mut start = anchor + ((min - anchor) / bin_width).floor() * bin_width;
        if let Some(origin) = origin {
            start = start.min(origin);
        }

        let num_bins = ((max - start) / bin_width).floor() as usize + 1;
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                // Recompute boundaries from the index to avoid accumulating rounding errors
                range: start + idx as f64 * bin_width..start + (idx + 1) as f64 * bin_width,
                count: 0,
            })
            .collect::<Vec<_>>();

        for val in values {
            let idx = (((val - start) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Returns the largest bin count, or zero for an empty histogram.
    ///
    /// ```
    /// # use loginstats_stats::histogram::Histogram;
    /// let histogram = Histogram::with_bin_width([1.0, 1.0, 3.0], 1.0, None);
    /// assert_eq!(histogram.max_count(), 2);
    /// ```
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Returns the covered value range, from the start of the first bin to the
    /// end of the last one.
    #[must_use]
    pub fn span(&self) -> Option<Range<f64>> {
        let first = self.bins.first()?;
        let last = self.bins.last()?;
        Some(first.range.start..last.range.end)
    }

    /// Total number of values counted across all bins.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(histogram: &Histogram) -> Vec<u64> {
        histogram.bins.iter().map(|bin| bin.count).collect()
    }

    #[test]
    fn test_unit_bins_start_at_minimum() {
        let histogram = Histogram::with_bin_width([3.0, 5.0, 5.0, 6.0], 1.0, None);
        assert_eq!(histogram.span(), Some(3.0..7.0));
        assert_eq!(counts(&histogram), [1, 0, 2, 1]);
    }

    #[test]
    fn test_duration_bins_include_origin() {
        let histogram = Histogram::with_bin_width([10.5, 13.0, 22.0], 4.0, Some(0.0));
        assert_eq!(histogram.span(), Some(0.0..24.0));
        assert_eq!(counts(&histogram), [0, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_value_on_multiple_of_width_opens_new_bin() {
        let histogram = Histogram::with_bin_width([8.0], 4.0, Some(0.0));
        assert_eq!(histogram.bins.len(), 3);
        assert_eq!(histogram.bins[2].range, 8.0..12.0);
        assert_eq!(histogram.bins[2].count, 1);
    }

    #[test]
    fn test_negative_values_extend_below_origin() {
        let histogram = Histogram::with_bin_width([-3.0, 1.0], 4.0, Some(0.0));
        assert_eq!(histogram.span(), Some(-4.0..4.0));
        assert_eq!(counts(&histogram), [1, 1]);
    }

    #[test]
    fn test_every_value_is_counted() {
        let values = [0.25, 1.5, 2.75, 3.999, 4.0, 17.3, 17.3];
        let histogram = Histogram::with_bin_width(values, 4.0, Some(0.0));
        assert_eq!(histogram.total(), values.len() as u64);
        for bin in &histogram.bins {
            let expected = values.iter().filter(|v| bin.range.contains(*v)).count() as u64;
            assert_eq!(bin.count, expected, "bin {:?}", bin.range);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(Histogram::with_bin_width([], 1.0, None).bins.is_empty());
        assert!(Histogram::with_bin_width([1.0], 0.0, None).bins.is_empty());
        assert!(Histogram::with_bin_width([f64::NAN], 1.0, None).bins.is_empty());
        assert_eq!(Histogram::with_bin_width([], 1.0, None).span(), None);
    }
}
