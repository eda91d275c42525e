use std::ops::Range;

/// A histogram representation of a dataset's distribution.
///
/// The data range `[min, max]` is split into equal-width bins. Every bin is
/// half-open except the last one, which also includes `max`, so every value
/// is counted exactly once.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
///
/// Each bin represents a range of values and the count of data points falling within that range.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl HistogramBin {
    /// Midpoint of the bin's range.
    #[must_use]
    pub fn center(&self) -> f64 {
        f64::midpoint(self.range.start, self.range.end)
    }

    /// Width of the bin's range.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.range.end - self.range.start
    }
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from. Will be sorted internally.
    /// * `num_bins` - The number of equal-width bins to create.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ewsurv_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 3);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [3, 3, 4]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, num_bins)
    }

    /// Creates a histogram from pre-sorted values.
    ///
    /// When all values are equal the histogram spans `[value - 0.5, value + 0.5]`.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&first), Some(&last)) = (sorted_values.first(), sorted_values.last()) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let (min, max) = if last - first > 0.0 {
            (first, last)
        } else {
            (first - 0.5, last + 0.5)
        };
        let span = max - min;

        // Recompute each edge from the bin index to avoid accumulated rounding error
        let edge = |idx: usize| min + span * (idx as f64) / (num_bins as f64);
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                range: edge(idx)..edge(idx + 1),
                count: 0,
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            let position = (val - min) * num_bins as f64 / span;
            let idx = (position.floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Largest bin count, or 0 for an empty histogram.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Bin counts divided by the largest bin count, so the tallest bar is 1.0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ewsurv_stats::histogram::Histogram;
    /// let histogram = Histogram::new([1.0, 1.0, 1.5, 3.0], 2);
    /// assert_eq!(histogram.scaled_counts(), [1.0, 1.0 / 3.0]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn scaled_counts(&self) -> Vec<f64> {
        let max = self.max_count();
        if max == 0 {
            return vec![0.0; self.bins.len()];
        }
        self.bins
            .iter()
            .map(|b| b.count as f64 / max as f64)
            .collect()
    }
}
