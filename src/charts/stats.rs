//! Small descriptive statistics shared by the descriptors and the native plots.

use std::collections::BTreeMap;

use super::figure::Bins;

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Choose bins for `values`: Sturges' bin count, widened to a 1/2/5 step and
/// aligned so that every value falls in exactly one half-open bin.
///
/// `None` for an empty (or entirely non-finite) input.
pub fn auto_bins(values: &[f64]) -> Option<Bins> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })?;

    let sturges = (values.len() as f64).log2().ceil() + 1.0;
    let raw = (max - min) / sturges;
    let size = if raw > 0.0 { nice_step(raw) } else { 1.0 };

    // Steps like 0.1 are inexact, so the rounded edges are nudged until
    // `[start, end)` really contains `min` and `max`.
    let mut start = (min / size).floor() * size;
    while start > min {
        start -= size;
    }
    let mut n = ((max - start) / size).floor() + 1.0;
    while start + n * size <= max {
        n += 1.0;
    }
    Some(Bins {
        start,
        end: start + n * size,
        size,
    })
}

/// Smallest of 1, 2, 5 × 10^k that is ≥ `raw`.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw)
        .unwrap_or(10.0 * magnitude)
}

/// Frequencies of `values` per bin. Values outside `[start, end)` are ignored.
pub fn histogram_counts(values: &[f64], bins: &Bins) -> Vec<u64> {
    let mut counts = vec![0; bins.count()];
    let Some(last) = counts.len().checked_sub(1) else {
        return counts;
    };
    for &v in values {
        if !(v >= bins.start && v < bins.end) {
            continue;
        }
        let idx = ((v - bins.start) / bins.size).floor() as usize;
        counts[idx.min(last)] += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Box plot summary
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

impl BoxSummary {
    /// Quartiles by linear interpolation; whiskers reach the most extreme
    /// values within 1.5 × IQR of the box. `None` for an empty input.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let lower_whisker = sorted.iter().copied().find(|&v| v >= lo_fence).unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().copied().find(|&v| v <= hi_fence).unwrap_or(q3);

        Some(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
        })
    }
}

/// Linear-interpolated quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Categorical grouping
// ---------------------------------------------------------------------------

/// Group values by category, categories sorted.
pub fn group_by<'a, T, K, V>(items: &[&'a T], key: K, value: V) -> BTreeMap<&'a str, Vec<f64>>
where
    K: Fn(&'a T) -> &'a str,
    V: Fn(&T) -> f64,
{
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for &item in items {
        groups.entry(key(item)).or_default().push(value(item));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_every_value() {
        let values = [61.0, 72.5, 88.0, 95.0, 101.0, 140.0, 99.9];
        let bins = auto_bins(&values).unwrap();
        assert!(bins.start <= 61.0);
        assert!(bins.end > 140.0);
        let counts = histogram_counts(&values, &bins);
        assert_eq!(counts.len(), bins.count());
        assert_eq!(counts.iter().sum::<u64>(), values.len() as u64);
    }

    #[test]
    fn inexact_steps_still_cover_both_ends() {
        for values in [[1.8, 1.67], [2.83, 2.8], [0.3, 0.1], [60.2, 60.0]] {
            let bins = auto_bins(&values).unwrap();
            assert!(bins.start <= values[0].min(values[1]), "{values:?}: {bins:?}");
            assert!(bins.end > values[0].max(values[1]), "{values:?}: {bins:?}");
            let counts = histogram_counts(&values, &bins);
            assert_eq!(counts.len(), bins.count(), "{values:?}");
            assert_eq!(counts.iter().sum::<u64>(), 2, "{values:?}");
        }
    }

    #[test]
    fn values_on_the_last_edge_land_in_the_last_bin() {
        let bins = Bins { start: 0.0, end: 0.30000000000000004, size: 0.1 };
        assert_eq!(bins.count(), 3);
        assert_eq!(histogram_counts(&[0.3, 0.0], &bins), vec![1, 0, 1]);
    }

    #[test]
    fn bin_width_is_a_nice_step() {
        // range 40 over 4 Sturges bins → raw 10
        let values = [60.0, 70.0, 80.0, 90.0, 100.0];
        let bins = auto_bins(&values).unwrap();
        assert_eq!(bins.size, 10.0);
        assert_eq!(bins.start, 60.0);
        assert_eq!(bins.end, 110.0);
        assert_eq!(histogram_counts(&values, &bins), vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn constant_values_get_a_unit_bin() {
        let bins = auto_bins(&[72.0, 72.0]).unwrap();
        assert_eq!(bins, Bins { start: 72.0, end: 73.0, size: 1.0 });
        assert_eq!(histogram_counts(&[72.0, 72.0], &bins), vec![2]);
    }

    #[test]
    fn empty_input_has_no_bins() {
        assert!(auto_bins(&[]).is_none());
        assert!(auto_bins(&[f64::NAN]).is_none());
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.3), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(10.0), 10.0);
    }

    #[test]
    fn box_summary_interpolates_quartiles() {
        let s = BoxSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!((s.q1, s.median, s.q3), (2.0, 3.0, 4.0));
        assert_eq!((s.lower_whisker, s.upper_whisker), (1.0, 5.0));

        let s = BoxSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q1, 1.75);
    }

    #[test]
    fn whiskers_exclude_outliers() {
        let s = BoxSummary::from_values(&[10.0, 11.0, 12.0, 13.0, 14.0, 100.0]).unwrap();
        assert_eq!(s.upper_whisker, 14.0);
        assert_eq!(s.lower_whisker, 10.0);
    }

    #[test]
    fn single_value_box_is_degenerate() {
        let s = BoxSummary::from_values(&[42.0]).unwrap();
        assert_eq!(s.lower_whisker, 42.0);
        assert_eq!(s.upper_whisker, 42.0);
        assert!(BoxSummary::from_values(&[]).is_none());
    }

    #[test]
    fn grouping_sorts_categories() {
        let items = [("walk", 1.0), ("run", 2.0), ("walk", 3.0)];
        let refs: Vec<&(&str, f64)> = items.iter().collect();
        let groups = group_by(&refs, |t| t.0, |t| t.1);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["run", "walk"]);
        assert_eq!(groups["walk"], vec![1.0, 3.0]);
    }
}
