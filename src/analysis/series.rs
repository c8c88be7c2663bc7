use serde::Serialize;

use super::AlignedSample;

/// Half-width of the moving-average window used for chart series.
pub const DEFAULT_SMOOTHING: usize = 5;

/// Headroom applied to the symmetric y-axis range.
const Y_HEADROOM: f64 = 1.2;

// ---------------------------------------------------------------------------
// Smoothing
// ---------------------------------------------------------------------------

/// Centred moving average over `[i - window, i + window]`, clamped to the
/// slice bounds. `window == 0` returns the input unchanged.
pub fn smooth(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(window);
            let hi = (i + window).min(values.len() - 1);
            let span = &values[lo..=hi];
            span.iter().sum::<f64>() / span.len() as f64
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Smoothed series ready to hand to a line-chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub signal_a: Vec<f64>,
    pub signal_b: Vec<f64>,
    pub difference: Vec<f64>,
    /// Symmetric around zero: `y_min == -y_max`.
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartSeries {
    pub fn from_samples(samples: &[AlignedSample], window: usize) -> Self {
        let signal_a = smooth(&samples.iter().map(|s| s.signal_a).collect::<Vec<_>>(), window);
        let signal_b = smooth(&samples.iter().map(|s| s.signal_b).collect::<Vec<_>>(), window);
        let difference = smooth(
            &samples.iter().map(|s| s.difference).collect::<Vec<_>>(),
            window,
        );

        let max_abs = signal_a
            .iter()
            .chain(&signal_b)
            .chain(&difference)
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));

        ChartSeries {
            signal_a,
            signal_b,
            difference,
            y_min: -max_abs * Y_HEADROOM,
            y_max: max_abs * Y_HEADROOM,
        }
    }

    pub fn len(&self) -> usize {
        self.signal_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal_a.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Mean and population standard deviation of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub std: f64,
}

/// Describe a series; an empty series describes as all zeros.
pub fn describe(values: &[f64]) -> SeriesStats {
    if values.is_empty() {
        return SeriesStats::default();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    SeriesStats {
        mean,
        std: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_clamps_at_edges() {
        let smoothed = smooth(&[0.0, 3.0, 6.0, 9.0], 1);
        assert_eq!(smoothed, vec![1.5, 3.0, 6.0, 7.5]);
    }

    #[test]
    fn zero_window_is_identity() {
        let values = [1.0, -2.0, 5.5];
        assert_eq!(smooth(&values, 0), values.to_vec());
        assert!(smooth(&[], 3).is_empty());
    }

    #[test]
    fn chart_range_is_symmetric() {
        let samples: Vec<AlignedSample> = [(1.0, -4.0), (2.0, 0.0)]
            .iter()
            .enumerate()
            .map(|(index, &(a, b))| AlignedSample {
                index,
                signal_a: a,
                signal_b: b,
                difference: b - a,
                classification_a: String::new(),
                classification_b: String::new(),
            })
            .collect();
        let chart = ChartSeries::from_samples(&samples, 0);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.y_max, 5.0 * 1.2);
        assert_eq!(chart.y_min, -chart.y_max);
    }

    #[test]
    fn describes_population_statistics() {
        let stats = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std, 2.0);
        assert_eq!(describe(&[]), SeriesStats::default());
    }
}
