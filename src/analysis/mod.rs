/// Analysis layer: alignment, classification, aggregation and export.
///
/// ```text
///   rows A ──┐
///            ├─► align ─► classify (per sample) ─► Vec<AlignedSample>
///   rows B ──┘                                          │
///                                    ┌──────────────────┼───────────────┐
///                                    ▼                  ▼               ▼
///                               summarize          export_table     ChartSeries
/// ```
pub mod align;
pub mod band;
pub mod export;
pub mod series;
pub mod summary;

use serde::Serialize;

use crate::data::model::Row;

use self::align::align;
use self::band::{classify, FrequencyBand};

// ---------------------------------------------------------------------------
// AlignedSample – one row of the comparison
// ---------------------------------------------------------------------------

/// One position-matched comparison record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedSample {
    pub index: usize,
    pub signal_a: f64,
    pub signal_b: f64,
    /// Always `signal_b - signal_a`.
    pub difference: f64,
    pub classification_a: String,
    pub classification_b: String,
}

// ---------------------------------------------------------------------------
// SignalSelection – what the user picked for one recording
// ---------------------------------------------------------------------------

/// Channel and declared frequency band chosen for one recording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalSelection {
    pub column: String,
    pub band: String,
}

impl SignalSelection {
    pub fn new(column: impl Into<String>, band: impl Into<String>) -> Self {
        SignalSelection {
            column: column.into(),
            band: band.into(),
        }
    }

    /// Whether both the channel and the band have been chosen.
    pub fn is_complete(&self) -> bool {
        !self.column.is_empty() && !self.band.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pipeline entry-point
// ---------------------------------------------------------------------------

/// Align two recordings and classify every sample in a single pass.
///
/// The result has `min(rows_a.len(), rows_b.len())` samples. Never fails:
/// missing or non-numeric cells read as `0.0` and unknown bands classify as
/// `"Unknown"`.
pub fn compute_aligned_samples(
    rows_a: &[Row],
    column_a: &str,
    rows_b: &[Row],
    column_b: &str,
    band_a: &str,
    band_b: &str,
) -> Vec<AlignedSample> {
    if rows_a.len() != rows_b.len() {
        log::debug!(
            "recordings differ in length ({} vs {}), truncating to {}",
            rows_a.len(),
            rows_b.len(),
            rows_a.len().min(rows_b.len())
        );
    }
    for band in [band_a, band_b] {
        if let Err(err) = band.parse::<FrequencyBand>() {
            log::warn!("{err}, samples classify as Unknown");
        }
    }

    let samples: Vec<AlignedSample> = align(rows_a, column_a, rows_b, column_b)
        .map(|pair| AlignedSample {
            index: pair.index,
            signal_a: pair.signal_a,
            signal_b: pair.signal_b,
            difference: pair.signal_b - pair.signal_a,
            classification_a: classify(pair.signal_a, band_a).label.to_string(),
            classification_b: classify(pair.signal_b, band_b).label.to_string(),
        })
        .collect();

    log::debug!("computed {} aligned samples", samples.len());
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn rows(column: &str, values: &[f64]) -> Vec<Row> {
        values
            .iter()
            .map(|v| Row::from([(column.to_string(), CellValue::Number(*v))]))
            .collect()
    }

    #[test]
    fn difference_is_b_minus_a() {
        let a = rows("ch", &[0.1, -7.3, 1e-9]);
        let b = rows("ch", &[0.2, 4.4, 3.0, 9.0]);
        let samples = compute_aligned_samples(&a, "ch", &b, "ch", "Beta", "Gamma");
        assert_eq!(samples.len(), 3);
        for s in &samples {
            assert_eq!(s.difference, s.signal_b - s.signal_a);
            assert_eq!(s.classification_a, "Alert/Focused (Beta)");
            assert_eq!(s.classification_b, "Cognitive/Active (Gamma)");
        }
    }

    #[test]
    fn unknown_band_labels_samples_unknown() {
        let a = rows("ch", &[1.0]);
        let samples = compute_aligned_samples(&a, "ch", &a, "ch", "Mu", "Alpha");
        assert_eq!(samples[0].classification_a, "Unknown");
        assert_eq!(samples[0].classification_b, "Relaxed/Calm (Alpha)");
    }

    #[test]
    fn selection_completeness() {
        assert!(SignalSelection::new("Fp1", "Alpha").is_complete());
        assert!(!SignalSelection::new("", "Alpha").is_complete());
        assert!(!SignalSelection::new("Fp1", "").is_complete());
        assert!(!SignalSelection::default().is_complete());
    }
}
