use anyhow::{Context, Result};
use serde::Serialize;

use super::series::{describe, SeriesStats};
use super::summary::{SignalStatistics, Summary};
use super::{AlignedSample, SignalSelection};

// ---------------------------------------------------------------------------
// Tabular export
// ---------------------------------------------------------------------------

/// Render the comparison as comma-separated text.
///
/// Header: `Index,<channel A> (<band A>),Emotion 1,<channel B> (<band B>),Emotion 2,Difference`,
/// then one line per sample with numbers at four decimals. Fields are not
/// quoted, so channel and band names must not contain commas. No trailing
/// newline.
pub fn export_table(
    samples: &[AlignedSample],
    selection_a: &SignalSelection,
    selection_b: &SignalSelection,
) -> String {
    let header = [
        "Index".to_string(),
        format!("{} ({})", selection_a.column, selection_a.band),
        "Emotion 1".to_string(),
        format!("{} ({})", selection_b.column, selection_b.band),
        "Emotion 2".to_string(),
        "Difference".to_string(),
    ]
    .join(",");

    let mut lines = Vec::with_capacity(samples.len() + 1);
    lines.push(header);
    for s in samples {
        lines.push(format!(
            "{},{:.4},{},{:.4},{},{:.4}",
            s.index, s.signal_a, s.classification_a, s.signal_b, s.classification_b, s.difference
        ));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// JSON report
// ---------------------------------------------------------------------------

/// Mean / standard deviation of each plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesDescription {
    pub signal_a: SeriesStats,
    pub signal_b: SeriesStats,
    pub difference: SeriesStats,
}

impl SeriesDescription {
    pub fn from_samples(samples: &[AlignedSample]) -> Self {
        SeriesDescription {
            signal_a: describe(&column(samples, |s| s.signal_a)),
            signal_b: describe(&column(samples, |s| s.signal_b)),
            difference: describe(&column(samples, |s| s.difference)),
        }
    }
}

fn column(samples: &[AlignedSample], value: impl Fn(&AlignedSample) -> f64) -> Vec<f64> {
    samples.iter().map(value).collect()
}

/// Everything one run produced, as written by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub selection_a: &'a SignalSelection,
    pub selection_b: &'a SignalSelection,
    pub statistics: SignalStatistics,
    pub series: SeriesDescription,
    pub summary: &'a Summary,
    pub samples: &'a [AlignedSample],
}

impl<'a> Report<'a> {
    pub fn new(
        samples: &'a [AlignedSample],
        summary: &'a Summary,
        selection_a: &'a SignalSelection,
        selection_b: &'a SignalSelection,
    ) -> Self {
        Report {
            selection_a,
            selection_b,
            statistics: SignalStatistics::from_samples(samples),
            series: SeriesDescription::from_samples(samples),
            summary,
            samples,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing report")
    }
}
