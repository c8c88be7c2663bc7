use serde::Serialize;

use super::band::FrequencyBand;
use super::AlignedSample;

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// Narrative outcome of a comparison run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// One-sentence headline.
    pub narrative_summary: String,
    /// Multi-section explanation.
    pub narrative_detail: String,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.narrative_summary.is_empty() && self.narrative_detail.is_empty()
    }
}

/// Aggregate amplitude statistics over a sample sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SignalStatistics {
    pub sample_count: usize,
    pub mean_abs_signal_a: f64,
    pub mean_abs_signal_b: f64,
    pub mean_abs_difference: f64,
}

impl SignalStatistics {
    /// Means of absolute values; all zero for an empty sequence.
    pub fn from_samples(samples: &[AlignedSample]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        SignalStatistics {
            sample_count: samples.len(),
            mean_abs_signal_a: mean_abs(samples, |s| s.signal_a),
            mean_abs_signal_b: mean_abs(samples, |s| s.signal_b),
            mean_abs_difference: mean_abs(samples, |s| s.difference),
        }
    }
}

fn mean_abs(samples: &[AlignedSample], value: impl Fn(&AlignedSample) -> f64) -> f64 {
    samples.iter().map(|s| value(s).abs()).sum::<f64>() / samples.len() as f64
}

// ---------------------------------------------------------------------------
// Label counting and dominance
// ---------------------------------------------------------------------------

/// Occurrence count per classification label, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCounts {
    entries: Vec<(String, usize)>,
}

impl LabelCounts {
    /// Count both classification slots of every sample into one table.
    pub fn from_samples(samples: &[AlignedSample]) -> Self {
        let mut counts = LabelCounts::default();
        for s in samples {
            counts.add(&s.classification_a);
            counts.add(&s.classification_b);
        }
        counts
    }

    fn add(&mut self, label: &str) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => self.entries.push((label.to_string(), 1)),
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, n)| *n)
    }

    /// Labels in scan order: catalog labels in catalog order, then any other
    /// label in order of first occurrence.
    fn scan_order(&self) -> Vec<(&str, usize)> {
        let mut order: Vec<(&str, usize)> = FrequencyBand::CATALOG
            .into_iter()
            .map(FrequencyBand::state_label)
            .filter_map(|label| {
                let n = self.get(label);
                (n > 0).then_some((label, n))
            })
            .collect();
        order.extend(
            self.entries
                .iter()
                .filter(|(l, _)| FrequencyBand::from_state_label(l).is_none())
                .map(|(l, n)| (l.as_str(), *n)),
        );
        order
    }

    /// The label with the highest count; the first one in scan order wins a
    /// tie.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (label, n) in self.scan_order() {
            if best.map_or(true, |(_, best_n)| n > best_n) {
                best = Some((label, n));
            }
        }
        best.map(|(label, _)| label)
    }
}

// ---------------------------------------------------------------------------
// Narrative selection
// ---------------------------------------------------------------------------

/// Which narrative a dominant label selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantState {
    DeltaDominant,
    ThetaDominant,
    AlphaDominant,
    BetaDominant,
    GammaDominant,
    Unrecognized,
}

impl DominantState {
    /// Match the label against the band names, in catalog order.
    pub fn from_label(label: &str) -> Self {
        let band = FrequencyBand::CATALOG
            .into_iter()
            .find(|b| label.contains(b.name()));
        match band {
            Some(FrequencyBand::Delta) => Self::DeltaDominant,
            Some(FrequencyBand::Theta) => Self::ThetaDominant,
            Some(FrequencyBand::Alpha) => Self::AlphaDominant,
            Some(FrequencyBand::Beta) => Self::BetaDominant,
            Some(FrequencyBand::Gamma) => Self::GammaDominant,
            None => Self::Unrecognized,
        }
    }

    pub fn band(self) -> Option<FrequencyBand> {
        match self {
            Self::DeltaDominant => Some(FrequencyBand::Delta),
            Self::ThetaDominant => Some(FrequencyBand::Theta),
            Self::AlphaDominant => Some(FrequencyBand::Alpha),
            Self::BetaDominant => Some(FrequencyBand::Beta),
            Self::GammaDominant => Some(FrequencyBand::Gamma),
            Self::Unrecognized => None,
        }
    }
}

/// Fixed text of one band's narrative.
struct Narrative {
    headline: &'static str,
    brain_state: [&'static str; 3],
    method: &'static str,
    significance_intro: &'static str,
    significance: [&'static str; 4],
}

static DELTA: Narrative = Narrative {
    headline: "Patient shows deep sleep patterns (Delta waves), which may indicate fatigue, deep relaxation, or sedation.",
    brain_state: [
        "Delta waves are the slowest brain waves",
        "They dominate deep, dreamless sleep",
        "In an awake recording they may point to extreme fatigue or an underlying medical condition",
    ],
    method: "showing predominantly slow-wave activity characteristic of delta rhythms",
    significance_intro: "This finding may indicate:",
    significance: [
        "Deep sleep during the recording",
        "Possible fatigue or exhaustion",
        "Need for medical evaluation if recorded while awake",
        "Normal if recorded during sleep",
    ],
};

static THETA: Narrative = Narrative {
    headline: "Patient shows drowsy patterns (Theta waves), indicating light sleep, meditation, or deep relaxation.",
    brain_state: [
        "Theta waves appear during light sleep, drowsiness or deep meditation",
        "They are associated with creativity, intuition and subconscious processing",
        "They are common in the transition between wakefulness and sleep",
    ],
    method: "in which the signal consistently fell within the theta range, indicating a drowsy or meditative state",
    significance_intro: "This finding suggests:",
    significance: [
        "A relaxed, meditative state",
        "Possible drowsiness or light sleep",
        "Enhanced creativity and intuition",
        "A normal transitional brain state",
    ],
};

static ALPHA: Narrative = Narrative {
    headline: "Patient shows predominantly relaxed brain activity (Alpha waves), indicating good mental wellness and a calm state.",
    brain_state: [
        "Alpha waves occur when a person is awake but relaxed",
        "They are most prominent with the eyes closed in a peaceful state",
        "Their presence suggests good mental health and the ability to relax",
    ],
    method: "in which alpha activity was the most prevalent, indicating a relaxed, meditative state",
    significance_intro: "This is generally a positive finding, suggesting:",
    significance: [
        "Good stress management capabilities",
        "Healthy brain wave patterns",
        "Ability to achieve relaxed states",
        "Normal neurological function",
    ],
};

static BETA: Narrative = Narrative {
    headline: "Patient shows high alertness and focus (Beta waves), which may indicate active thinking, concentration, or mild stress.",
    brain_state: [
        "Beta waves occur during active, busy thinking and concentration",
        "They are normal during problem-solving and decision-making",
        "High beta activity may indicate stress, anxiety or intense focus",
    ],
    method: "in which beta patterns were the most prominent, suggesting an active, alert mental state",
    significance_intro: "This finding may indicate:",
    significance: [
        "High mental alertness and focus",
        "Possible stress or anxiety",
        "Active cognitive processing",
        "Need for relaxation techniques if excessive",
    ],
};

static GAMMA: Narrative = Narrative {
    headline: "Patient shows high cognitive activity (Gamma waves), indicating intense mental processing or focus.",
    brain_state: [
        "Gamma waves are the fastest brain waves",
        "They occur during high-level cognitive processing",
        "They are associated with consciousness, attention and learning",
    ],
    method: "showing high-frequency activity characteristic of intense cognitive processing",
    significance_intro: "This finding indicates:",
    significance: [
        "High-level cognitive function",
        "Intense concentration and focus",
        "Active learning or problem-solving",
        "Heightened awareness and attention",
    ],
};

fn narrative(band: FrequencyBand) -> &'static Narrative {
    match band {
        FrequencyBand::Delta => &DELTA,
        FrequencyBand::Theta => &THETA,
        FrequencyBand::Alpha => &ALPHA,
        FrequencyBand::Beta => &BETA,
        FrequencyBand::Gamma => &GAMMA,
    }
}

/// Render the narrative for `state`. `Unrecognized` renders as an empty
/// summary.
pub fn render(
    state: DominantState,
    stats: &SignalStatistics,
    band_a: &str,
    band_b: &str,
) -> Summary {
    let Some(band) = state.band() else {
        return Summary::default();
    };
    let text = narrative(band);

    Summary {
        narrative_summary: text.headline.to_string(),
        narrative_detail: detail_text(band, text, stats, band_a, band_b),
    }
}

fn detail_text(
    band: FrequencyBand,
    text: &Narrative,
    stats: &SignalStatistics,
    band_a: &str,
    band_b: &str,
) -> String {
    let name = band.name();
    let range = band.range();

    let mut lines = vec![
        "ANALYSIS EXPLANATION:".to_string(),
        String::new(),
        format!("{name} waves ({range}) were detected as the dominant frequency band in the compared EEG signals."),
        String::new(),
        "BRAIN STATE ANALYSIS:".to_string(),
    ];
    lines.extend(text.brain_state.iter().map(|line| format!("- {line}")));
    lines.extend([
        String::new(),
        "SIGNAL DETAILS:".to_string(),
        format!("- Mean Absolute Signal 1 Amplitude: {:.3}", stats.mean_abs_signal_a),
        format!("- Mean Absolute Signal 2 Amplitude: {:.3}", stats.mean_abs_signal_b),
        format!("- Mean Absolute Difference: {:.3}", stats.mean_abs_difference),
        format!("- Dominant Frequency Band: {name} ({range})"),
        String::new(),
        "HOW THIS WAS DETERMINED:".to_string(),
        format!(
            "The analysis examined {} data points {}. Each signal was classified by its declared frequency band ({band_a} and {band_b}).",
            stats.sample_count, text.method
        ),
        String::new(),
        "CLINICAL SIGNIFICANCE:".to_string(),
        text.significance_intro.to_string(),
    ]);
    lines.extend(text.significance.iter().map(|line| format!("- {line}")));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Summarise a complete sample sequence.
///
/// An empty sequence, or a dominant label that names no catalog band, gives
/// an empty [`Summary`].
pub fn summarize(samples: &[AlignedSample], band_a: &str, band_b: &str) -> Summary {
    if samples.is_empty() {
        return Summary::default();
    }

    let counts = LabelCounts::from_samples(samples);
    let Some(dominant) = counts.dominant() else {
        return Summary::default();
    };
    let state = DominantState::from_label(dominant);
    let stats = SignalStatistics::from_samples(samples);

    log::debug!(
        "dominant label '{dominant}' ({} of {} slots) -> {state:?}",
        counts.get(dominant),
        samples.len() * 2
    );
    if state == DominantState::Unrecognized {
        log::warn!("dominant label '{dominant}' matches no frequency band, summary left empty");
    }

    render(state, &stats, band_a, band_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(index: usize, a: f64, b: f64, label_a: &str, label_b: &str) -> AlignedSample {
        AlignedSample {
            index,
            signal_a: a,
            signal_b: b,
            difference: b - a,
            classification_a: label_a.to_string(),
            classification_b: label_b.to_string(),
        }
    }

    const ALPHA_LABEL: &str = "Relaxed/Calm (Alpha)";
    const BETA_LABEL: &str = "Alert/Focused (Beta)";
    const THETA_LABEL: &str = "Drowsy/Meditative (Theta)";

    #[test]
    fn empty_input_gives_empty_summary() {
        let summary = summarize(&[], "Alpha", "Beta");
        assert_eq!(summary, Summary::default());
        assert!(summary.is_empty());
    }

    #[test]
    fn counts_both_slots() {
        let samples = [
            sample(0, 1.0, 2.0, ALPHA_LABEL, BETA_LABEL),
            sample(1, 1.0, 2.0, ALPHA_LABEL, ALPHA_LABEL),
        ];
        let counts = LabelCounts::from_samples(&samples);
        assert_eq!(counts.get(ALPHA_LABEL), 3);
        assert_eq!(counts.get(BETA_LABEL), 1);
        assert_eq!(counts.get("Unknown"), 0);
        assert_eq!(counts.dominant(), Some(ALPHA_LABEL));
    }

    #[test]
    fn alpha_dominance_selects_alpha_narrative() {
        let samples = [
            sample(0, 1.0, -1.0, ALPHA_LABEL, ALPHA_LABEL),
            sample(1, 2.0, 3.0, ALPHA_LABEL, BETA_LABEL),
        ];
        let summary = summarize(&samples, "Alpha", "Beta");
        assert!(summary.narrative_summary.contains("Alpha"));
        assert!(summary.narrative_detail.contains("Alpha waves (8-13 Hz)"));
        assert!(summary.narrative_detail.contains("(Alpha and Beta)"));
        assert!(summary.narrative_detail.contains("examined 2 data points"));
    }

    #[test]
    fn ties_resolve_in_catalog_order() {
        // Beta is seen first, but Theta precedes it in the catalog.
        let samples = [sample(0, 0.0, 0.0, BETA_LABEL, THETA_LABEL)];
        assert_eq!(
            LabelCounts::from_samples(&samples).dominant(),
            Some(THETA_LABEL)
        );
        let summary = summarize(&samples, "Beta", "Theta");
        assert!(summary.narrative_summary.contains("Theta"));
    }

    #[test]
    fn catalog_labels_precede_unknown_on_tie() {
        let samples = [sample(0, 0.0, 0.0, "Unknown", BETA_LABEL)];
        assert_eq!(
            LabelCounts::from_samples(&samples).dominant(),
            Some(BETA_LABEL)
        );
    }

    #[test]
    fn foreign_labels_tie_by_first_occurrence() {
        let samples = [sample(0, 0.0, 0.0, "Foo", "Bar")];
        assert_eq!(LabelCounts::from_samples(&samples).dominant(), Some("Foo"));

        let samples = [sample(0, 0.0, 0.0, "Bar", "Foo")];
        assert_eq!(LabelCounts::from_samples(&samples).dominant(), Some("Bar"));
    }

    #[test]
    fn detail_has_no_trailing_newline() {
        let samples = [sample(0, 1.0, 1.0, ALPHA_LABEL, ALPHA_LABEL)];
        let detail = summarize(&samples, "Alpha", "Alpha").narrative_detail;
        assert!(detail.starts_with("ANALYSIS EXPLANATION:\n\nAlpha waves (8-13 Hz)"));
        assert!(detail.ends_with("- Normal neurological function"));
    }

    #[test]
    fn unknown_dominance_leaves_summary_empty() {
        let samples = [
            sample(0, 1.0, 2.0, "Unknown", "Unknown"),
            sample(1, 1.0, 2.0, "Unknown", ALPHA_LABEL),
        ];
        assert_eq!(summarize(&samples, "Mu", "Alpha"), Summary::default());
    }

    #[test]
    fn statistics_use_absolute_values() {
        let samples = [
            sample(0, -1.0, 1.0, ALPHA_LABEL, ALPHA_LABEL),
            sample(1, 3.0, -3.0, ALPHA_LABEL, ALPHA_LABEL),
        ];
        let stats = SignalStatistics::from_samples(&samples);
        assert_eq!(stats.sample_count, 2);
        assert_eq!(stats.mean_abs_signal_a, 2.0);
        assert_eq!(stats.mean_abs_signal_b, 2.0);
        assert_eq!(stats.mean_abs_difference, 4.0);

        let detail = summarize(&samples, "Alpha", "Alpha").narrative_detail;
        assert!(detail.contains("Mean Absolute Signal 1 Amplitude: 2.000"));
        assert!(detail.contains("Mean Absolute Difference: 4.000"));
    }

    #[test]
    fn every_band_has_a_narrative() {
        for band in FrequencyBand::CATALOG {
            let label = band.state_label();
            let samples = [sample(0, 1.0, 1.0, label, label)];
            let summary = summarize(&samples, band.name(), band.name());
            assert!(summary.narrative_summary.contains(band.name()));
            assert!(summary.narrative_detail.contains(band.range()));
            assert!(summary.narrative_detail.contains("CLINICAL SIGNIFICANCE:"));
        }
    }

    #[test]
    fn dominant_state_matches_band_substring() {
        assert_eq!(
            DominantState::from_label("Deep Sleep (Delta)"),
            DominantState::DeltaDominant
        );
        assert_eq!(
            DominantState::from_label("something Gamma-ish"),
            DominantState::GammaDominant
        );
        assert_eq!(
            DominantState::from_label("Unknown"),
            DominantState::Unrecognized
        );
    }

    #[test]
    fn summary_is_deterministic() {
        let samples = [
            sample(0, 0.25, 0.5, BETA_LABEL, ALPHA_LABEL),
            sample(1, 0.75, 0.5, BETA_LABEL, ALPHA_LABEL),
        ];
        assert_eq!(
            summarize(&samples, "Beta", "Alpha"),
            summarize(&samples, "Beta", "Alpha")
        );
    }
}
