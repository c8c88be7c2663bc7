use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::color::ColorHint;

// ============================================================================
// Frequency band catalog
// ============================================================================

/// The five canonical EEG frequency bands a channel can be declared as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FrequencyBand {
    /// Delta: 0.5-4 Hz (deep sleep)
    Delta,
    /// Theta: 4-8 Hz (drowsiness, meditation)
    Theta,
    /// Alpha: 8-13 Hz (relaxed wakefulness)
    Alpha,
    /// Beta: 13-30 Hz (alert, focused)
    Beta,
    /// Gamma: 30+ Hz (high-level cognition)
    Gamma,
}

impl FrequencyBand {
    /// The full catalog in canonical order. Dominance ties are broken by
    /// this order.
    pub const CATALOG: [Self; 5] = [
        Self::Delta,
        Self::Theta,
        Self::Alpha,
        Self::Beta,
        Self::Gamma,
    ];

    /// Display name, also the label users select.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Delta => "Delta",
            Self::Theta => "Theta",
            Self::Alpha => "Alpha",
            Self::Beta => "Beta",
            Self::Gamma => "Gamma",
        }
    }

    /// Human-readable frequency range.
    #[inline]
    #[must_use]
    pub const fn range(self) -> &'static str {
        match self {
            Self::Delta => "0.5-4 Hz",
            Self::Theta => "4-8 Hz",
            Self::Alpha => "8-13 Hz",
            Self::Beta => "13-30 Hz",
            Self::Gamma => "30+ Hz",
        }
    }

    /// One-line description of the associated brain state.
    #[inline]
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Delta => "Deep Sleep",
            Self::Theta => "Drowsy/Meditative",
            Self::Alpha => "Relaxed/Calm",
            Self::Beta => "Alert/Focused",
            Self::Gamma => "Cognitive/Active",
        }
    }

    /// Classification label assigned to samples declared in this band.
    #[inline]
    #[must_use]
    pub const fn state_label(self) -> &'static str {
        match self {
            Self::Delta => "Deep Sleep (Delta)",
            Self::Theta => "Drowsy/Meditative (Theta)",
            Self::Alpha => "Relaxed/Calm (Alpha)",
            Self::Beta => "Alert/Focused (Beta)",
            Self::Gamma => "Cognitive/Active (Gamma)",
        }
    }

    /// Lower-case category key.
    #[inline]
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            Self::Delta => "delta",
            Self::Theta => "theta",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
        }
    }

    #[must_use]
    pub fn color_hint(self) -> ColorHint {
        match self {
            Self::Delta => ColorHint::rgb(0x8B, 0x5C, 0xF6),
            Self::Theta => ColorHint::rgb(0x06, 0xB6, 0xD4),
            Self::Alpha => ColorHint::rgb(0x10, 0xB9, 0x81),
            Self::Beta => ColorHint::rgb(0xF5, 0x9E, 0x0B),
            Self::Gamma => ColorHint::rgb(0xEF, 0x44, 0x44),
        }
    }

    /// Look a band up by its exact display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::CATALOG.into_iter().find(|b| b.name() == name)
    }

    /// Band whose classification label is exactly `label`.
    pub fn from_state_label(label: &str) -> Option<Self> {
        Self::CATALOG.into_iter().find(|b| b.state_label() == label)
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a band name is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown frequency band '{0}' (expected one of Delta, Theta, Alpha, Beta, Gamma)")]
pub struct UnknownBand(pub String);

impl FromStr for FrequencyBand {
    type Err = UnknownBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownBand(s.to_string()))
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Result of classifying one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub label: &'static str,
    pub category: &'static str,
    pub color_hint: ColorHint,
}

impl Classification {
    pub fn unknown() -> Self {
        Classification {
            label: "Unknown",
            category: "unknown",
            color_hint: ColorHint::neutral(),
        }
    }
}

impl From<FrequencyBand> for Classification {
    fn from(band: FrequencyBand) -> Self {
        Classification {
            label: band.state_label(),
            category: band.category(),
            color_hint: band.color_hint(),
        }
    }
}

/// Classify a sample by its declared band.
///
/// The lookup is keyed on `band` alone; the sample value does not influence
/// the outcome. Names outside the catalog classify as
/// [`Classification::unknown`].
pub fn classify(_value: f64, band: &str) -> Classification {
    FrequencyBand::from_name(band)
        .map(Classification::from)
        .unwrap_or_else(Classification::unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_bands_in_order() {
        let names: Vec<_> = FrequencyBand::CATALOG.iter().map(|b| b.name()).collect();
        assert_eq!(names, ["Delta", "Theta", "Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn classifies_each_catalog_band() {
        let c = classify(3.2, "Alpha");
        assert_eq!(c.label, "Relaxed/Calm (Alpha)");
        assert_eq!(c.category, "alpha");
        assert_eq!(c.color_hint.to_string(), "#10B981");

        assert_eq!(classify(0.0, "Delta").label, "Deep Sleep (Delta)");
        assert_eq!(classify(0.0, "Theta").label, "Drowsy/Meditative (Theta)");
        assert_eq!(classify(0.0, "Beta").label, "Alert/Focused (Beta)");
        assert_eq!(classify(0.0, "Gamma").label, "Cognitive/Active (Gamma)");
    }

    #[test]
    fn value_magnitude_is_ignored() {
        assert_eq!(classify(-1e9, "Beta"), classify(1e9, "Beta"));
        assert_eq!(classify(f64::NAN, "Beta").label, "Alert/Focused (Beta)");
    }

    #[test]
    fn unknown_band_yields_sentinel() {
        for band in ["Mu", "", "alpha", "Alpha "] {
            let c = classify(1.0, band);
            assert_eq!(c.label, "Unknown");
            assert_eq!(c.category, "unknown");
            assert_eq!(c.color_hint.to_string(), "#6B7280");
        }
    }

    #[test]
    fn parses_band_names() {
        assert_eq!("Gamma".parse::<FrequencyBand>(), Ok(FrequencyBand::Gamma));
        assert!("gamma".parse::<FrequencyBand>().is_err());
        assert_eq!(
            FrequencyBand::from_state_label("Drowsy/Meditative (Theta)"),
            Some(FrequencyBand::Theta)
        );
    }
}
