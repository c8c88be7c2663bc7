use std::fmt;

use palette::Srgb;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Colour hint attached to a classification
// ---------------------------------------------------------------------------

/// An sRGB colour that renderers use to paint a classification.
///
/// Displays and serializes as an upper-case `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorHint(pub Srgb<u8>);

impl ColorHint {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        ColorHint(Srgb::new(red, green, blue))
    }

    /// Neutral grey used for unclassified samples.
    pub fn neutral() -> Self {
        ColorHint::rgb(0x6B, 0x72, 0x80)
    }
}

impl fmt::Display for ColorHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        write!(f, "#{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
    }
}

impl Serialize for ColorHint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
