//! Severity bands for similarity scores
//!
//! The on-screen gauge and the generated report both color the similarity
//! bar through [`classify`], so the two can never drift apart.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Components scaled to the 0-1 range used by PDF color operators
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }

    /// CSS hex notation, e.g. `#d93030`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Parse `#RRGGBB` or `RRGGBB`
    pub fn from_hex(color: &str) -> Option<Rgb> {
        let hex = color.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb(r, g, b))
    }
}

/// Verdict color for "Plagiarism Detected"
pub const PLAGIARIZED_COLOR: Rgb = Rgb(0xd3, 0x2f, 0x2f);
/// Verdict color for "Original Content"
pub const ORIGINAL_COLOR: Rgb = Rgb(0x2e, 0x7d, 0x32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Low,
    Moderate,
    High,
    Critical,
}

impl SeverityBand {
    /// Gauge fill color shared by the report and the result panel
    pub fn color(self) -> Rgb {
        match self {
            SeverityBand::Critical => Rgb(217, 48, 48),
            SeverityBand::High => Rgb(245, 158, 11),
            SeverityBand::Moderate => Rgb(245, 185, 11),
            SeverityBand::Low => Rgb(46, 125, 50),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SeverityBand::Critical => "critical",
            SeverityBand::High => "high",
            SeverityBand::Moderate => "moderate",
            SeverityBand::Low => "low",
        }
    }
}

/// Convert a similarity fraction to a percent.
///
/// Multiplying by 100 leaves binary noise (`0.57 * 100.0` is
/// `56.99999999999999`); anything below 1e-9 is rounded away so that a
/// fraction and its percent classify identically.
pub fn normalize_percent(fraction: f64) -> f64 {
    let percent = fraction * 100.0;
    (percent * 1e9).round() / 1e9
}

/// Integer percent printed next to gauges and in tables
pub fn rounded_percent(fraction: f64) -> u32 {
    let percent = normalize_percent(fraction);
    if percent.is_nan() {
        return 0;
    }
    percent.round().clamp(0.0, 100.0) as u32
}

/// Classify a similarity percent (0-100).
///
/// Upper bounds are inclusive: exactly 80 is `High`, exactly 60 is
/// `Moderate`, exactly 40 is `Low`. NaN classifies as `Low`.
pub fn classify(similarity_percent: f64) -> SeverityBand {
    if similarity_percent > 80.0 {
        SeverityBand::Critical
    } else if similarity_percent > 60.0 {
        SeverityBand::High
    } else if similarity_percent > 40.0 {
        SeverityBand::Moderate
    } else {
        SeverityBand::Low
    }
}

/// Classify a raw similarity fraction (0-1)
pub fn classify_fraction(similarity: f64) -> SeverityBand {
    classify(normalize_percent(similarity))
}
