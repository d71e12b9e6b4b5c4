//! View model for the on-screen result panel
//!
//! The gauge color comes from the same [`classify_fraction`] the report
//! uses. Theme is passed in by the caller.

use crate::layout::{VERDICT_ORIGINAL, VERDICT_PLAGIARIZED};
use crate::severity::{
    classify_fraction, rounded_percent, Rgb, SeverityBand, ORIGINAL_COLOR, PLAGIARIZED_COLOR,
};
use crate::types::SimilarityResult;
use serde::{Deserialize, Serialize};

const PLAGIARIZED_ADVICE: &str = "This text shows significant similarity to existing content. Consider revising or properly citing sources.";
const ORIGINAL_ADVICE: &str = "Great job! Your text appears to be original with no significant matches to existing content.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn track_color(self) -> Rgb {
        match self {
            Theme::Light => Rgb(241, 245, 249),
            Theme::Dark => Rgb(30, 41, 59),
        }
    }

    /// Text drawn on top of a filled gauge
    fn on_fill_color(self, band: SeverityBand) -> Rgb {
        match (band, self) {
            (SeverityBand::Moderate, _) => Rgb::BLACK,
            (_, Theme::Light) => Rgb::WHITE,
            (_, Theme::Dark) => Rgb(248, 250, 252),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPanel {
    pub percentage: u32,
    pub band: SeverityBand,
    pub gauge_color: String,
    pub gauge_text_color: String,
    pub track_color: String,
    pub verdict: &'static str,
    pub verdict_color: String,
    pub icon: &'static str,
    pub advice: &'static str,
    pub theme: Theme,
}

impl ResultPanel {
    pub fn new(result: &SimilarityResult, theme: Theme) -> Self {
        let band = classify_fraction(result.similarity);
        let (verdict, verdict_color, icon, advice) = if result.is_plagiarized {
            (VERDICT_PLAGIARIZED, PLAGIARIZED_COLOR, "⚠️", PLAGIARIZED_ADVICE)
        } else {
            (VERDICT_ORIGINAL, ORIGINAL_COLOR, "✓", ORIGINAL_ADVICE)
        };

        Self {
            percentage: rounded_percent(result.similarity),
            band,
            gauge_color: band.color().to_hex(),
            gauge_text_color: theme.on_fill_color(band).to_hex(),
            track_color: theme.track_color().to_hex(),
            verdict,
            verdict_color: verdict_color.to_hex(),
            icon,
            advice,
            theme,
        }
    }

    /// CSS width of the filled bar
    pub fn gauge_width(&self) -> String {
        format!("{}%", self.percentage)
    }
}
