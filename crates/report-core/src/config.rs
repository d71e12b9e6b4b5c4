//! Report configuration
//!
//! Page geometry is expressed in millimetres with the origin at the top-left
//! corner, y growing downwards. Every field has a default, so a JSON config
//! only needs the keys it overrides.

use crate::error::ReportError;
use crate::types::PlagiarismThreshold;
use serde::{Deserialize, Serialize};

/// Footer printed on every report page
pub const DEFAULT_PRODUCT_NAME: &str = "TextGuardian - Plagiarism Checker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// A4 portrait by default
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Left edge of all left-aligned text
    pub margin_left_mm: f32,
    /// Width available to wrapped text
    pub text_width_mm: f32,
    /// Where layout resumes on continuation pages
    pub top_margin_mm: f32,
    /// Lowest baseline allowed for flowing content
    pub content_bottom_mm: f32,
    /// Baseline of the plagiarism warning line
    pub warning_y_mm: f32,
    /// Baseline of the footer
    pub footer_y_mm: f32,
    /// Characters of content reproduced in the excerpt
    pub excerpt_limit: usize,
    pub product_name: String,
    /// Score above which the mock analysis flags a submission. The report
    /// itself follows `is_plagiarized` as given.
    pub threshold: PlagiarismThreshold,
    /// Flate-compress page content streams
    pub compress: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_left_mm: 20.0,
            text_width_mm: 170.0,
            top_margin_mm: 20.0,
            content_bottom_mm: 268.0,
            warning_y_mm: 275.0,
            footer_y_mm: 285.0,
            excerpt_limit: 500,
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            threshold: PlagiarismThreshold::default(),
            compress: true,
        }
    }
}

impl ReportConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let config: ReportConfig =
            serde_json::from_str(json).map_err(|e| ReportError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_threshold(mut self, threshold: PlagiarismThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_product_name(mut self, name: &str) -> Self {
        self.product_name = name.to_string();
        self
    }

    pub fn with_excerpt_limit(mut self, limit: usize) -> Self {
        self.excerpt_limit = limit;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Horizontal center of the page
    pub fn center_x(&self) -> f32 {
        self.page_width_mm / 2.0
    }

    /// Right edge of the text column
    pub fn margin_right_mm(&self) -> f32 {
        self.margin_left_mm + self.text_width_mm
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.page_width_mm <= 0.0 || self.page_height_mm <= 0.0 {
            return Err(ReportError::Config("Page size must be positive".into()));
        }
        if self.margin_left_mm + self.text_width_mm > self.page_width_mm {
            return Err(ReportError::Config(format!(
                "Text column ({}mm + {}mm) is wider than the page ({}mm)",
                self.margin_left_mm, self.text_width_mm, self.page_width_mm
            )));
        }
        if self.top_margin_mm >= self.content_bottom_mm {
            return Err(ReportError::Config(format!(
                "Top margin {}mm must be above the content bottom {}mm",
                self.top_margin_mm, self.content_bottom_mm
            )));
        }
        if self.content_bottom_mm > self.warning_y_mm || self.warning_y_mm > self.footer_y_mm {
            return Err(ReportError::Config(
                "Content, warning and footer must be ordered top to bottom".into(),
            ));
        }
        if self.footer_y_mm > self.page_height_mm {
            return Err(ReportError::Config("Footer lies below the page".into()));
        }
        // Deserializing bypasses PlagiarismThreshold::new
        PlagiarismThreshold::new(self.threshold.value())?;
        Ok(())
    }
}
