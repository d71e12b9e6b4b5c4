//! Report generation entry points

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::layout::{layout_report, ReportLayout};
use crate::pdf::{render_pdf, DocumentInfo};
use crate::text::slug;
use crate::types::{MatchedSource, ReportRequest, SimilarityResult, Submission};
use chrono::{DateTime, Local};

/// A finished report
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub bytes: Vec<u8>,
    pub layout: ReportLayout,
    /// Suggested download name
    pub filename: String,
}

impl GeneratedReport {
    /// True if any section had to be skipped
    pub fn is_degraded(&self) -> bool {
        self.layout.outcomes.iter().any(|o| o.is_degraded())
    }
}

/// Timestamp as printed under the report heading
pub fn format_generated_on(generated_at: &DateTime<Local>) -> String {
    generated_at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// `plagiarism-report-<slug>-<unix millis>.pdf`
pub fn report_filename(title: &str, generated_at: &DateTime<Local>) -> String {
    let display = if title.trim().is_empty() {
        crate::types::UNTITLED_DOCUMENT
    } else {
        title
    };
    format!(
        "plagiarism-report-{}-{}.pdf",
        slug(display),
        generated_at.timestamp_millis()
    )
}

#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    config: ReportConfig,
}

impl ReportFormatter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Build a formatter, rejecting an inconsistent configuration up front
    pub fn try_new(config: ReportConfig) -> Result<Self, ReportError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Validate a submission and score it against the configured threshold
    pub fn analyze(
        &self,
        title: &str,
        content: &str,
        similarity: f64,
        sources: Vec<MatchedSource>,
    ) -> Result<SimilarityResult, ReportError> {
        Submission::validate(title, content)?;
        SimilarityResult::from_score(similarity, self.config.threshold, sources)
    }

    /// Generate a report stamped with the current local time
    pub fn generate(&self, request: &ReportRequest) -> Result<GeneratedReport, ReportError> {
        self.generate_at(request, &Local::now())
    }

    /// Generate a report stamped with `generated_at`.
    ///
    /// Fails without producing bytes when the request carries no result.
    pub fn generate_at(
        &self,
        request: &ReportRequest,
        generated_at: &DateTime<Local>,
    ) -> Result<GeneratedReport, ReportError> {
        let layout = self.layout_at(request, generated_at)?;

        let info = DocumentInfo {
            title: format!("Plagiarism Check Report - {}", layout.title),
            producer: self.config.product_name.clone(),
            creation_date: generated_at.format("D:%Y%m%d%H%M%S").to_string(),
        };
        let bytes = render_pdf(&layout, &self.config, &info)?;

        for outcome in layout.outcomes.iter().filter(|o| o.is_degraded()) {
            tracing::warn!(section = ?outcome.section(), "Report generated with a degraded section");
        }

        Ok(GeneratedReport {
            bytes,
            filename: report_filename(&request.title, generated_at),
            layout,
        })
    }

    /// Lay out a report without serializing it
    pub fn layout_at(
        &self,
        request: &ReportRequest,
        generated_at: &DateTime<Local>,
    ) -> Result<ReportLayout, ReportError> {
        self.config.validate()?;
        let result = request.result.as_ref().ok_or(ReportError::MissingResult)?;
        Ok(layout_report(
            request,
            result,
            &self.config,
            &format_generated_on(generated_at),
        ))
    }
}

/// Generate report bytes with the default configuration
pub fn generate_report(request: &ReportRequest) -> Result<Vec<u8>, ReportError> {
    ReportFormatter::default()
        .generate(request)
        .map(|report| report.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_result() -> SimilarityResult {
        SimilarityResult {
            similarity: 0.85,
            is_plagiarized: true,
            message: "⚠️ Plagiarism Detected! Similarity Score: 0.85".to_string(),
            matched_sources: Vec::new(),
        }
    }

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 14, 9, 5, 7).unwrap()
    }

    #[test]
    fn test_generated_on_format() {
        assert_eq!(format_generated_on(&timestamp()), "10/14/2026, 9:05:07 AM");
        let evening = Local.with_ymd_and_hms(2026, 3, 2, 21, 30, 0).unwrap();
        assert_eq!(format_generated_on(&evening), "3/2/2026, 9:30:00 PM");
    }

    #[test]
    fn test_report_filename() {
        let at = timestamp();
        let name = report_filename("Essay 1", &at);
        assert_eq!(
            name,
            format!("plagiarism-report-essay-1-{}.pdf", at.timestamp_millis())
        );
        assert!(report_filename("", &at).starts_with("plagiarism-report-untitled-document-"));
    }

    #[test]
    fn test_inverted_margins_are_rejected() {
        let config = ReportConfig {
            top_margin_mm: 270.0,
            content_bottom_mm: 100.0,
            ..ReportConfig::default()
        };
        assert!(matches!(
            ReportFormatter::try_new(config.clone()),
            Err(ReportError::Config(_))
        ));

        let request = ReportRequest::new("Essay", "text", sample_result());
        let err = ReportFormatter::new(config)
            .generate_at(&request, &timestamp())
            .unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_analyze_uses_configured_threshold() {
        let lenient = crate::types::PlagiarismThreshold::new(0.6).unwrap();
        let formatter = ReportFormatter::try_new(ReportConfig::default().with_threshold(lenient))
            .unwrap();
        let sources = vec![MatchedSource::new("https://example.com/x", 0.7)];

        let result = formatter.analyze("Essay", "text", 0.7, sources.clone()).unwrap();
        assert!(result.is_plagiarized);
        assert_eq!(result.matched_sources, sources);

        let strict = ReportFormatter::default()
            .analyze("Essay", "text", 0.7, sources)
            .unwrap();
        assert!(!strict.is_plagiarized);
        assert!(strict.matched_sources.is_empty());

        assert!(matches!(
            formatter.analyze(" ", "text", 0.7, Vec::new()),
            Err(ReportError::InvalidSubmission(_))
        ));
    }

    #[test]
    fn test_missing_result_produces_nothing() {
        let request = ReportRequest {
            title: "Essay".into(),
            content: "text".into(),
            result: None,
        };
        let err = ReportFormatter::default()
            .generate_at(&request, &timestamp())
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingResult));
        assert!(matches!(
            generate_report(&request),
            Err(ReportError::MissingResult)
        ));
    }
}
