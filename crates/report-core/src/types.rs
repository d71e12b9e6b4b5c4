use crate::error::ReportError;
use serde::{Deserialize, Serialize};

/// Title printed when the submission has none
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// An external source matching part of the submitted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSource {
    pub url: String,
    /// Fraction of overlap with this source (0-1)
    pub similarity: f64,
}

impl MatchedSource {
    pub fn new(url: impl Into<String>, similarity: f64) -> Self {
        Self {
            url: url.into(),
            similarity,
        }
    }
}

/// Outcome of a similarity analysis, as produced by the analysis backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    /// Fraction of matched content (0-1)
    pub similarity: f64,
    pub is_plagiarized: bool,
    pub message: String,
    #[serde(default)]
    pub matched_sources: Vec<MatchedSource>,
}

/// Similarity above which a submission counts as plagiarized.
///
/// Earlier revisions of the product used 0.6, the submission flow uses 0.8.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlagiarismThreshold(f64);

impl PlagiarismThreshold {
    pub fn new(value: f64) -> Result<Self, ReportError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ReportError::InvalidSimilarity(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Strictly greater than: a score equal to the threshold is original
    pub fn is_exceeded_by(self, similarity: f64) -> bool {
        similarity > self.0
    }
}

impl Default for PlagiarismThreshold {
    fn default() -> Self {
        Self(0.8)
    }
}

impl SimilarityResult {
    /// Build a result from a raw score the way the mock analysis does.
    ///
    /// Matched sources are only kept when the score exceeds the threshold.
    pub fn from_score(
        similarity: f64,
        threshold: PlagiarismThreshold,
        sources: Vec<MatchedSource>,
    ) -> Result<Self, ReportError> {
        if !(0.0..=1.0).contains(&similarity) {
            return Err(ReportError::InvalidSimilarity(similarity));
        }

        let is_plagiarized = threshold.is_exceeded_by(similarity);
        let message = if is_plagiarized {
            format!("⚠️ Plagiarism Detected! Similarity Score: {:.2}", similarity)
        } else {
            format!("✅ No Plagiarism Detected. Similarity Score: {:.2}", similarity)
        };

        Ok(Self {
            similarity,
            is_plagiarized,
            message,
            matched_sources: if is_plagiarized { sources } else { Vec::new() },
        })
    }
}

/// Input to the report formatter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub result: Option<SimilarityResult>,
}

impl ReportRequest {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        result: SimilarityResult,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            result: Some(result),
        }
    }

    /// Title as printed, falling back to the placeholder
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            UNTITLED_DOCUMENT
        } else {
            trimmed
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        serde_json::from_str(json)
            .map_err(|e| ReportError::InvalidRequest(e.to_string()))
    }
}

/// Text submitted for checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub title: String,
    pub content: String,
}

impl Submission {
    /// Both the title and the content must contain non-whitespace text
    pub fn validate(title: &str, content: &str) -> Result<Self, ReportError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(ReportError::InvalidSubmission(
                "Please provide both title and content to check".to_string(),
            ));
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}
