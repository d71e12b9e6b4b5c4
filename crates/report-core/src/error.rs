use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No result data available")]
    MissingResult,

    #[error("{0}")]
    InvalidSubmission(String),

    #[error("Similarity must be within [0, 1], got {0}")]
    InvalidSimilarity(f64),

    #[error("Invalid report request: {0}")]
    InvalidRequest(String),

    #[error("Report generation failed: {0}")]
    Render(String),

    #[error("Invalid report configuration: {0}")]
    Config(String),
}

/// Failure while laying out a single report section.
///
/// These never escape report generation: the section is skipped and
/// recorded as degraded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SectionRenderError {
    #[error("Row {row}: similarity {value} is not a fraction in [0, 1]")]
    InvalidCell { row: usize, value: f64 },

    #[error("Row {row} needs {height:.1}mm but a page only holds {available:.1}mm")]
    RowTooTall {
        row: usize,
        height: f32,
        available: f32,
    },
}
