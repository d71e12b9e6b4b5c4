//! Plagiarism check report formatting
//!
//! Turns a similarity result into a paginated PDF report and provides the
//! severity classification shared with the on-screen result panel.
//!
//! - `layout`: section-by-section layout into positioned elements
//! - `pdf`: painting a layout with lopdf
//! - `panel`: view model for the on-screen gauge and verdict

pub mod config;
pub mod error;
pub mod layout;
pub mod panel;
pub mod pdf;
pub mod report;
pub mod severity;
pub mod text;
pub mod types;

pub use config::ReportConfig;
pub use error::{ReportError, SectionRenderError};
pub use layout::{Gauge, ReportLayout, Section, SectionOutcome};
pub use panel::{ResultPanel, Theme};
pub use report::{
    format_generated_on, generate_report, report_filename, GeneratedReport, ReportFormatter,
};
pub use severity::{classify, classify_fraction, Rgb, SeverityBand};
pub use types::{
    MatchedSource, PlagiarismThreshold, ReportRequest, SimilarityResult, Submission,
    UNTITLED_DOCUMENT,
};
