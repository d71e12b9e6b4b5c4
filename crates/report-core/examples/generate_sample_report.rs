//! Example: Generate a sample plagiarism report
//!
//! Run with:
//!   RUST_LOG=report_core=debug cargo run -p report-core --example generate_sample_report
//!
//! An optional first argument points at a JSON `ReportConfig`. The PDF is
//! written to the `output/` directory.

use anyhow::Result;
use report_core::{
    MatchedSource, ReportConfig, ReportFormatter, ReportRequest, SimilarityResult,
};
use std::fs;
use std::path::Path;
use tracing::info;

const SAMPLE_TEXT: &str = "The industrial revolution transformed economies that had been based on \
agriculture and handicrafts into economies based on large-scale industry, mechanized \
manufacturing, and the factory system. New machines, new power sources, and new ways of \
organizing work made existing industries more productive and efficient.";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("report_core=info".parse()?),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ReportConfig::from_json(&fs::read_to_string(path)?)?,
        None => ReportConfig::default(),
    };
    let threshold = config.threshold;

    let result = SimilarityResult::from_score(
        0.86,
        threshold,
        vec![
            MatchedSource::new("https://en.wikipedia.org/wiki/Industrial_Revolution", 0.91),
            MatchedSource::new("https://www.britannica.com/event/Industrial-Revolution", 0.64),
        ],
    )?;
    let request = ReportRequest::new("History Essay", SAMPLE_TEXT, result);

    let report = ReportFormatter::new(config).generate(&request)?;

    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(&report.filename);
    fs::write(&path, &report.bytes)?;

    info!(
        path = %path.display(),
        pages = report.layout.page_count(),
        bytes = report.bytes.len(),
        "Sample report written"
    );
    Ok(())
}
