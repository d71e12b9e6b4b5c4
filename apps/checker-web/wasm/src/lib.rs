//! WASM bindings for the plagiarism checker front end
//!
//! Report formatting, severity classification and the result panel live in
//! `report-core`; JavaScript only handles DOM events and file I/O.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { mockAnalyze, resultPanel, downloadReport } from './pkg/checker_wasm.js';
//!
//! await init();
//!
//! const result = mockAnalyze(title, content);
//! const panel = resultPanel(result, darkMode);
//! const filename = downloadReport(JSON.stringify({ title, content, result: JSON.parse(result) }));
//! ```

pub mod download;

use chrono::Local;
use report_core::{
    classify_fraction, report_filename, PlagiarismThreshold, ReportConfig, ReportError,
    ReportFormatter, ReportRequest, ResultPanel, SimilarityResult, Submission, Theme,
};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Plagiarism checker WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(err: ReportError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_threshold(threshold: Option<f64>) -> Result<PlagiarismThreshold, ReportError> {
    match threshold {
        Some(value) => PlagiarismThreshold::new(value),
        None => Ok(ReportConfig::default().threshold),
    }
}

/// Generate report bytes and the suggested filename from a JSON request
pub fn generate_from_json(request_json: &str) -> Result<(Vec<u8>, String), ReportError> {
    let request = ReportRequest::from_json(request_json)?;
    let report = ReportFormatter::default().generate(&request)?;
    Ok((report.bytes, report.filename))
}

/// Validate a submission and score it with `similarity`, standing in for the
/// analysis backend
pub fn analyze_with_score(
    title: &str,
    content: &str,
    similarity: f64,
    threshold: PlagiarismThreshold,
) -> Result<SimilarityResult, ReportError> {
    ReportFormatter::try_new(ReportConfig::default().with_threshold(threshold))?
        .analyze(title, content, similarity, Vec::new())
}

/// Generate a PDF report
///
/// `requestJson` is `{ title, content, result }` with the result in the
/// shape produced by `mockAnalyze`. Fails when `result` is missing.
#[wasm_bindgen(js_name = generateReport)]
pub fn generate_report(request_json: &str) -> Result<Vec<u8>, JsValue> {
    generate_from_json(request_json)
        .map(|(bytes, _)| bytes)
        .map_err(to_js)
}

/// Generate a report and hand it to the browser as a download
///
/// Returns the filename used.
#[wasm_bindgen(js_name = downloadReport)]
pub fn download_report(request_json: &str) -> Result<String, JsValue> {
    let (bytes, filename) = generate_from_json(request_json).map_err(to_js)?;
    download::trigger_download(&bytes, &filename)?;
    Ok(filename)
}

/// Severity band name ("low", "moderate", "high", "critical") for a
/// similarity fraction
#[wasm_bindgen(js_name = classifySimilarity)]
pub fn classify_similarity(similarity: f64) -> String {
    classify_fraction(similarity).name().to_string()
}

/// View model for the result panel
#[wasm_bindgen(js_name = resultPanel)]
pub fn result_panel(result_json: &str, dark_mode: bool) -> Result<JsValue, JsValue> {
    let result: SimilarityResult = serde_json::from_str(result_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse result: {}", e)))?;
    let panel = ResultPanel::new(&result, Theme::from_dark_mode(dark_mode));

    serde_wasm_bindgen::to_value(&panel)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check that both title and content were provided
#[wasm_bindgen(js_name = validateSubmission)]
pub fn validate_submission(title: &str, content: &str) -> Result<(), JsValue> {
    Submission::validate(title, content).map(|_| ()).map_err(to_js)
}

/// Produce a random similarity result for a submission
///
/// Returns the result as JSON.
#[wasm_bindgen(js_name = mockAnalyze)]
pub fn mock_analyze(title: &str, content: &str, threshold: Option<f64>) -> Result<String, JsValue> {
    let threshold = parse_threshold(threshold).map_err(to_js)?;
    let result = analyze_with_score(title, content, js_sys::Math::random(), threshold)
        .map_err(to_js)?;

    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

/// Download filename for a report generated now
#[wasm_bindgen(js_name = reportFilename)]
pub fn report_filename_now(title: &str) -> String {
    report_filename(title, &Local::now())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any valid score produces a result the report accepts
        #[test]
        fn any_score_generates_report(similarity in 0.0f64..=1.0) {
            let result = analyze_with_score("Essay", "Body", similarity, PlagiarismThreshold::default()).unwrap();
            prop_assert_eq!(result.is_plagiarized, similarity > 0.8);
            let request = ReportRequest::new("Essay", "Body", result);
            prop_assert!(ReportFormatter::default().generate(&request).is_ok());
        }
    }
}
