//! Top-down report layout
//!
//! Layout produces a [`ReportLayout`]: pages of positioned elements in
//! millimetres, measured from the top-left corner with text positioned by
//! baseline. A single layout cursor carries the vertical position from one
//! section to the next, so sections never overlap. Painting the layout into
//! PDF bytes happens separately in [`crate::pdf`].

use crate::config::ReportConfig;
use crate::error::SectionRenderError;
use crate::severity::{
    classify_fraction, rounded_percent, Rgb, SeverityBand, ORIGINAL_COLOR, PLAGIARIZED_COLOR,
};
use crate::text::{excerpt, line_height_mm, strip_decorations, text_width_mm, wrap_text};
use crate::types::{MatchedSource, ReportRequest, SimilarityResult};
use serde::Serialize;

pub const REPORT_HEADING: &str = "Plagiarism Check Report";
pub const VERDICT_PLAGIARIZED: &str = "Plagiarism Detected";
pub const VERDICT_ORIGINAL: &str = "Original Content";
pub const PLAGIARISM_WARNING: &str = "Warning: This document contains plagiarized content!";

const LABEL_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;
const SMALL_SIZE: f32 = 10.0;

const LABEL_COLOR: Rgb = Rgb::BLACK;
const MUTED_COLOR: Rgb = Rgb(80, 80, 80);
const DATE_COLOR: Rgb = Rgb(100, 100, 100);
const FOOTER_COLOR: Rgb = Rgb(150, 150, 150);
const DIVIDER_COLOR: Rgb = Rgb(200, 200, 200);
const WARNING_COLOR: Rgb = Rgb(217, 48, 48);

const GAUGE_TRACK_WIDTH: f32 = 100.0;
const GAUGE_HEIGHT: f32 = 10.0;
const GAUGE_TRACK_COLOR: Rgb = Rgb(230, 230, 230);

const TABLE_URL_WIDTH: f32 = 130.0;
const TABLE_PERCENT_WIDTH: f32 = 30.0;
const TABLE_CELL_PADDING: f32 = 1.8;
const TABLE_HEADER_FILL: Rgb = Rgb(66, 133, 244);
const TABLE_STRIPE_FILL: Rgb = Rgb(245, 245, 245);
const TABLE_TEXT_COLOR: Rgb = Rgb(50, 50, 50);
/// Vertical space consumed by a table that could not be laid out
pub const TABLE_FALLBACK_OFFSET: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Font {
    Regular,
    Bold,
}

/// A positioned drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// `y` is the baseline
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        color: Rgb,
    },
    /// `y` is the top edge
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    DocumentTitle,
    Verdict,
    Gauge,
    Analysis,
    MatchedSources,
    ContentExcerpt,
    Footer,
}

/// How a section came out
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    Rendered {
        section: Section,
        /// Cursor position after the section
        final_y: f32,
    },
    /// The section was skipped and layout continued from `fallback_y`
    Degraded {
        section: Section,
        #[serde(serialize_with = "serialize_reason")]
        reason: SectionRenderError,
        fallback_y: f32,
    },
}

fn serialize_reason<S: serde::Serializer>(
    reason: &SectionRenderError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&reason.to_string())
}

impl SectionOutcome {
    pub fn section(&self) -> Section {
        match self {
            SectionOutcome::Rendered { section, .. } | SectionOutcome::Degraded { section, .. } => {
                *section
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SectionOutcome::Degraded { .. })
    }
}

/// Gauge values shared with the on-screen panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gauge {
    pub percent: u32,
    pub band: SeverityBand,
    pub fill_width_mm: f32,
}

impl Gauge {
    pub fn for_similarity(similarity: f64) -> Self {
        let percent = rounded_percent(similarity);
        Self {
            percent,
            band: classify_fraction(similarity),
            fill_width_mm: GAUGE_TRACK_WIDTH * percent as f32 / 100.0,
        }
    }
}

/// The complete laid-out report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLayout {
    pub pages: Vec<Page>,
    pub outcomes: Vec<SectionOutcome>,
    pub title: String,
    pub verdict: &'static str,
    pub gauge: Gauge,
    pub excerpt: String,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text element in page order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.texts())
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Color of the first text element equal to `needle`
    pub fn text_color(&self, needle: &str) -> Option<Rgb> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .find_map(|e| match e {
                Element::Text { text, color, .. } if text == needle => Some(*color),
                _ => None,
            })
    }

    pub fn outcome(&self, section: Section) -> Option<&SectionOutcome> {
        self.outcomes.iter().find(|o| o.section() == section)
    }
}

/// Vertical layout state for one report.
///
/// Owns the pages built so far; every call builds its own cursor.
struct Cursor<'a> {
    config: &'a ReportConfig,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            pages: vec![Page::default()],
            y: config.top_margin_mm,
        }
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.config.top_margin_mm;
    }

    /// Start a new page unless `height` more millimetres fit below the cursor
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.y + height > self.config.content_bottom_mm {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Rgb) {
        self.push(Element::Text {
            x,
            y,
            text: text.to_string(),
            font,
            size,
            color,
        });
    }

    fn left_text(&mut self, text: &str, font: Font, size: f32, color: Rgb) {
        let x = self.config.margin_left_mm;
        let y = self.y;
        self.text(x, y, text, font, size, color);
    }

    fn centered_text(&mut self, y: f32, text: &str, font: Font, size: f32, color: Rgb) {
        let x = self.config.center_x() - text_width_mm(text, size) / 2.0;
        self.text(x, y, text, font, size, color);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgb) {
        self.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }

    /// Wrapped left-aligned paragraph starting at the cursor; the cursor
    /// ends on the last line's baseline
    fn paragraph(&mut self, text: &str, size: f32, color: Rgb) {
        let line_height = line_height_mm(size);
        let lines = wrap_text(text, self.config.text_width_mm, size);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.y += line_height;
            }
            self.ensure_space(0.0);
            if !line.is_empty() {
                self.left_text(line, Font::Regular, size, color);
            }
        }
    }
}

/// A laid-out table row, ready to paint
#[derive(Debug, Clone, PartialEq)]
struct TableRow {
    url_lines: Vec<String>,
    percent: String,
    height: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct TableLayout {
    header_height: f32,
    rows: Vec<TableRow>,
}

fn table_line_height() -> f32 {
    line_height_mm(SMALL_SIZE)
}

fn row_height(lines: usize) -> f32 {
    lines.max(1) as f32 * table_line_height() + 2.0 * TABLE_CELL_PADDING
}

/// Measure every row before anything is painted
fn layout_table(
    sources: &[MatchedSource],
    config: &ReportConfig,
) -> Result<TableLayout, SectionRenderError> {
    let header_height = row_height(1);
    let available = config.content_bottom_mm - config.top_margin_mm - header_height;
    let url_width = TABLE_URL_WIDTH - 2.0 * TABLE_CELL_PADDING;

    let mut rows = Vec::with_capacity(sources.len());
    for (row, source) in sources.iter().enumerate() {
        if !source.similarity.is_finite() || !(0.0..=1.0).contains(&source.similarity) {
            return Err(SectionRenderError::InvalidCell {
                row,
                value: source.similarity,
            });
        }

        let url_lines = wrap_text(&source.url, url_width, SMALL_SIZE);
        let height = row_height(url_lines.len());
        if height > available {
            return Err(SectionRenderError::RowTooTall {
                row,
                height,
                available,
            });
        }

        rows.push(TableRow {
            url_lines,
            percent: format!("{}%", rounded_percent(source.similarity)),
            height,
        });
    }

    Ok(TableLayout {
        header_height,
        rows,
    })
}

fn paint_table_header(cursor: &mut Cursor<'_>, height: f32) {
    let x = cursor.config.margin_left_mm;
    let top = cursor.y;
    cursor.rect(
        x,
        top,
        TABLE_URL_WIDTH + TABLE_PERCENT_WIDTH,
        height,
        TABLE_HEADER_FILL,
    );
    let baseline = top + TABLE_CELL_PADDING + SMALL_SIZE / crate::text::MM_TO_PT;
    cursor.text(
        x + TABLE_CELL_PADDING,
        baseline,
        "Source URL",
        Font::Bold,
        SMALL_SIZE,
        Rgb::WHITE,
    );
    let label = "Similarity %";
    let label_x =
        x + TABLE_URL_WIDTH + (TABLE_PERCENT_WIDTH - text_width_mm(label, SMALL_SIZE)) / 2.0;
    cursor.text(label_x, baseline, label, Font::Bold, SMALL_SIZE, Rgb::WHITE);
    cursor.y += height;
}

/// Paint the measured table; rows never split across pages and the header
/// repeats on each continuation page
fn paint_table(cursor: &mut Cursor<'_>, table: &TableLayout) {
    cursor.ensure_space(table.header_height + table.rows.first().map_or(0.0, |r| r.height));
    paint_table_header(cursor, table.header_height);

    let x = cursor.config.margin_left_mm;
    let line_height = table_line_height();
    for (i, row) in table.rows.iter().enumerate() {
        if cursor.ensure_space(row.height) {
            paint_table_header(cursor, table.header_height);
        }

        let top = cursor.y;
        if i % 2 == 1 {
            cursor.rect(
                x,
                top,
                TABLE_URL_WIDTH + TABLE_PERCENT_WIDTH,
                row.height,
                TABLE_STRIPE_FILL,
            );
        }

        let first_baseline = top + TABLE_CELL_PADDING + SMALL_SIZE / crate::text::MM_TO_PT;
        for (n, line) in row.url_lines.iter().enumerate() {
            cursor.text(
                x + TABLE_CELL_PADDING,
                first_baseline + n as f32 * line_height,
                line,
                Font::Regular,
                SMALL_SIZE,
                TABLE_TEXT_COLOR,
            );
        }
        let percent_x = x
            + TABLE_URL_WIDTH
            + (TABLE_PERCENT_WIDTH - text_width_mm(&row.percent, SMALL_SIZE)) / 2.0;
        cursor.text(
            percent_x,
            first_baseline,
            &row.percent,
            Font::Regular,
            SMALL_SIZE,
            TABLE_TEXT_COLOR,
        );

        cursor.y += row.height;
    }
}

fn layout_header(cursor: &mut Cursor<'_>, generated_on: &str) -> SectionOutcome {
    let top = cursor.config.top_margin_mm;
    cursor.centered_text(top, REPORT_HEADING, Font::Bold, 20.0, LABEL_COLOR);
    cursor.centered_text(
        top + 7.0,
        &format!("Generated on: {}", generated_on),
        Font::Regular,
        SMALL_SIZE,
        DATE_COLOR,
    );
    let divider_y = top + 10.0;
    cursor.push(Element::Line {
        x1: cursor.config.margin_left_mm,
        y1: divider_y,
        x2: cursor.config.margin_right_mm(),
        y2: divider_y,
        color: DIVIDER_COLOR,
        width: 0.2,
    });
    cursor.y = divider_y;
    SectionOutcome::Rendered {
        section: Section::Header,
        final_y: cursor.y,
    }
}

fn layout_document_title(cursor: &mut Cursor<'_>, title: &str) -> SectionOutcome {
    cursor.y += 10.0;
    cursor.left_text("Document Title:", Font::Bold, LABEL_SIZE, LABEL_COLOR);
    cursor.y += 7.0;
    cursor.paragraph(title, BODY_SIZE, LABEL_COLOR);
    SectionOutcome::Rendered {
        section: Section::DocumentTitle,
        final_y: cursor.y,
    }
}

fn layout_verdict(cursor: &mut Cursor<'_>, result: &SimilarityResult) -> SectionOutcome {
    cursor.y += 13.0;
    cursor.ensure_space(7.0);
    cursor.left_text("Plagiarism Check Result:", Font::Bold, LABEL_SIZE, LABEL_COLOR);
    cursor.y += 7.0;
    let (verdict, color) = verdict_for(result);
    cursor.left_text(verdict, Font::Bold, 16.0, color);
    SectionOutcome::Rendered {
        section: Section::Verdict,
        final_y: cursor.y,
    }
}

fn verdict_for(result: &SimilarityResult) -> (&'static str, Rgb) {
    if result.is_plagiarized {
        (VERDICT_PLAGIARIZED, PLAGIARIZED_COLOR)
    } else {
        (VERDICT_ORIGINAL, ORIGINAL_COLOR)
    }
}

fn layout_gauge(cursor: &mut Cursor<'_>, gauge: &Gauge) -> SectionOutcome {
    cursor.y += 13.0;
    cursor.ensure_space(5.0 + GAUGE_HEIGHT);
    cursor.left_text("Similarity Score:", Font::Bold, LABEL_SIZE, LABEL_COLOR);

    let x = cursor.config.margin_left_mm;
    let top = cursor.y + 5.0;
    cursor.rect(x, top, GAUGE_TRACK_WIDTH, GAUGE_HEIGHT, GAUGE_TRACK_COLOR);
    cursor.rect(x, top, gauge.fill_width_mm, GAUGE_HEIGHT, gauge.band.color());
    cursor.text(
        x + GAUGE_TRACK_WIDTH + 5.0,
        top + 8.0,
        &format!("{}%", gauge.percent),
        Font::Regular,
        BODY_SIZE,
        LABEL_COLOR,
    );

    cursor.y = top + GAUGE_HEIGHT;
    SectionOutcome::Rendered {
        section: Section::Gauge,
        final_y: cursor.y,
    }
}

fn layout_analysis(cursor: &mut Cursor<'_>, message: &str) -> SectionOutcome {
    cursor.y += 10.0;
    cursor.ensure_space(7.0);
    cursor.left_text("Analysis:", Font::Bold, BODY_SIZE, LABEL_COLOR);
    cursor.y += 7.0;
    cursor.paragraph(strip_decorations(message), BODY_SIZE, MUTED_COLOR);
    SectionOutcome::Rendered {
        section: Section::Analysis,
        final_y: cursor.y,
    }
}

fn layout_matched_sources(
    cursor: &mut Cursor<'_>,
    sources: &[MatchedSource],
) -> Option<SectionOutcome> {
    if sources.is_empty() {
        return None;
    }

    cursor.ensure_space(5.0 + row_height(1) * 2.0);
    let heading_y = cursor.y;
    cursor.left_text("Matched Sources:", Font::Bold, LABEL_SIZE, LABEL_COLOR);

    let outcome = match layout_table(sources, cursor.config) {
        Ok(table) => {
            cursor.y += 5.0;
            paint_table(cursor, &table);
            cursor.y += 10.0;
            tracing::debug!(
                rows = table.rows.len(),
                final_y = cursor.y,
                "Matched sources table laid out"
            );
            SectionOutcome::Rendered {
                section: Section::MatchedSources,
                final_y: cursor.y,
            }
        }
        Err(reason) => {
            tracing::warn!(error = %reason, "Skipping matched sources table");
            cursor.y = heading_y + TABLE_FALLBACK_OFFSET;
            SectionOutcome::Degraded {
                section: Section::MatchedSources,
                reason,
                fallback_y: cursor.y,
            }
        }
    };
    Some(outcome)
}

fn layout_excerpt(cursor: &mut Cursor<'_>, excerpt_text: &str) -> SectionOutcome {
    cursor.ensure_space(10.0 + line_height_mm(SMALL_SIZE));
    cursor.left_text("Content Excerpt:", Font::Bold, LABEL_SIZE, LABEL_COLOR);
    cursor.y += 10.0;
    cursor.paragraph(excerpt_text, SMALL_SIZE, MUTED_COLOR);
    SectionOutcome::Rendered {
        section: Section::ContentExcerpt,
        final_y: cursor.y,
    }
}

fn layout_footer(cursor: &mut Cursor<'_>, is_plagiarized: bool) -> SectionOutcome {
    let config = cursor.config;
    let footer = config.product_name.clone();
    let footer_x = config.center_x() - text_width_mm(&footer, SMALL_SIZE) / 2.0;
    for page in cursor.pages.iter_mut() {
        page.elements.push(Element::Text {
            x: footer_x,
            y: config.footer_y_mm,
            text: footer.clone(),
            font: Font::Regular,
            size: SMALL_SIZE,
            color: FOOTER_COLOR,
        });
    }

    if is_plagiarized {
        cursor.centered_text(
            config.warning_y_mm,
            PLAGIARISM_WARNING,
            Font::Bold,
            BODY_SIZE,
            WARNING_COLOR,
        );
    }

    SectionOutcome::Rendered {
        section: Section::Footer,
        final_y: config.footer_y_mm,
    }
}

/// Lay out a report.
///
/// `generated_on` is the already formatted timestamp printed under the
/// heading.
pub fn layout_report(
    request: &ReportRequest,
    result: &SimilarityResult,
    config: &ReportConfig,
    generated_on: &str,
) -> ReportLayout {
    let mut cursor = Cursor::new(config);
    let title = request.display_title().to_string();
    let gauge = Gauge::for_similarity(result.similarity);
    let excerpt_text = excerpt(&request.content, config.excerpt_limit);
    let (verdict, _) = verdict_for(result);

    let mut outcomes = vec![
        layout_header(&mut cursor, generated_on),
        layout_document_title(&mut cursor, &title),
        layout_verdict(&mut cursor, result),
        layout_gauge(&mut cursor, &gauge),
        layout_analysis(&mut cursor, &result.message),
    ];

    cursor.y += 13.0;
    if let Some(outcome) = layout_matched_sources(&mut cursor, &result.matched_sources) {
        outcomes.push(outcome);
    }
    outcomes.push(layout_excerpt(&mut cursor, &excerpt_text));
    outcomes.push(layout_footer(&mut cursor, result.is_plagiarized));

    tracing::debug!(
        pages = cursor.pages.len(),
        percent = gauge.percent,
        band = gauge.band.name(),
        "Report laid out"
    );

    ReportLayout {
        pages: cursor.pages,
        outcomes,
        title,
        verdict,
        gauge,
        excerpt: excerpt_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(
        similarity: f64,
        is_plagiarized: bool,
        sources: Vec<MatchedSource>,
    ) -> SimilarityResult {
        SimilarityResult {
            similarity,
            is_plagiarized,
            message: "⚠️ Plagiarism Detected! Similarity Score: 85.00%".to_string(),
            matched_sources: sources,
        }
    }

    fn layout(request: &ReportRequest) -> ReportLayout {
        let config = ReportConfig::default();
        let result = request.result.clone().unwrap();
        layout_report(request, &result, &config, "10/14/2026, 9:05:00 AM")
    }

    fn text_baselines(page: &Page) -> Vec<f32> {
        page.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { y, .. } => Some(*y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_section_order_on_single_page() {
        let request = ReportRequest::new(
            "Essay 1",
            "short content",
            result(0.85, true, vec![MatchedSource::new("https://example.com/x", 0.9)]),
        );
        let layout = layout(&request);
        assert_eq!(layout.page_count(), 1);

        let texts: Vec<&str> = layout.texts().collect();
        let position = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();
        assert!(position(REPORT_HEADING) < position("Document Title:"));
        assert!(position("Document Title:") < position("Essay 1"));
        assert!(position("Essay 1") < position(VERDICT_PLAGIARIZED));
        assert!(position(VERDICT_PLAGIARIZED) < position("85%"));
        assert!(position("85%") < position("Analysis:"));
        assert!(position("Analysis:") < position("Matched Sources:"));
        assert!(position("Matched Sources:") < position("https://example.com/x"));
        assert!(position("90%") < position("Content Excerpt:"));
        assert!(position("Content Excerpt:") < position("short content"));
    }

    #[test]
    fn test_generated_on_line() {
        let request = ReportRequest::new("t", "c", result(0.1, false, Vec::new()));
        let layout = layout(&request);
        assert!(layout.contains_text("Generated on: 10/14/2026, 9:05:00 AM"));
    }

    #[test]
    fn test_analysis_message_is_stripped() {
        let request = ReportRequest::new("t", "c", result(0.85, true, Vec::new()));
        let layout = layout(&request);
        assert!(layout.contains_text("Plagiarism Detected! Similarity Score: 85.00%"));
        assert!(!layout.texts().any(|t| t.starts_with('⚠')));
    }

    #[test]
    fn test_verdict_follows_flag_but_gauge_follows_similarity() {
        // High similarity but flagged original by an upstream threshold
        let request = ReportRequest::new("t", "c", result(0.9, false, Vec::new()));
        let layout = layout(&request);
        assert_eq!(layout.verdict, VERDICT_ORIGINAL);
        assert_eq!(layout.text_color(VERDICT_ORIGINAL), Some(ORIGINAL_COLOR));
        assert_eq!(layout.gauge.band, SeverityBand::Critical);
        assert!(!layout.contains_text(PLAGIARISM_WARNING));
    }

    #[test]
    fn test_gauge_fill_width() {
        let request = ReportRequest::new("t", "c", result(0.567, true, Vec::new()));
        let layout = layout(&request);
        assert_eq!(layout.gauge.percent, 57);
        assert_eq!(layout.gauge.band, SeverityBand::Moderate);
        let fill = layout.pages[0].elements.iter().find_map(|e| match e {
            Element::Rect { width, fill, .. } if *fill == SeverityBand::Moderate.color() => {
                Some(*width)
            }
            _ => None,
        });
        assert_eq!(fill, Some(57.0));
    }

    #[test]
    fn test_no_table_without_sources() {
        let request = ReportRequest::new("t", "c", result(0.2, false, Vec::new()));
        let layout = layout(&request);
        assert!(!layout.contains_text("Matched Sources:"));
        assert!(layout.outcome(Section::MatchedSources).is_none());
    }

    #[test]
    fn test_table_preserves_order_and_rounds() {
        let sources = vec![
            MatchedSource::new("https://b.example/2", 0.3),
            MatchedSource::new("https://a.example/1", 0.567),
            MatchedSource::new("https://c.example/3", 0.9),
        ];
        let request = ReportRequest::new("t", "c", result(0.85, true, sources));
        let layout = layout(&request);
        let texts: Vec<&str> = layout.texts().collect();
        let start = texts.iter().position(|t| *t == "Similarity %").unwrap();
        assert_eq!(
            &texts[start + 1..start + 7],
            &[
                "https://b.example/2",
                "30%",
                "https://a.example/1",
                "57%",
                "https://c.example/3",
                "90%"
            ]
        );
    }

    #[test]
    fn test_invalid_source_degrades_table() {
        let sources = vec![
            MatchedSource::new("https://ok.example", 0.4),
            MatchedSource::new("https://bad.example", f64::NAN),
        ];
        let request = ReportRequest::new("t", "excerpt body", result(0.85, true, sources));
        let layout = layout(&request);

        let outcome = layout.outcome(Section::MatchedSources).unwrap();
        match outcome {
            SectionOutcome::Degraded {
                reason, fallback_y, ..
            } => {
                assert!(matches!(reason, SectionRenderError::InvalidCell { row: 1, .. }));
                let heading_y = layout.pages[0]
                    .elements
                    .iter()
                    .find_map(|e| match e {
                        Element::Text { text, y, .. } if text == "Matched Sources:" => Some(*y),
                        _ => None,
                    })
                    .unwrap();
                assert!((*fallback_y - TABLE_FALLBACK_OFFSET - heading_y).abs() < 1e-4);
            }
            other => panic!("expected degraded table, got {:?}", other),
        }

        // Nothing from the table was painted, the rest of the report was
        assert!(!layout.contains_text("https://ok.example"));
        assert!(!layout.contains_text("Source URL"));
        assert!(layout.contains_text("Content Excerpt:"));
        assert!(layout.contains_text("excerpt body"));
        assert!(layout.contains_text(&ReportConfig::default().product_name));
    }

    #[test]
    fn test_oversized_row_degrades_table() {
        let sources = vec![MatchedSource::new(
            format!("https://example.com/{}", "x".repeat(20_000)),
            0.5,
        )];
        let request = ReportRequest::new("t", "c", result(0.85, true, sources));
        let layout = layout(&request);
        let outcome = layout.outcome(Section::MatchedSources).unwrap();
        assert!(outcome.is_degraded());
        assert!(layout.contains_text("Content Excerpt:"));
    }

    #[test]
    fn test_many_sources_paginate() {
        let sources: Vec<MatchedSource> = (0..80)
            .map(|i| MatchedSource::new(format!("https://example.com/source/{}", i), 0.5))
            .collect();
        let request = ReportRequest::new("t", "c".repeat(600), result(0.85, true, sources));
        let layout = layout(&request);
        let config = ReportConfig::default();

        assert!(layout.page_count() > 1);
        for page in &layout.pages {
            assert!(page.texts().any(|t| t == config.product_name));
            for y in text_baselines(page) {
                assert!(y <= config.footer_y_mm);
            }
        }
        // Header repeats on each page that holds rows
        let headers = layout.texts().filter(|t| *t == "Source URL").count();
        assert!(headers >= 2);
        // Warning only on the last page
        let last = layout.pages.last().unwrap();
        assert!(last.texts().any(|t| t == PLAGIARISM_WARNING));
        assert_eq!(layout.texts().filter(|t| *t == PLAGIARISM_WARNING).count(), 1);

        let rows = layout
            .texts()
            .filter(|t| t.starts_with("https://example.com/source/"))
            .count();
        assert_eq!(rows, 80);
    }

    #[test]
    fn test_flowing_content_stays_above_warning_band() {
        let sources: Vec<MatchedSource> = (0..40)
            .map(|i| MatchedSource::new(format!("https://example.com/{}", i), 0.7))
            .collect();
        let long_content = "word ".repeat(200);
        let request = ReportRequest::new("t", long_content, result(0.85, true, sources));
        let layout = layout(&request);
        let config = ReportConfig::default();

        for page in &layout.pages {
            for element in &page.elements {
                if let Element::Text { y, text, .. } = element {
                    if text != &config.product_name && text != PLAGIARISM_WARNING {
                        assert!(*y <= config.content_bottom_mm, "{} at {}", text, y);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sections_never_overlap() {
        let sources = vec![MatchedSource::new("https://example.com/x", 0.9)];
        let request = ReportRequest::new("Essay 1", "a".repeat(600), result(0.85, true, sources));
        let layout = layout(&request);

        let mut last_y = 0.0f32;
        for outcome in &layout.outcomes {
            if let SectionOutcome::Rendered { final_y, section } = outcome {
                if *section != Section::Footer {
                    assert!(*final_y >= last_y, "{:?} moved the cursor backwards", section);
                    last_y = *final_y;
                }
            }
        }
    }

    #[test]
    fn test_sources_with_original_verdict_still_render() {
        let sources = vec![MatchedSource::new("https://example.com/x", 0.2)];
        let request = ReportRequest::new("t", "c", result(0.3, false, sources));
        let layout = layout(&request);
        assert!(layout.contains_text("Matched Sources:"));
        assert!(layout.contains_text("20%"));
    }

    #[test]
    fn test_footer_on_single_page() {
        let request = ReportRequest::new("t", "c", result(0.1, false, Vec::new()));
        let layout = layout(&request);
        let footers = layout
            .texts()
            .filter(|t| *t == crate::config::DEFAULT_PRODUCT_NAME)
            .count();
        assert_eq!(footers, 1);
    }
}
