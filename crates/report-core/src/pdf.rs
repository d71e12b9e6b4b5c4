//! Paint a [`ReportLayout`] into PDF bytes
//!
//! Uses the two standard Helvetica faces, so no font program is embedded.

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::layout::{Element, Font, ReportLayout};
use crate::severity::Rgb;
use crate::text::{encode_win_ansi, MM_TO_PT};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Document information dictionary entries
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    /// PDF date string, e.g. `D:20261014090500`
    pub creation_date: String,
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn color_operands(color: Rgb) -> Vec<Object> {
    let (r, g, b) = color.to_unit();
    vec![real(r), real(g), real(b)]
}

/// Content stream operations for one page
fn page_operations(elements: &[Element], page_height_mm: f32) -> Vec<Operation> {
    let to_x = |x: f32| x * MM_TO_PT;
    let to_y = |y: f32| (page_height_mm - y) * MM_TO_PT;
    let mut ops = Vec::new();

    for element in elements {
        match element {
            Element::Text {
                x,
                y,
                text,
                font,
                size,
                color,
            } => {
                let font_name = match font {
                    Font::Regular => REGULAR_FONT,
                    Font::Bold => BOLD_FONT,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font_name.as_bytes().to_vec()), real(*size)],
                ));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("Td", vec![real(to_x(*x)), real(to_y(*y))]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("rg", color_operands(*fill)));
                ops.push(Operation::new(
                    "re",
                    vec![
                        real(to_x(*x)),
                        real(to_y(*y + *height)),
                        real(*width * MM_TO_PT),
                        real(*height * MM_TO_PT),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            Element::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![real(*width * MM_TO_PT)]));
                ops.push(Operation::new("m", vec![real(to_x(*x1)), real(to_y(*y1))]));
                ops.push(Operation::new("l", vec![real(to_x(*x2)), real(to_y(*y2))]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    ops
}

/// Serialize the layout as a PDF document
pub fn render_pdf(
    layout: &ReportLayout,
    config: &ReportConfig,
    info: &DocumentInfo,
) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(&page.elements, config.page_height_mm),
        };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::Render(format!("Failed to encode page content: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            real(config.page_width_mm * MM_TO_PT),
            real(config.page_height_mm * MM_TO_PT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(&info.title), StringFormat::Literal),
        "Producer" => Object::String(encode_win_ansi(&info.producer), StringFormat::Literal),
        "CreationDate" => Object::string_literal(info.creation_date.as_str()),
    });
    doc.trailer.set("Info", info_id);

    if config.compress {
        doc.compress();
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::Render(format!("Failed to save PDF: {}", e)))?;

    tracing::debug!(
        pages = layout.pages.len(),
        bytes = buffer.len(),
        "Report PDF written"
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_report, Page};
    use crate::types::{MatchedSource, ReportRequest, SimilarityResult};

    fn sample_layout(config: &ReportConfig) -> ReportLayout {
        let result = SimilarityResult {
            similarity: 0.85,
            is_plagiarized: true,
            message: "⚠️ Plagiarism Detected! Similarity Score: 0.85".to_string(),
            matched_sources: vec![MatchedSource::new("https://example.com/x", 0.9)],
        };
        let request = ReportRequest::new("Essay (draft)", "body text", result.clone());
        layout_report(&request, &result, config, "10/14/2026, 9:05:00 AM")
    }

    fn shown_strings(doc: &Document) -> Vec<Vec<u8>> {
        let mut strings = Vec::new();
        for (_, page_id) in doc.get_pages() {
            let content = doc.get_and_decode_page_content(page_id).unwrap();
            for op in content.operations {
                if op.operator == "Tj" {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        strings.push(bytes.clone());
                    }
                }
            }
        }
        strings
    }

    #[test]
    fn test_pdf_loads_back() {
        let config = ReportConfig::default();
        let layout = sample_layout(&config);
        let bytes = render_pdf(&layout, &config, &DocumentInfo::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), layout.page_count());
    }

    #[test]
    fn test_pdf_contains_text_operations() {
        for compress in [true, false] {
            let config = ReportConfig::default().with_compression(compress);
            let layout = sample_layout(&config);
            let bytes = render_pdf(&layout, &config, &DocumentInfo::default()).unwrap();
            let doc = Document::load_mem(&bytes).unwrap();
            let strings = shown_strings(&doc);

            assert!(strings.contains(&b"Plagiarism Check Report".to_vec()));
            assert!(strings.contains(&b"Essay (draft)".to_vec()));
            assert!(strings.contains(&b"https://example.com/x".to_vec()));
            assert!(strings.contains(&b"90%".to_vec()));
            assert!(strings.contains(&b"TextGuardian - Plagiarism Checker".to_vec()));
        }
    }

    #[test]
    fn test_pdf_has_one_page_per_layout_page() {
        let config = ReportConfig::default();
        let mut layout = sample_layout(&config);
        layout.pages.push(Page::default());
        let bytes = render_pdf(&layout, &config, &DocumentInfo::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_rect_is_flipped_to_pdf_space() {
        let ops = page_operations(
            &[Element::Rect {
                x: 20.0,
                y: 85.0,
                width: 100.0,
                height: 10.0,
                fill: Rgb(217, 48, 48),
            }],
            297.0,
        );
        let re = ops.iter().find(|op| op.operator == "re").unwrap();
        let values: Vec<f32> = re
            .operands
            .iter()
            .map(|o| match o {
                Object::Real(v) => *v,
                other => panic!("unexpected operand {:?}", other),
            })
            .collect();
        assert!((values[0] - 20.0 * MM_TO_PT).abs() < 0.01);
        assert!((values[1] - 202.0 * MM_TO_PT).abs() < 0.01);
        assert!((values[2] - 100.0 * MM_TO_PT).abs() < 0.01);
        assert!((values[3] - 10.0 * MM_TO_PT).abs() < 0.01);
    }
}
