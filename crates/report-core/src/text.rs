//! Text measurement and shaping for the standard Helvetica font
//!
//! Widths come from the Helvetica AFM metrics (1/1000 em). Bold text is
//! measured with the regular metrics, which is close enough for centering.

/// Millimetres to PDF points
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// Marker appended to truncated excerpts
pub const ELLIPSIS: &str = "...";

/// Advance widths for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const DEFAULT_WIDTH: u16 = 556;

fn char_width(ch: char) -> u16 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of `text` in millimetres at `font_size` points
pub fn text_width_mm(text: &str, font_size: f32) -> f32 {
    let units: f32 = text.chars().map(|c| char_width(c) as f32).sum();
    units / 1000.0 * font_size / MM_TO_PT
}

/// Baseline-to-baseline distance for a font size, in millimetres
pub fn line_height_mm(font_size: f32) -> f32 {
    font_size * 1.15 / MM_TO_PT
}

/// Encode text for a WinAnsiEncoding font.
///
/// Characters with no WinAnsi code point become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|ch| {
            let code = ch as u32;
            match code {
                0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
                // Control characters and variation selectors carry no glyph
                0x00..=0x1F | 0x7F | 0xFE00..=0xFE0F | 0x200B..=0x200D => None,
                _ => Some(win_ansi_high(ch).unwrap_or(b'?')),
            }
        })
        .collect()
}

fn win_ansi_high(ch: char) -> Option<u8> {
    let byte = match ch {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// First `limit` characters of `content`, with [`ELLIPSIS`] appended when
/// anything was cut
pub fn excerpt(content: &str, limit: usize) -> String {
    match content.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}{}", &content[..byte_index], ELLIPSIS),
        None => content.to_string(),
    }
}

fn is_decoration(ch: char) -> bool {
    matches!(
        ch,
        '⚠' | '✅' | '✓' | '✔' | '❌' | '✗' | '✘' | '\u{FE0F}' | '\u{FE0E}' | '\u{200D}'
    )
}

/// Remove leading status glyphs (warning sign, check marks) and the
/// whitespace after them
pub fn strip_decorations(message: &str) -> &str {
    message.trim_start_matches(|c: char| is_decoration(c) || c.is_whitespace())
}

/// Lowercase and join whitespace-separated words with hyphens
pub fn slug(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Greedy word wrap to `max_width_mm`.
///
/// Explicit newlines start a new line; a word wider than the line is broken
/// between characters.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size: f32) -> Vec<String> {
    let space_width = text_width_mm(" ", font_size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0f32;

        for word in paragraph.split_whitespace() {
            let word_width = text_width_mm(word, font_size);

            if !current.is_empty() && current_width + space_width + word_width <= max_width_mm {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_width <= max_width_mm {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = text_width_mm(ch.encode_utf8(&mut [0; 4]), font_size);
                if !current.is_empty() && current_width + ch_width > max_width_mm {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
