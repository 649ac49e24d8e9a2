//! Helvetica text metrics for alignment and word wrapping.

/// Advance widths (1/1000 em) of the standard Helvetica face for ASCII
/// 32..=126. Bold and oblique text is measured with the same table.
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

const FALLBACK_WIDTH: u16 = 556;
const MM_PER_POINT: f32 = 25.4 / 72.0;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

fn glyph_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` in millimetres at `font_size` points.
pub fn text_width_mm(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    units as f32 / 1000.0 * font_size * MM_PER_POINT
}

/// Distance between baselines of consecutive lines, in millimetres.
pub fn line_height_mm(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR * MM_PER_POINT
}

/// Greedy word wrap so that no line exceeds `max_width_mm`.
///
/// A single word wider than the limit is kept whole on its own line.
pub fn split_text_to_size(text: &str, max_width_mm: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && text_width_mm(&candidate, font_size) > max_width_mm {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Hi" = 722 + 222 units at 10pt
        let expected = 944.0 / 1000.0 * 10.0 * MM_PER_POINT;
        assert!((text_width_mm("Hi", 10.0) - expected).abs() < 1e-4);
        assert_eq!(text_width_mm("", 12.0), 0.0);
        assert!(text_width_mm("W", 10.0) > text_width_mm("i", 10.0));
    }

    #[test]
    fn test_split_respects_width() {
        let text = "This scenario simulation shows that if the specified growth rates occur \
                    simultaneously, GDP is predicted to grow by 3.456%.";
        let lines = split_text_to_size(text, 60.0, 10.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width_mm(l, 10.0) <= 60.0));
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_split_keeps_long_word() {
        let lines = split_text_to_size("a Supercalifragilisticexpialidocious b", 5.0, 10.0);
        assert_eq!(lines, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
    }
}
