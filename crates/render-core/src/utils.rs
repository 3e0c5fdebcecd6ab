use crate::metrics::{char_width, text_width};
use crate::types::TextStyle;

const ELLIPSIS: &str = "...";

/// Width of `text` drawn in `style`.
pub fn styled_width(text: &str, style: &TextStyle) -> f32 {
    text_width(text, style.font_size, style.weight)
}

/// Shorten `text` with a trailing ellipsis so that its width in `style` fits `max_width`.
///
/// Returns an empty string when not even the ellipsis fits.
pub fn truncate_to_width(text: &str, style: &TextStyle, max_width: f32) -> String {
    if styled_width(text, style) <= max_width {
        return text.to_string();
    }
    let budget = max_width - styled_width(ELLIPSIS, style);
    if budget < 0.0 {
        return String::new();
    }

    let mut used = 0.0;
    let mut out = String::new();
    for ch in text.chars() {
        let advance = f32::from(char_width(ch, style.weight)) * style.font_size / 1000.0;
        if used + advance > budget {
            break;
        }
        used += advance;
        out.push(ch);
    }
    let mut out = out.trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}
