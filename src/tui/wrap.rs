use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode::{display_width, truncate_to_width};

/// Greedy word wrap of `text` into lines at most `width` cells wide.
///
/// Breaks at whitespace; a single word wider than `width` is split at
/// grapheme boundaries. Existing newlines start new lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut col = 0;
        for word in paragraph.split_whitespace() {
            let ww = display_width(word);
            let sep = usize::from(col > 0);
            if col + sep + ww <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                col += sep + ww;
                continue;
            }
            if col > 0 {
                lines.push(std::mem::take(&mut current));
                col = 0;
            }
            if ww <= width {
                current.push_str(word);
                col = ww;
                continue;
            }
            // Word longer than a whole line: hard-split it
            for g in word.graphemes(true) {
                let gw = display_width(g);
                if col + gw > width && col > 0 {
                    lines.push(std::mem::take(&mut current));
                    col = 0;
                }
                current.push_str(g);
                col += gw;
            }
        }
        lines.push(current);
    }
    lines
}

/// Keep at most `max` lines, marking the last kept line with `…` when
/// anything was cut.
pub fn clamp_lines(mut lines: Vec<String>, max: usize, width: usize) -> Vec<String> {
    if lines.len() <= max {
        return lines;
    }
    lines.truncate(max);
    if let Some(last) = lines.last_mut() {
        let marked = format!("{} \u{2026}", last.trim_end());
        *last = truncate_to_width(&marked, width);
    }
    lines
}
