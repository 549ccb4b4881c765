use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Pack labelled items into lines no wider than `width`, keeping order.
/// Each item is `gap` cells from the previous one on the same line.
pub(super) fn pack_lines<T>(items: Vec<(usize, T)>, width: usize, gap: usize) -> Vec<Vec<T>> {
    let mut lines: Vec<Vec<T>> = Vec::new();
    let mut current: Vec<T> = Vec::new();
    let mut col = 0;
    for (w, item) in items {
        let sep = if current.is_empty() { 0 } else { gap };
        if !current.is_empty() && col + sep + w > width {
            lines.push(std::mem::take(&mut current));
            col = 0;
        }
        col += if current.is_empty() { w } else { gap + w };
        current.push(item);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_lines_wraps_in_order() {
        let items = vec![(4, 'a'), (4, 'b'), (4, 'c')];
        assert_eq!(pack_lines(items, 9, 1), vec![vec!['a', 'b'], vec!['c']]);
    }

    #[test]
    fn pack_lines_keeps_oversized_item() {
        let items = vec![(20, 'a'), (2, 'b')];
        assert_eq!(pack_lines(items, 10, 1), vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 50, area);
        assert_eq!(r.width, 60);
        assert!(r.x >= 19 && r.x <= 20);
    }
}
