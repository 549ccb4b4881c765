use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::chips::ChipBar;
use crate::ops::filter::ALL_TAG;
use crate::tui::app::{App, Focus, Mode};
use crate::util::unicode::display_width;

use super::helpers::pack_lines;

const SEARCH_PLACEHOLDER: &str = "Search projects\u{2026}";

/// One drawable chip: label plus its position in the chip row
struct ChipCell {
    pos: usize,
    label: String,
    tag: Option<String>,
    pressed: bool,
}

fn chip_cells(bar: &ChipBar) -> Vec<ChipCell> {
    let mut cells: Vec<ChipCell> = bar
        .chips
        .iter()
        .enumerate()
        .map(|(pos, chip)| ChipCell {
            pos,
            label: format!(" {} ({}) ", chip.tag, chip.count),
            tag: Some(chip.tag.clone()),
            pressed: chip.pressed,
        })
        .collect();
    if let Some(toggle) = bar.toggle {
        cells.push(ChipCell {
            pos: bar.chips.len(),
            label: format!(" {} ", toggle.label()),
            tag: None,
            pressed: false,
        });
    }
    cells
}

fn chip_rows(bar: &ChipBar, width: u16) -> Vec<Vec<ChipCell>> {
    let items = chip_cells(bar)
        .into_iter()
        .map(|cell| (display_width(&cell.label), cell))
        .collect();
    pack_lines(items, (width as usize).saturating_sub(1).max(1), 1)
}

/// Rows taken by the search line, the chip rows, and a spacer
pub fn filter_bar_height(app: &App, width: u16) -> u16 {
    let rows = chip_rows(&app.chip_bar(), width).len();
    (rows + 2) as u16
}

/// Render the search box and the tag chips
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut lines: Vec<Line> = Vec::new();

    // Search line
    let search_focused = app.focus == Focus::Search || app.mode == Mode::Search;
    let label_style = if search_focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let mut spans = vec![Span::styled(" Search: ", label_style)];
    if app.search_input.is_empty() && app.mode != Mode::Search {
        spans.push(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(
            app.search_input.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }
    if app.mode == Mode::Search {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    lines.push(Line::from(spans));

    // Chip rows
    let bar = app.chip_bar();
    for row in chip_rows(&bar, area.width) {
        let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
        for (i, cell) in row.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", Style::default().bg(bg)));
            }
            let focused = app.focus == Focus::Chip(cell.pos);
            spans.push(Span::styled(cell.label, chip_style(app, &cell.tag, cell.pressed, focused)));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn chip_style(app: &App, tag: &Option<String>, pressed: bool, focused: bool) -> Style {
    let bg = app.theme.background;
    let mut style = match tag {
        _ if pressed => Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD),
        Some(t) if t == ALL_TAG => Style::default().fg(app.theme.text).bg(bg),
        Some(t) => Style::default().fg(app.theme.tag_color(t)).bg(bg),
        None => Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::ITALIC),
    };
    if focused {
        style = style
            .fg(app.theme.highlight)
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn many_tag_projects() -> Vec<crate::model::ProjectRecord> {
        let tags = ["a", "b", "c", "d", "e", "f", "g"];
        tags.iter()
            .map(|t| project(&format!("P{t}"), "", &[*t]))
            .collect()
    }

    #[test]
    fn shows_placeholder_and_chips() {
        let app = app_with_projects(sample_projects());
        let out = render_to_string(TERM_W, 3, |frame, area| {
            render_filter_bar(frame, &app, area);
        });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " Search: Search projects\u{2026}");
        assert!(lines[1].starts_with("  All (3)   X (2)   Y (1)   Z (1) "));
        assert!(lines[1].contains("Winner (1)"));
    }

    #[test]
    fn search_mode_shows_input_and_cursor() {
        let mut app = app_with_projects(sample_projects());
        app.mode = Mode::Search;
        app.search_input = "comp".into();
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_filter_bar(frame, &app, area);
        });
        assert_eq!(out, " Search: comp\u{258C}");
    }

    #[test]
    fn overflow_toggle_after_six_chips() {
        let mut app = app_with_projects(many_tag_projects());
        let out = render_to_string(TERM_W, 3, |frame, area| {
            render_filter_bar(frame, &app, area);
        });
        assert!(out.contains(" e (1) "));
        assert!(!out.contains(" f (1)"));
        assert!(out.contains("+2 more"), "{out}");

        app.toggle_chip_overflow();
        let out = render_to_string(TERM_W, 3, |frame, area| {
            render_filter_bar(frame, &app, area);
        });
        assert!(out.contains("g (1)"));
        assert!(out.contains("Show less"));
    }

    #[test]
    fn chips_wrap_on_narrow_width() {
        let app = app_with_projects(many_tag_projects());
        assert_eq!(filter_bar_height(&app, 200), 3);
        assert!(filter_bar_height(&app, 20) > 3);
    }
}
