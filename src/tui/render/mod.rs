pub mod filter_bar;
pub mod grid_view;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod modal_view;
pub mod status_row;
pub mod timeline_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, View};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    match app.view {
        View::Grid => {
            let bar_height = filter_bar::filter_bar_height(app, chunks[1].width);
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(bar_height), Constraint::Min(1)])
                .split(chunks[1]);
            filter_bar::render_filter_bar(frame, app, content[0]);
            grid_view::render_grid_view(frame, app, content[1]);
        }
        View::Timeline => timeline_view::render_timeline_view(frame, app, chunks[1]),
    }

    status_row::render_status_row(frame, app, chunks[2]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    // The modal sits above everything, help included
    if app.modal.is_open() {
        modal_view::render_modal(frame, app, area);
    } else {
        app.modal_area = None;
        app.modal_close_area = None;
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::tui::app::Focus;

    fn render_app(app: &mut App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, _area| render(frame, app))
    }

    #[test]
    fn full_screen_shows_header_chips_cards_and_footer() {
        let mut app = app_with_projects(sample_projects());
        let out = render_app(&mut app);
        assert!(out.contains("Portfolio"), "{out}");
        assert!(out.contains("Projects"));
        assert!(out.contains("All (3)"));
        assert!(out.contains("Alpha"));
        assert!(out.contains("Gamma"));
        assert!(out.contains(&format!("\u{00A9} {}", app.year)));
    }

    #[test]
    fn modal_renders_on_top_and_records_area() {
        let mut app = app_with_projects(sample_projects());
        app.focus = Focus::Card(0);
        app.open_details(0);
        let out = render_app(&mut app);
        assert!(out.contains("https://github.com/me/alpha"), "{out}");
        assert!(out.contains("Close"));
        assert!(app.modal_area.is_some());

        app.close_modal();
        render_app(&mut app);
        assert!(app.modal_area.is_none());
    }

    #[test]
    fn timeline_page_renders() {
        let mut app = app_with_projects(sample_projects());
        app.toggle_view();
        let out = render_app(&mut app);
        assert!(out.contains("Timeline"));
        assert!(out.contains("Beta"));
    }

    #[test]
    fn highlighted_spans_split_on_matches() {
        let re = Regex::new("(?i)al").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Alpha total",
            Style::default(),
            Style::default(),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Al", "pha tot", "al"]);
    }
}
