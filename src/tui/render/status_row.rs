use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, Mode, View};

use super::helpers::spans_width;

/// Render the status row (bottom of screen): key hints or the search
/// prompt on the left, the footer on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = match app.mode {
        Mode::Navigate => {
            if app.site.config.ui.show_key_hints {
                vec![Span::styled(
                    format!(" {}", key_hints(app)),
                    Style::default().fg(app.theme.dim).bg(bg),
                )]
            } else {
                Vec::new()
            }
        }
        Mode::Search => vec![
            Span::styled(
                format!("/{}", app.search_input),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
            Span::styled(
                "  Enter apply  Esc done",
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ],
    };

    let footer = format!("\u{00A9} {} {} ", app.year, app.site.config.site.name);
    let content_width = spans_width(&spans);
    let footer_width = crate::util::unicode::display_width(&footer);
    if content_width + footer_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width - footer_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            footer,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hints(app: &App) -> &'static str {
    match (app.view, app.focus) {
        (View::Timeline, _) => "j/k move  Enter details  i layout  v projects  ? help",
        (View::Grid, Focus::Card(_)) => "Enter details  m tags  Tab next  t theme  ? help",
        (View::Grid, Focus::Chip(_)) => "Enter select  M more chips  Tab next  ? help",
        (View::Grid, Focus::Search) => "/ search  Tab next  v timeline  t theme  ? help  q quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn navigate_shows_hints_and_footer() {
        let app = app_with_projects(sample_projects());
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(out.starts_with(" / search"), "{out}");
        assert!(out.ends_with(&format!("\u{00A9} {} Portfolio", app.year)));
    }

    #[test]
    fn hints_can_be_turned_off() {
        let mut app = app_with_projects(sample_projects());
        app.site.config.ui.show_key_hints = false;
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(!out.contains("search"));
        assert!(out.contains("Portfolio"));
    }

    #[test]
    fn search_prompt() {
        let mut app = app_with_projects(sample_projects());
        app.mode = Mode::Search;
        app.search_input = "rust".into();
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(out.starts_with("/rust\u{258C}  Enter apply"), "{out}");
    }
}
