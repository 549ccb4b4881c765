use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::tui::app::App;
use crate::tui::modal::ModalControl;
use crate::tui::wrap::wrap_text;
use crate::util::unicode::truncate_to_width;

use super::helpers::centered_rect;

const CLOSE_LABEL: &str = "[ Close ]";

/// Render the details modal and remember where the dialog is
pub fn render_modal(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(content) = app.modal.content().cloned() else {
        app.modal_area = None;
        app.modal_close_area = None;
        return;
    };

    let dialog = centered_rect(70, 70, area);
    frame.render_widget(Clear, dialog);
    app.modal_area = Some(dialog);

    let bg = app.theme.background;
    let inner_w = dialog.width.saturating_sub(4) as usize;
    let text = Style::default().fg(app.theme.text).bg(bg);
    let label = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let link = Style::default()
        .fg(app.theme.blue)
        .bg(bg)
        .add_modifier(Modifier::UNDERLINED);

    let mut lines: Vec<Line> = Vec::new();
    for line in wrap_text(&content.description, inner_w) {
        lines.push(Line::from(Span::styled(line, text)));
    }
    lines.push(Line::from(""));

    let fields = [
        ("Tags: ", content.tags.as_str(), text),
        ("Repo: ", content.repo_text(), link),
        ("Live: ", content.live_text(), link),
    ];
    for (name, value, style) in fields {
        let style = if value == crate::ops::detail::NONE_MARK {
            text
        } else {
            style
        };
        lines.push(Line::from(vec![
            Span::styled(name, label),
            Span::styled(truncate_to_width(value, inner_w.saturating_sub(6)), style),
        ]));
    }
    lines.push(Line::from(""));

    // Controls row; the focused one is reversed. Close comes first, at the
    // left edge of the body (inside the border and padding).
    let controls_row = dialog.y + 1 + lines.len() as u16;
    app.modal_close_area = (controls_row < dialog.bottom().saturating_sub(1)).then(|| {
        Rect::new(
            dialog.x + 2,
            controls_row,
            (CLOSE_LABEL.len() as u16).min(inner_w as u16),
            1,
        )
    });

    let focused = app.modal.focused_control();
    let mut spans: Vec<Span> = Vec::new();
    for control in app.modal.controls() {
        let caption = match control {
            ModalControl::Close => CLOSE_LABEL.to_string(),
            ModalControl::RepoLink => "[ GitHub ]".to_string(),
            ModalControl::LiveLink => "[ Live Demo ]".to_string(),
        };
        let mut style = Style::default().fg(app.theme.text_bright).bg(bg);
        if focused == Some(control) {
            style = style
                .fg(app.theme.highlight)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        if !spans.is_empty() {
            spans.push(Span::styled("  ", text));
        }
        spans.push(Span::styled(caption, style));
    }
    lines.push(Line::from(spans));

    let title = Span::styled(
        format!(" {} ", content.title),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.selection_border).bg(bg))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Focus;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_fields_and_controls() {
        let mut app = app_with_projects(sample_projects());
        app.focus = Focus::Card(1);
        app.open_details(1);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_modal(frame, &mut app, area);
        });
        assert!(out.contains(" Beta "), "{out}");
        assert!(out.contains("Web front end"));
        assert!(out.contains("Tags: Y"));
        assert!(out.contains("Repo: \u{2014}"));
        assert!(out.contains("Live: https://beta.example.com"));
        assert!(out.contains("[ Close ]  [ Live Demo ]"));
        assert!(!out.contains("[ GitHub ]"));
        let dialog = app.modal_area.unwrap();
        assert!(dialog.width < TERM_W && dialog.height < TERM_H);
    }

    #[test]
    fn records_close_control_area() {
        let mut app = app_with_projects(sample_projects());
        app.open_details(0);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_modal(frame, &mut app, area);
        });
        let close = app.modal_close_area.unwrap();
        let row = out.lines().nth(close.y as usize).unwrap();
        let start = close.x as usize;
        let cells: String = row.chars().skip(start).take(close.width as usize).collect();
        assert_eq!(cells, "[ Close ]");
    }

    #[test]
    fn untagged_project_shows_dash() {
        let mut app = app_with_projects(vec![project("Solo", "", &[])]);
        app.open_details(0);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_modal(frame, &mut app, area);
        });
        assert!(out.contains("Tags: \u{2014}"), "{out}");
    }

    #[test]
    fn markup_in_fields_is_shown_verbatim() {
        let mut app = app_with_projects(vec![project("X", "<b>bold</b> & <script>", &[])]);
        app.open_details(0);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_modal(frame, &mut app, area);
        });
        assert!(out.contains("<b>bold</b> & <script>"), "{out}");
    }
}
