use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, View};

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    match app.view {
        View::Grid => {
            lines.push(Line::from(Span::styled(" Projects", header_style)));
            add_binding(&mut lines, " /", "Search", key_style, desc_style);
            add_binding(
                &mut lines,
                " Tab/S-Tab",
                "Next / previous control",
                key_style,
                desc_style,
            );
            add_binding(
                &mut lines,
                " \u{2190}\u{2191}\u{2193}\u{2192}/hjkl",
                "Move between chips and cards",
                key_style,
                desc_style,
            );
            add_binding(
                &mut lines,
                " Enter",
                "Select chip / open details",
                key_style,
                desc_style,
            );
            add_binding(&mut lines, " m", "Show more / fewer tags", key_style, desc_style);
            add_binding(&mut lines, " M", "Show more / fewer chips", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Timeline => {
            lines.push(Line::from(Span::styled(" Timeline", header_style)));
            add_binding(
                &mut lines,
                " \u{2191}\u{2193}/jk",
                "Move cursor",
                key_style,
                desc_style,
            );
            add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
            add_binding(&mut lines, " Enter", "Open details", key_style, desc_style);
            add_binding(&mut lines, " i", "Card / infographic layout", key_style, desc_style);
            lines.push(Line::from(""));
        }
    }

    lines.push(Line::from(Span::styled(" Details", header_style)));
    add_binding(&mut lines, " Tab", "Next control", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Close", key_style, desc_style);
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " d", "Details for selection", key_style, desc_style);
    add_binding(&mut lines, " v", "Projects / timeline", key_style, desc_style);
    add_binding(&mut lines, " t", "Toggle theme", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn grid_help_lists_grid_keys() {
        let app = app_with_projects(sample_projects());
        let out = render_to_string(TERM_W, 40, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(out.contains("Key Bindings"));
        assert!(out.contains("Select chip / open details"));
        assert!(!out.contains("Card / infographic layout"));
    }

    #[test]
    fn timeline_help_lists_layout_key() {
        let mut app = app_with_projects(sample_projects());
        app.toggle_view();
        let out = render_to_string(TERM_W, 40, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(out.contains("Card / infographic layout"));
    }
}
