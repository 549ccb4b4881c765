use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ThemeMode;
use crate::tui::app::{App, View};

use super::helpers::spans_width;

/// Render the header: site name and page tabs, with separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();

    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{25B6}",
        Style::default().fg(app.theme.purple).bg(bg),
    ));
    spans.push(Span::styled(
        format!(" {} ", app.site.config.site.name),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    sep_cols.push(spans_width(&spans));
    spans.push(sep.clone());

    for (label, view) in [(" Projects ", View::Grid), (" Timeline ", View::Timeline)] {
        spans.push(Span::styled(label, tab_style(app, app.view == view)));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    // Theme indicator, right-aligned
    let indicator = match app.theme.mode {
        ThemeMode::Dark => "\u{263E} dark ",
        ThemeMode::Light => "\u{2600} light ",
    };
    let used = spans_width(&spans);
    let indicator_width = crate::util::unicode::display_width(indicator);
    let width = area.width as usize;
    if used + indicator_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - indicator_width),
            bg_style,
        ));
        spans.push(Span::styled(
            indicator,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let mut line = String::with_capacity(width * 3);
    for col in 0..width {
        if sep_cols.contains(&col) {
            line.push('\u{2534}');
        } else {
            line.push('\u{2500}');
        }
    }
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
