use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::model::{ProjectRecord, TimelineLayout};
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Rows per entry in each layout (card entries include their border)
const CARD_ENTRY_HEIGHT: u16 = 4;
const INFOGRAPHIC_ENTRY_HEIGHT: u16 = 3;

/// Render the timeline page: every project in document order
pub fn render_timeline_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    if area.height < 2 {
        return;
    }

    // Layout line
    let layout_line = Line::from(vec![
        Span::styled(
            " Timeline ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("\u{00B7} {} layout", app.timeline.layout.as_str()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(layout_line).style(Style::default().bg(bg)),
        Rect::new(area.x, area.y, area.width, 1),
    );
    let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);

    if app.projects.is_empty() {
        return;
    }

    let entry_h = match app.timeline.layout {
        TimelineLayout::Card => CARD_ENTRY_HEIGHT,
        TimelineLayout::Infographic => INFOGRAPHIC_ENTRY_HEIGHT,
    };
    let per_page = (body.height / entry_h).max(1) as usize;
    let len = app.projects.len();
    app.timeline.cursor = app.timeline.cursor.min(len - 1);
    app.timeline.scroll_to_cursor(per_page);
    let start = app.timeline.scroll;
    let end = (start + per_page).min(len);

    let now = app.frame_time;
    app.timeline.reveal.observe(start..end, now);

    for (row, idx) in (start..end).enumerate() {
        let rect = Rect::new(
            body.x,
            body.y + row as u16 * entry_h,
            body.width,
            entry_h.min(body.bottom() - (body.y + row as u16 * entry_h)),
        );
        let project = &app.projects[idx];
        let selected = idx == app.timeline.cursor;
        let progress = app.timeline.reveal.progress(idx, now);
        match app.timeline.layout {
            TimelineLayout::Card => {
                render_card_entry(frame, app, rect, idx, project, selected, progress)
            }
            TimelineLayout::Infographic => {
                let last = idx + 1 == len;
                render_axis_entry(frame, app, rect, idx, project, selected, progress, last)
            }
        }
    }
}

/// Base text style for an entry that is `progress` through its fade-in
fn fade_style(app: &App, progress: f32) -> Style {
    let fg = if progress < 1.0 {
        app.theme.dim
    } else {
        app.theme.text
    };
    Style::default().fg(fg).bg(app.theme.background)
}

fn title_spans(
    app: &App,
    idx: usize,
    project: &ProjectRecord,
    selected: bool,
    progress: f32,
    width: usize,
) -> Vec<Span<'static>> {
    let mut style = fade_style(app, progress).add_modifier(Modifier::BOLD);
    if progress >= 1.0 {
        style = style.fg(app.theme.text_bright);
    }
    if selected {
        style = style.fg(app.theme.highlight);
    }
    let mut spans = vec![Span::styled(
        truncate_to_width(&format!("{}. {}", idx + 1, project.display_title()), width),
        style,
    )];
    if project.featured {
        spans.push(Span::styled(
            " \u{2605}",
            Style::default().fg(app.theme.award()).bg(app.theme.background),
        ));
    }
    spans
}

fn summary(project: &ProjectRecord, width: usize) -> String {
    let mut text = project.description_text().to_string();
    if !project.tags.is_empty() {
        if !text.is_empty() {
            text.push_str(" \u{00B7} ");
        }
        text.push_str(&project.tags.join(", "));
    }
    truncate_to_width(&text, width)
}

fn render_card_entry(
    frame: &mut Frame,
    app: &App,
    rect: Rect,
    idx: usize,
    project: &ProjectRecord,
    selected: bool,
    progress: f32,
) {
    let inner_w = rect.width.saturating_sub(4) as usize;
    let border = if selected {
        app.theme.selection_border
    } else {
        app.theme.dim
    };
    let lines = vec![
        Line::from(title_spans(app, idx, project, selected, progress, inner_w)),
        Line::from(Span::styled(summary(project, inner_w), fade_style(app, progress))),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(app.theme.background))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

#[allow(clippy::too_many_arguments)]
fn render_axis_entry(
    frame: &mut Frame,
    app: &App,
    rect: Rect,
    idx: usize,
    project: &ProjectRecord,
    selected: bool,
    progress: f32,
    last: bool,
) {
    let bg = app.theme.background;
    let axis = Style::default().fg(app.theme.purple).bg(bg);
    let node = if selected { "\u{25C9}" } else { "\u{25CF}" };
    let text_w = (rect.width as usize).saturating_sub(6);

    let mut first = vec![Span::styled(format!("  {} ", node), axis)];
    first.extend(title_spans(app, idx, project, selected, progress, text_w));
    let mut lines = vec![
        Line::from(first),
        Line::from(vec![
            Span::styled("  \u{2502} ", axis),
            Span::styled(summary(project, text_w), fade_style(app, progress)),
        ]),
    ];
    if !last {
        lines.push(Line::from(Span::styled("  \u{2502}", axis)));
    }
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), rect);
}
