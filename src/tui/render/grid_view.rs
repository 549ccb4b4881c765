use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use regex::Regex;

use crate::ops::cards::{CardView, TagView};
use crate::tui::app::{App, Focus};
use crate::tui::wrap::{clamp_lines, wrap_text};
use crate::util::unicode::{display_width, truncate_to_width};

use super::helpers::pack_lines;
use super::push_highlighted_spans;

/// Shown in place of the grid when nothing matches
pub const EMPTY_MESSAGE: &str = "No projects match your filters.";

/// Narrowest a card may get before the grid drops a column
const MIN_CARD_WIDTH: u16 = 32;
const MAX_COLUMNS: usize = 3;
/// Description lines kept on a card
const DESCRIPTION_LINES: usize = 3;
const FEATURED_BADGE: &str = "\u{2605} Featured";

/// Cards per row for a grid `width` cells wide
pub fn grid_columns(width: u16) -> usize {
    ((width / MIN_CARD_WIDTH) as usize).clamp(1, MAX_COLUMNS)
}

/// Render the project grid (or the empty / error message)
pub fn render_grid_view(frame: &mut Frame, app: &mut App, area: Rect) {
    if let Some(message) = app.load_error.clone() {
        render_message(frame, app, area, &message, app.theme.red);
        return;
    }
    if app.visible.is_empty() {
        render_message(frame, app, area, EMPTY_MESSAGE, app.theme.dim);
        return;
    }

    let cols = grid_columns(area.width);
    let card_w = area.width / cols as u16;
    let inner_w = card_w.saturating_sub(4) as usize;
    let search_re = app.active_search_re();

    let cards = app.card_views();
    let focused_idx = match app.focus {
        Focus::Card(idx) => Some(idx),
        _ => None,
    };
    let bodies: Vec<Vec<Line<'static>>> = cards
        .iter()
        .map(|card| {
            let focused = focused_idx == Some(card.index);
            card_lines(app, card, inner_w, focused, search_re.as_ref())
        })
        .collect();

    // Row heights: tallest card in the row plus its border
    let heights: Vec<u16> = bodies
        .chunks(cols)
        .map(|row| row.iter().map(|b| b.len()).max().unwrap_or(0) as u16 + 2)
        .collect();

    // Keep the focused row on screen
    let mut scroll = app.grid_scroll.min(heights.len().saturating_sub(1));
    let focus_row = focused_idx
        .and_then(|idx| app.visible.iter().position(|&i| i == idx))
        .map(|pos| pos / cols);
    if let Some(row) = focus_row {
        if row < scroll {
            scroll = row;
        }
        while scroll < row && heights[scroll..=row].iter().sum::<u16>() > area.height {
            scroll += 1;
        }
    }
    app.grid_columns = cols;
    app.grid_scroll = scroll;

    let mut y = area.y;
    let mut cards_iter = cards.iter().zip(bodies).skip(scroll * cols);
    for &height in &heights[scroll..] {
        if y >= area.bottom() {
            break;
        }
        let h = height.min(area.bottom() - y);
        for col in 0..cols {
            let Some((card, body)) = cards_iter.next() else {
                break;
            };
            let rect = Rect::new(area.x + col as u16 * card_w, y, card_w, h);
            let focused = focused_idx == Some(card.index);
            render_card(frame, app, rect, card, body, focused);
        }
        y += h;
    }
}

fn render_message(frame: &mut Frame, app: &App, area: Rect, message: &str, color: Color) {
    if area.height < 2 {
        return;
    }
    let rect = Rect::new(area.x, area.y + 1, area.width, 1);
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color).bg(app.theme.background))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, rect);
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    rect: Rect,
    card: &CardView,
    body: Vec<Line<'static>>,
    focused: bool,
) {
    let border_color = if focused {
        app.theme.selection_border
    } else if card.featured {
        app.theme.purple
    } else {
        app.theme.dim
    };
    let mut border_style = Style::default().fg(border_color).bg(app.theme.background);
    if focused {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(Paragraph::new(body).block(block), rect);
}

/// Body lines of one card, already fitted to `width`
fn card_lines(
    app: &App,
    card: &CardView,
    width: usize,
    focused: bool,
    search_re: Option<&Regex>,
) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    let text = Style::default().fg(app.theme.text).bg(bg);
    let matched = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let mut lines: Vec<Line<'static>> = Vec::new();

    // Title, with the featured badge when it fits
    let badge_w = if card.featured {
        display_width(FEATURED_BADGE) + 2
    } else {
        0
    };
    let title = truncate_to_width(&card.title, width.saturating_sub(badge_w).max(1));
    let mut spans = Vec::new();
    push_highlighted_spans(
        &mut spans,
        &title,
        text.fg(app.theme.text_bright).add_modifier(Modifier::BOLD),
        matched.add_modifier(Modifier::BOLD),
        search_re,
    );
    if card.featured && badge_w <= width {
        spans.push(Span::styled("  ", text));
        spans.push(Span::styled(
            FEATURED_BADGE,
            Style::default().fg(app.theme.award()).bg(bg),
        ));
    }
    lines.push(Line::from(spans));

    // Image stand-in: alt text
    lines.push(Line::from(Span::styled(
        truncate_to_width(&format!("\u{25A3} {}", card.image.alt), width),
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::ITALIC),
    )));

    if !card.description.is_empty() {
        let wrapped = clamp_lines(wrap_text(&card.description, width), DESCRIPTION_LINES, width);
        for line in wrapped {
            let mut spans = Vec::new();
            push_highlighted_spans(&mut spans, &line, text, matched, search_re);
            lines.push(Line::from(spans));
        }
    }

    lines.extend(tag_lines(app, card, width, focused));

    lines.push(Line::from(Span::styled(
        card.stats_text.clone(),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    // Links, then the details control
    let mut spans: Vec<Span<'static>> = Vec::new();
    for link in &card.links {
        spans.push(Span::styled(
            link.label(),
            Style::default()
                .fg(app.theme.blue)
                .bg(bg)
                .add_modifier(Modifier::UNDERLINED),
        ));
        spans.push(Span::styled("  ", text));
    }
    let details_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        text
    };
    spans.push(Span::styled("Details", details_style));
    lines.push(Line::from(spans));

    lines
}

fn tag_lines(app: &App, card: &CardView, width: usize, focused: bool) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    let mut items: Vec<(usize, Span<'static>)> = card
        .tags
        .iter()
        .map(|tag| (display_width(&tag.text), tag_span(app, tag)))
        .collect();
    if let Some(toggle) = card.tag_toggle {
        let label = toggle.label();
        let mut style = Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::ITALIC);
        if focused {
            style = style.fg(app.theme.highlight);
        }
        items.push((display_width(&label), Span::styled(label, style)));
    }

    pack_lines(items, width.max(1), 2)
        .into_iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (i, span) in row.into_iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("  ", Style::default().bg(bg)));
                }
                spans.push(span);
            }
            Line::from(spans)
        })
        .collect()
}

fn tag_span(app: &App, tag: &TagView) -> Span<'static> {
    let style = if tag.award {
        Style::default()
            .fg(app.theme.award())
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(app.theme.tag_color(&tag.text))
            .bg(app.theme.background)
    };
    Span::styled(tag.text.clone(), style)
}
