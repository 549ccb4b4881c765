mod modal;
mod navigate;
mod search;

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use super::app::{App, Dir, Mode, View};

use modal::handle_modal;
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // The modal owns the keyboard while open
    if app.modal.is_open() {
        handle_modal(app, key);
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key, now),
    }
}

/// Handle a mouse event. A click outside the open modal's dialog closes it;
/// the wheel scrolls the current page.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let pos = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !app.modal.is_open() {
                return;
            }
            let on_backdrop = app.modal_area.is_some_and(|area| !area.contains(pos));
            let on_close = app.modal_close_area.is_some_and(|area| area.contains(pos));
            if on_backdrop || on_close {
                app.close_modal();
            }
        }
        MouseEventKind::ScrollDown if !app.modal.is_open() => scroll(app, 1),
        MouseEventKind::ScrollUp if !app.modal.is_open() => scroll(app, -1),
        _ => {}
    }
}

fn scroll(app: &mut App, delta: isize) {
    match app.view {
        View::Grid => {
            let dir = if delta > 0 { Dir::Down } else { Dir::Up };
            if matches!(app.focus, super::app::Focus::Card(_)) {
                app.move_focus(dir);
            } else if delta > 0 {
                app.grid_scroll = app.grid_scroll.saturating_add(1);
            } else {
                app.grid_scroll = app.grid_scroll.saturating_sub(1);
            }
        }
        View::Timeline => {
            let len = app.projects.len();
            app.timeline.move_cursor(delta, len);
        }
    }
}

/// Shift+letter arrives as an uppercase char on some terminals and as a
/// lowercase char with SHIFT on others; fold both to uppercase.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
