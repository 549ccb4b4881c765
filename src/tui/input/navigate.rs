use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Dir, Focus, Mode, View};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            app.should_quit = true;
            return;
        }
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
            return;
        }
        (_, KeyCode::Char('t')) => {
            app.toggle_theme();
            return;
        }
        (_, KeyCode::Char('v')) => {
            app.toggle_view();
            return;
        }
        (_, KeyCode::Char('d')) => {
            if let Some(idx) = app.selected_project() {
                app.open_details(idx);
            }
            return;
        }
        _ => {}
    }

    match app.view {
        View::Grid => handle_grid(app, key),
        View::Timeline => handle_timeline(app, key),
    }
}

fn handle_grid(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => {
            app.focus = Focus::Search;
            app.mode = Mode::Search;
        }
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Left | KeyCode::Char('h') => app.move_focus(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_focus(Dir::Right),
        KeyCode::Up | KeyCode::Char('k') => app.move_focus(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_focus(Dir::Down),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_focus(),
        KeyCode::Char('m') => {
            if let Focus::Card(idx) = app.focus {
                app.toggle_card_tags(idx);
            }
        }
        KeyCode::Char('M') => app.toggle_chip_overflow(),
        _ => {}
    }
}

fn handle_timeline(app: &mut App, key: KeyEvent) {
    let len = app.projects.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.timeline.move_cursor(-1, len),
        KeyCode::Down | KeyCode::Char('j') => app.timeline.move_cursor(1, len),
        KeyCode::Home | KeyCode::Char('g') => app.timeline.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => app.timeline.cursor = len.saturating_sub(1),
        KeyCode::Char('i') => app.toggle_timeline_layout(),
        KeyCode::Enter => {
            if let Some(idx) = app.selected_project() {
                app.open_details(idx);
            }
        }
        _ => {}
    }
}
