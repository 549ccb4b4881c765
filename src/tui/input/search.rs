use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode::pop_grapheme;

/// Keys while typing in the search box. Every edit reschedules the
/// debounced filter; leaving the box applies it at once.
pub(super) fn handle_search(app: &mut App, key: KeyEvent, now: Instant) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            app.search_input.clear();
            app.on_search_input(now);
        }
        (_, KeyCode::Esc) | (_, KeyCode::Enter) => {
            app.flush_search();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Tab) => {
            app.flush_search();
            app.mode = Mode::Navigate;
            app.focus_next();
        }
        (_, KeyCode::Backspace) => {
            if pop_grapheme(&mut app.search_input) {
                app.on_search_input(now);
            }
        }
        (modifiers, KeyCode::Char(c)) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
            app.on_search_input(now);
        }
        _ => {}
    }
}
