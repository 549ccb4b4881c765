use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;
use crate::tui::modal::ModalControl;

pub(super) fn handle_modal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc if app.modal.listens_for_escape() => app.close_modal(),
        KeyCode::Tab | KeyCode::Right | KeyCode::Down => app.modal.focus_next(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Up => app.modal.focus_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => match app.modal.focused_control() {
            Some(ModalControl::Close) => app.close_modal(),
            // Links are shown as text; the terminal handles opening them
            Some(ModalControl::RepoLink) | Some(ModalControl::LiveLink) | None => {}
        },
        _ => {}
    }
}
