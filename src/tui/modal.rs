use crate::ops::detail::DetailView;

use super::app::Focus;

/// Focusable controls inside the details modal, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalControl {
    Close,
    RepoLink,
    LiveLink,
}

/// The single shared details overlay.
///
/// Closed when `content` is `None`. While open it owns keyboard focus and
/// remembers where focus was before it opened. Opening again while already
/// open swaps the content and keeps the original return target.
#[derive(Debug, Clone, Default)]
pub struct Modal {
    content: Option<DetailView>,
    return_focus: Option<Focus>,
    cursor: usize,
}

impl Modal {
    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    /// Escape only closes while open
    pub fn listens_for_escape(&self) -> bool {
        self.is_open()
    }

    pub fn content(&self) -> Option<&DetailView> {
        self.content.as_ref()
    }

    /// Show `content`, capturing `current_focus` if the modal was closed.
    /// Focus moves to the first control.
    pub fn open(&mut self, content: DetailView, current_focus: Focus) {
        if !self.is_open() {
            self.return_focus = Some(current_focus);
        }
        self.content = Some(content);
        self.cursor = 0;
    }

    /// Close and hand back the focus captured on open.
    pub fn close(&mut self) -> Option<Focus> {
        if self.content.take().is_none() {
            return None;
        }
        self.cursor = 0;
        self.return_focus.take()
    }

    pub fn controls(&self) -> Vec<ModalControl> {
        let Some(content) = &self.content else {
            return Vec::new();
        };
        let mut controls = vec![ModalControl::Close];
        if content.repo_url.is_some() {
            controls.push(ModalControl::RepoLink);
        }
        if content.live_url.is_some() {
            controls.push(ModalControl::LiveLink);
        }
        controls
    }

    pub fn focused_control(&self) -> Option<ModalControl> {
        self.controls().get(self.cursor).copied()
    }

    pub fn focus_next(&mut self) {
        let n = self.controls().len();
        if n > 0 {
            self.cursor = (self.cursor + 1) % n;
        }
    }

    pub fn focus_prev(&mut self) {
        let n = self.controls().len();
        if n > 0 {
            self.cursor = (self.cursor + n - 1) % n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectRecord;
    use crate::ops::detail::detail_view;

    fn content(title: &str, repo: bool) -> DetailView {
        let project = ProjectRecord {
            title: Some(title.into()),
            repo_url: repo.then(|| "https://github.com/me/x".to_string()),
            ..Default::default()
        };
        detail_view(0, &project)
    }

    #[test]
    fn open_moves_focus_inside_and_close_restores() {
        let mut modal = Modal::default();
        assert!(!modal.is_open());
        assert!(!modal.listens_for_escape());

        modal.open(content("Alpha", false), Focus::Card(3));
        assert!(modal.is_open());
        assert!(modal.listens_for_escape());
        assert_eq!(modal.focused_control(), Some(ModalControl::Close));

        assert_eq!(modal.close(), Some(Focus::Card(3)));
        assert!(!modal.is_open());
        assert!(!modal.listens_for_escape());
        assert_eq!(modal.focused_control(), None);
    }

    #[test]
    fn reopening_replaces_content_and_keeps_return_target() {
        let mut modal = Modal::default();
        modal.open(content("Alpha", true), Focus::Card(0));
        modal.focus_next();
        modal.open(content("Beta", false), Focus::Search);
        assert_eq!(modal.content().unwrap().title, "Beta");
        assert_eq!(modal.focused_control(), Some(ModalControl::Close));
        assert_eq!(modal.close(), Some(Focus::Card(0)));
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut modal = Modal::default();
        assert_eq!(modal.close(), None);
    }

    #[test]
    fn controls_cycle() {
        let mut modal = Modal::default();
        modal.open(content("Alpha", true), Focus::Search);
        assert_eq!(
            modal.controls(),
            vec![ModalControl::Close, ModalControl::RepoLink]
        );
        modal.focus_next();
        assert_eq!(modal.focused_control(), Some(ModalControl::RepoLink));
        modal.focus_next();
        assert_eq!(modal.focused_control(), Some(ModalControl::Close));
        modal.focus_prev();
        assert_eq!(modal.focused_control(), Some(ModalControl::RepoLink));
    }
}
