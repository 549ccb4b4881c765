use crate::model::project::ProjectRecord;

/// Shown for an empty tag list or a missing URL
pub const NONE_MARK: &str = "\u{2014}";

/// Content of the details modal for one project.
///
/// Fields are plain text; surfaces decide how to present them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub index: usize,
    pub title: String,
    pub description: String,
    /// Comma-joined tags, or an em-dash when there are none
    pub tags: String,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
}

impl DetailView {
    pub fn repo_text(&self) -> &str {
        self.repo_url.as_deref().unwrap_or(NONE_MARK)
    }

    pub fn live_text(&self) -> &str {
        self.live_url.as_deref().unwrap_or(NONE_MARK)
    }
}

pub fn detail_view(index: usize, project: &ProjectRecord) -> DetailView {
    let tags = if project.tags.is_empty() {
        NONE_MARK.to_string()
    } else {
        project.tags.join(", ")
    };
    DetailView {
        index,
        title: project.display_title().to_string(),
        description: project.description_text().to_string(),
        tags,
        repo_url: project.repo_url.clone().filter(|u| !u.is_empty()),
        live_url: project.live_url.clone().filter(|u| !u.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_tags_and_keeps_urls() {
        let p = ProjectRecord {
            title: Some("Alpha".into()),
            description: Some("First".into()),
            tags: vec!["Rust".into(), "CLI".into()],
            repo_url: Some("https://github.com/me/alpha".into()),
            ..Default::default()
        };
        let view = detail_view(0, &p);
        assert_eq!(view.title, "Alpha");
        assert_eq!(view.tags, "Rust, CLI");
        assert_eq!(view.repo_text(), "https://github.com/me/alpha");
        assert_eq!(view.live_text(), "\u{2014}");
    }

    #[test]
    fn empty_project_uses_dashes() {
        let view = detail_view(2, &ProjectRecord::default());
        assert_eq!(view.title, "Untitled Project");
        assert_eq!(view.description, "");
        assert_eq!(view.tags, "\u{2014}");
        assert!(view.repo_url.is_none());
        assert!(view.live_url.is_none());
    }

    #[test]
    fn markup_in_fields_is_kept_verbatim() {
        let p = ProjectRecord {
            description: Some("<b>bold</b> & more".into()),
            ..Default::default()
        };
        assert_eq!(detail_view(0, &p).description, "<b>bold</b> & more");
    }
}
