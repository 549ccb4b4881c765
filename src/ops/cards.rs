use crate::model::project::ProjectRecord;
use crate::ops::stats::RepoStats;

/// Tags shown on a collapsed card
pub const VISIBLE_TAG_LIMIT: usize = 2;

/// Tags starting with this glyph get the award treatment
pub const AWARD_MARKER: char = '\u{1F3C6}';

/// Stats text shown until a lookup succeeds
pub const STATS_PLACEHOLDER: &str = "\u{2605} \u{2014}   \u{1F374} \u{2014}";

/// Everything a surface needs to draw one project card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Position of the project in the loaded list
    pub index: usize,
    pub image: ImageView,
    pub title: String,
    pub description: String,
    /// Tags currently shown (all of them when expanded)
    pub tags: Vec<TagView>,
    pub tag_toggle: Option<TagToggle>,
    pub stats_text: String,
    pub links: Vec<LinkView>,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    pub text: String,
    pub award: bool,
}

/// "+N more" / "Show less" control on a card's tag row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagToggle {
    More(usize),
    Less,
}

impl TagToggle {
    pub fn label(self) -> String {
        match self {
            TagToggle::More(n) => format!("+{} more", n),
            TagToggle::Less => "Show less".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Repo,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub kind: LinkKind,
    pub url: String,
}

impl LinkView {
    pub fn label(&self) -> &'static str {
        match self.kind {
            LinkKind::Repo => "GitHub",
            LinkKind::Live => "Live Demo",
        }
    }
}

pub fn is_award_tag(tag: &str) -> bool {
    tag.starts_with(AWARD_MARKER)
}

/// Toggle shown for a tag row of `total` tags, if any.
pub fn tag_toggle(total: usize, expanded: bool) -> Option<TagToggle> {
    if total <= VISIBLE_TAG_LIMIT {
        None
    } else if expanded {
        Some(TagToggle::Less)
    } else {
        Some(TagToggle::More(total - VISIBLE_TAG_LIMIT))
    }
}

pub fn stats_text(stats: Option<&RepoStats>) -> String {
    match stats {
        Some(s) => format!("\u{2605} {}   \u{1F374} {}", s.stars, s.forks),
        None => STATS_PLACEHOLDER.to_string(),
    }
}

pub fn image_view(project: &ProjectRecord) -> ImageView {
    let alt = match project.title.as_deref() {
        Some(t) if !t.is_empty() => format!("{} thumbnail", t),
        _ => "Project thumbnail".to_string(),
    };
    ImageView {
        src: project.image.clone().unwrap_or_default(),
        alt,
    }
}

pub fn card_links(project: &ProjectRecord) -> Vec<LinkView> {
    let mut links = Vec::new();
    if let Some(url) = project.repo_url.as_deref().filter(|u| !u.is_empty()) {
        links.push(LinkView {
            kind: LinkKind::Repo,
            url: url.to_string(),
        });
    }
    if let Some(url) = project.live_url.as_deref().filter(|u| !u.is_empty()) {
        links.push(LinkView {
            kind: LinkKind::Live,
            url: url.to_string(),
        });
    }
    links
}

/// Build the card for `project`.
pub fn card_view(
    index: usize,
    project: &ProjectRecord,
    tags_expanded: bool,
    stats: Option<&RepoStats>,
) -> CardView {
    let shown = if tags_expanded {
        project.tags.len()
    } else {
        project.tags.len().min(VISIBLE_TAG_LIMIT)
    };
    let tags = project.tags[..shown]
        .iter()
        .map(|t| TagView {
            text: t.clone(),
            award: is_award_tag(t),
        })
        .collect();

    CardView {
        index,
        image: image_view(project),
        title: project.display_title().to_string(),
        description: project.description_text().to_string(),
        tags,
        tag_toggle: tag_toggle(project.tags.len(), tags_expanded),
        stats_text: stats_text(stats),
        links: card_links(project),
        featured: project.featured,
    }
}
