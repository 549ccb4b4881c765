use indexmap::IndexMap;
use serde::Serialize;

use crate::model::ProjectRecord;
use crate::ops::cards::stats_text;
use crate::ops::detail::DetailView;
use crate::ops::stats::RepoStats;
use crate::util::unicode::{display_width, pad_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectJson {
    /// 1-based position in the projects file
    pub number: usize,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    pub featured: bool,
}

#[derive(Serialize)]
pub struct StatsEntryJson {
    pub number: usize,
    pub title: String,
    pub repo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ThemeJson {
    pub theme: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn project_to_json(index: usize, project: &ProjectRecord) -> ProjectJson {
    ProjectJson {
        number: index + 1,
        title: project.display_title().to_string(),
        description: project.description_text().to_string(),
        tags: project.tags.clone(),
        image: project.image.clone(),
        repo_url: project.repo_url.clone(),
        live_url: project.live_url.clone(),
        featured: project.featured,
    }
}

pub fn stats_to_json(
    index: usize,
    project: &ProjectRecord,
    repo: &str,
    result: &Result<RepoStats, crate::ops::stats::StatsError>,
) -> StatsEntryJson {
    let (stars, forks, error) = match result {
        Ok(s) => (Some(s.stars), Some(s.forks), None),
        Err(e) => (None, None, Some(e.to_string())),
    };
    StatsEntryJson {
        number: index + 1,
        title: project.display_title().to_string(),
        repo: repo.to_string(),
        stars,
        forks,
        error,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format one project for `list`: a numbered title line, then tags and
/// links indented below it
pub fn format_project_lines(index: usize, project: &ProjectRecord) -> Vec<String> {
    let mut title = format!("{:>3}  {}", index + 1, project.display_title());
    if project.featured {
        title.push_str(" \u{2605}");
    }
    let mut lines = vec![title];
    if !project.tags.is_empty() {
        lines.push(format!("     {}", project.tags.join(", ")));
    }
    if let Some(url) = &project.repo_url {
        lines.push(format!("     repo: {}", url));
    }
    if let Some(url) = &project.live_url {
        lines.push(format!("     live: {}", url));
    }
    lines
}

/// Format the tag counts as an aligned two-column table
pub fn format_tag_counts(counts: &IndexMap<String, usize>) -> Vec<String> {
    let width = counts.keys().map(|t| display_width(t)).max().unwrap_or(0);
    counts
        .iter()
        .map(|(tag, n)| format!("{}  {}", pad_to_width(tag, width), n))
        .collect()
}

/// Format a project's details for `show`
pub fn format_detail(view: &DetailView) -> Vec<String> {
    let mut lines = vec![
        view.title.clone(),
        "\u{2500}".repeat(display_width(&view.title)),
    ];
    if !view.description.is_empty() {
        lines.push(view.description.clone());
    }
    lines.push(String::new());
    lines.push(format!("Tags: {}", view.tags));
    lines.push(format!("Repo: {}", view.repo_text()));
    lines.push(format!("Live: {}", view.live_text()));
    lines
}

/// Format one `stats` result; failures show the placeholder
pub fn format_stats_line(
    index: usize,
    project: &ProjectRecord,
    stats: Option<&RepoStats>,
) -> String {
    format!(
        "{:>3}  {}  {}",
        index + 1,
        project.display_title(),
        stats_text(stats)
    )
}
