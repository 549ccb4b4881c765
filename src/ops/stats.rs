use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::config::StatsConfig;
use crate::model::project::ProjectRecord;

static GITHUB_REPO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://github\.com/([^/]+)/([^/#]+)").expect("valid repo url regex")
});

/// Star and fork counts for one repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepoStats {
    pub stars: u64,
    pub forks: u64,
}

/// The part of the repository metadata response we read.
#[derive(Debug, Deserialize)]
pub struct RepoMetadata {
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub forks_count: Option<u64>,
}

impl From<RepoMetadata> for RepoStats {
    fn from(meta: RepoMetadata) -> Self {
        RepoStats {
            stars: meta.stargazers_count.unwrap_or(0),
            forks: meta.forks_count.unwrap_or(0),
        }
    }
}

/// Why a lookup produced no stats. Never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("could not parse response: {0}")]
    Parse(String),
}

/// A single lookup to perform for a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub project_index: usize,
    /// The configured account name, used verbatim in the request path
    pub owner: String,
    pub repo: String,
}

/// Result of one lookup, delivered back to the UI
#[derive(Debug)]
pub struct StatsUpdate {
    pub project_index: usize,
    pub result: Result<RepoStats, StatsError>,
}

/// Something that can answer star/fork lookups.
pub trait RepoStatsSource: Send + Sync {
    fn fetch(&self, owner: &str, repo: &str) -> Result<RepoStats, StatsError>;
}

/// Split a GitHub repository URL into (owner, repo).
pub fn parse_github_repo(url: &str) -> Option<(String, String)> {
    let caps = GITHUB_REPO_RE.captures(url)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// The lookup for `project`, if lookups are enabled and its repo belongs to
/// the configured account.
pub fn stats_request(
    project_index: usize,
    project: &ProjectRecord,
    config: &StatsConfig,
) -> Option<StatsRequest> {
    if !config.lookups_enabled() {
        return None;
    }
    let (owner, repo) = parse_github_repo(project.repo_url.as_deref()?)?;
    if owner.to_lowercase() != config.account_name.to_lowercase() {
        return None;
    }
    Some(StatsRequest {
        project_index,
        owner: config.account_name.clone(),
        repo,
    })
}

/// Lookups for every qualifying project, in document order.
pub fn stats_requests(projects: &[ProjectRecord], config: &StatsConfig) -> Vec<StatsRequest> {
    projects
        .iter()
        .enumerate()
        .filter_map(|(i, p)| stats_request(i, p, config))
        .collect()
}
