use indexmap::IndexMap;

use crate::model::project::ProjectRecord;

/// Synthetic tag that matches every project
pub const ALL_TAG: &str = "All";

/// Current tag selection and search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub selected_tag: String,
    /// Already normalized (see [`normalize_query`])
    pub query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            selected_tag: ALL_TAG.to_string(),
            query: String::new(),
        }
    }
}

/// Turn raw search box text into a query: trimmed and lowercased.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether a single project passes the tag and query conditions.
///
/// Tag comparison is exact. The query is compared case-insensitively against
/// "title description".
pub fn matches(project: &ProjectRecord, tag: &str, query: &str) -> bool {
    let matches_tag = tag == ALL_TAG || project.has_tag(tag);
    if !matches_tag {
        return false;
    }
    query.is_empty() || project.search_text().contains(&query.to_lowercase())
}

/// Indices of matching projects, in document order.
pub fn filter_indices(projects: &[ProjectRecord], tag: &str, query: &str) -> Vec<usize> {
    projects
        .iter()
        .enumerate()
        .filter(|(_, p)| matches(p, tag, query))
        .map(|(i, _)| i)
        .collect()
}

/// The matching subsequence of `projects`, preserving order.
pub fn filter_projects<'a>(
    projects: &'a [ProjectRecord],
    tag: &str,
    query: &str,
) -> Vec<&'a ProjectRecord> {
    projects.iter().filter(|p| matches(p, tag, query)).collect()
}

/// Count projects per tag.
///
/// "All" comes first with the total; the other tags follow in lexicographic
/// order. A tag listed twice on one project counts twice.
pub fn tag_counts(projects: &[ProjectRecord]) -> IndexMap<String, usize> {
    let mut tags: Vec<(&str, usize)> = Vec::new();
    for tag in projects.iter().flat_map(|p| p.tags.iter()) {
        if tag == ALL_TAG {
            continue;
        }
        match tags.iter_mut().find(|(t, _)| *t == tag.as_str()) {
            Some((_, n)) => *n += 1,
            None => tags.push((tag.as_str(), 1)),
        }
    }
    tags.sort_by(|a, b| a.0.cmp(b.0));

    let mut counts = IndexMap::with_capacity(tags.len() + 1);
    counts.insert(ALL_TAG.to_string(), projects.len());
    for (tag, n) in tags {
        counts.insert(tag.to_string(), n);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project(title: &str, description: &str, tags: &[&str]) -> ProjectRecord {
        ProjectRecord {
            title: Some(title.into()),
            description: Some(description.into()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn alpha_beta() -> Vec<ProjectRecord> {
        vec![project("Alpha", "", &["X"]), project("Beta", "", &["Y"])]
    }

    fn titles(list: &[&ProjectRecord]) -> Vec<String> {
        list.iter().map(|p| p.display_title().to_string()).collect()
    }

    #[test]
    fn all_and_empty_query_is_identity() {
        let projects = vec![
            project("Gamma", "third", &["Z"]),
            project("Alpha", "first", &[]),
            project("Beta", "second", &["X", "Y"]),
        ];
        let out = filter_projects(&projects, ALL_TAG, "");
        assert_eq!(titles(&out), vec!["Gamma", "Alpha", "Beta"]);
        assert_eq!(filter_indices(&projects, ALL_TAG, ""), vec![0, 1, 2]);
    }

    #[test]
    fn tag_selection() {
        let projects = alpha_beta();
        assert_eq!(titles(&filter_projects(&projects, "X", "")), vec!["Alpha"]);
        assert_eq!(titles(&filter_projects(&projects, "Y", "")), vec!["Beta"]);
    }

    #[test]
    fn query_selection() {
        let projects = alpha_beta();
        assert_eq!(titles(&filter_projects(&projects, ALL_TAG, "bet")), vec!["Beta"]);
        assert_eq!(
            titles(&filter_projects(&projects, ALL_TAG, "a")),
            vec!["Alpha", "Beta"]
        );
    }

    #[test]
    fn query_is_case_insensitive_but_tag_is_exact() {
        let projects = alpha_beta();
        assert_eq!(titles(&filter_projects(&projects, ALL_TAG, "ALPHA")), vec!["Alpha"]);
        assert!(filter_projects(&projects, "x", "").is_empty());
    }

    #[test]
    fn query_searches_description() {
        let projects = vec![
            project("One", "A parser for TOML", &[]),
            project("Two", "A web server", &[]),
        ];
        assert_eq!(titles(&filter_projects(&projects, ALL_TAG, "toml")), vec!["One"]);
    }

    #[test]
    fn tag_and_query_combine() {
        let projects = vec![
            project("Alpha", "", &["X"]),
            project("Also", "", &["Y"]),
            project("Beta", "", &["X"]),
        ];
        assert_eq!(titles(&filter_projects(&projects, "X", "al")), vec!["Alpha"]);
    }

    #[test]
    fn missing_fields_are_empty() {
        let projects = vec![ProjectRecord::default()];
        assert_eq!(filter_indices(&projects, ALL_TAG, ""), vec![0]);
        assert!(filter_indices(&projects, "X", "").is_empty());
        assert!(filter_indices(&projects, ALL_TAG, "untitled").is_empty());
    }

    #[test]
    fn filtering_is_idempotent_and_a_subsequence() {
        let projects = vec![
            project("Rust CLI", "terminal", &["Rust"]),
            project("Go API", "server", &["Go"]),
            project("Rust TUI", "terminal ui", &["Rust", "TUI"]),
            project("Site", "static site", &[]),
        ];
        for tag in ["All", "Rust", "Go", "TUI", "missing"] {
            for query in ["", "rust", "terminal", "zzz", "t"] {
                let once: Vec<ProjectRecord> = filter_projects(&projects, tag, query)
                    .into_iter()
                    .cloned()
                    .collect();
                let twice: Vec<ProjectRecord> = filter_projects(&once, tag, query)
                    .into_iter()
                    .cloned()
                    .collect();
                assert_eq!(once, twice);

                let idx = filter_indices(&projects, tag, query);
                assert!(idx.windows(2).all(|w| w[0] < w[1]));
                for i in idx {
                    assert!(matches(&projects[i], tag, query));
                }
            }
        }
    }

    #[test]
    fn counts_put_all_first_then_sorted() {
        let counts = tag_counts(&alpha_beta());
        let pairs: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(pairs, vec![("All", 2), ("X", 1), ("Y", 1)]);
    }

    #[test]
    fn counts_sort_lexicographically() {
        let projects = vec![
            project("a", "", &["rust", "CLI", "web"]),
            project("b", "", &["rust", "Async"]),
        ];
        let counts = tag_counts(&projects);
        let keys: Vec<&str> = counts.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["All", "Async", "CLI", "rust", "web"]);
        assert_eq!(counts["rust"], 2);
    }

    #[test]
    fn counts_ignore_literal_all_tag() {
        let projects = vec![project("a", "", &["All", "X"])];
        let counts = tag_counts(&projects);
        assert_eq!(counts["All"], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn counts_for_empty_list() {
        let counts = tag_counts(&[]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["All"], 0);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_query("  Rust CLI "), "rust cli");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn default_filter_state_shows_everything() {
        let state = FilterState::default();
        assert_eq!(state.selected_tag, ALL_TAG);
        assert_eq!(state.query, "");
    }
}
