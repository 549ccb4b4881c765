mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::project_io::{self, ProjectError};
use crate::io::state::PrefsStore;
use crate::io::stats_client::{GithubClient, fetch_all};
use crate::model::{ProjectRecord, Site, ThemeMode};
use crate::ops::detail::detail_view;
use crate::ops::filter::{ALL_TAG, filter_indices, normalize_query, tag_counts};
use crate::ops::stats::stats_requests;

/// Shown by `list` when the filter leaves nothing
const NO_MATCHES: &str = "No projects match your filters.";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let start = start_dir(cli.site_dir.as_deref())?;

    match cli.command {
        None => crate::tui::run(Some(&start)),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, &start),
            Commands::List(args) => cmd_list(&start, args, json),
            Commands::Tags => cmd_tags(&start, json),
            Commands::Show(args) => cmd_show(&start, args, json),
            Commands::Stats(args) => cmd_stats(&start, args, json),
            Commands::Theme(args) => cmd_theme(&start, args, json),
            Commands::Config(args) => cmd_config(&start, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Directory to start site discovery from: `-C` if given, else the cwd
fn start_dir(site_dir: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match site_dir {
        Some(dir) => Ok(std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir.display(), e))?),
        None => Ok(std::env::current_dir()?),
    }
}

fn load_site(start: &Path) -> Result<Site, ProjectError> {
    let root = project_io::discover_site(start)?;
    project_io::open_site(&root)
}

fn load_site_projects(start: &Path) -> Result<(Site, Vec<ProjectRecord>), ProjectError> {
    let site = load_site(start)?;
    let projects = project_io::load_projects(&site)?;
    Ok((site, projects))
}

/// Resolve a `show` argument: a 1-based number, or a title (case-insensitive)
fn find_project(projects: &[ProjectRecord], selector: &str) -> Result<usize, String> {
    if let Ok(n) = selector.parse::<usize>() {
        if n >= 1 && n <= projects.len() {
            return Ok(n - 1);
        }
        return Err(format!(
            "no project #{} (there are {})",
            n,
            projects.len()
        ));
    }
    let wanted = selector.to_lowercase();
    projects
        .iter()
        .position(|p| p.display_title().to_lowercase() == wanted)
        .ok_or_else(|| format!("no project titled '{}'", selector))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(start: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_site, projects) = load_site_projects(start)?;
    let tag = args.tag.as_deref().unwrap_or(ALL_TAG);
    let query = normalize_query(args.query.as_deref().unwrap_or(""));
    let indices = filter_indices(&projects, tag, &query);

    if json {
        let results: Vec<ProjectJson> = indices
            .iter()
            .map(|&i| project_to_json(i, &projects[i]))
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if indices.is_empty() {
        println!("{}", NO_MATCHES);
        return Ok(());
    }
    for &i in &indices {
        for line in format_project_lines(i, &projects[i]) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_tags(start: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_site, projects) = load_site_projects(start)?;
    let counts = tag_counts(&projects);
    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        for line in format_tag_counts(&counts) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(start: &Path, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_site, projects) = load_site_projects(start)?;
    let idx = find_project(&projects, &args.project)?;
    if json {
        let result = project_to_json(idx, &projects[idx]);
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in format_detail(&detail_view(idx, &projects[idx])) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(start: &Path, args: StatsArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (site, projects) = load_site_projects(start)?;
    let config = &site.config.stats;
    if !config.lookups_enabled() {
        return Err(
            "repository stats are off: set stats.account_name and stats.enable_repo_stats".into(),
        );
    }

    let tag = args.tag.as_deref().unwrap_or(ALL_TAG);
    let requests: Vec<_> = stats_requests(&projects, config)
        .into_iter()
        .filter(|r| tag == ALL_TAG || projects[r.project_index].has_tag(tag))
        .collect();

    let client = GithubClient::new(config)?;
    let updates = fetch_all(&client, &requests);

    if json {
        let results: Vec<StatsEntryJson> = requests
            .iter()
            .zip(&updates)
            .map(|(req, update)| {
                let idx = req.project_index;
                stats_to_json(idx, &projects[idx], &req.repo, &update.result)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for update in &updates {
        let idx = update.project_index;
        if let Err(e) = &update.result {
            tracing::debug!(project = idx, error = %e, "stats lookup failed");
        }
        println!(
            "{}",
            format_stats_line(idx, &projects[idx], update.result.as_ref().ok())
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_theme(start: &Path, args: ThemeArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let site = load_site(start)?;
    let mut prefs = PrefsStore::open(&site.root);

    let theme = match args.mode.as_deref() {
        None => prefs.theme(),
        Some(mode) => {
            let theme = match mode {
                "toggle" => prefs.theme().toggled(),
                other => ThemeMode::parse(other)
                    .ok_or_else(|| format!("unknown theme '{}' (dark, light, toggle)", other))?,
            };
            prefs.set_theme(theme)?;
            theme
        }
    };

    if json {
        let result = ThemeJson {
            theme: theme.as_str().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", theme.as_str());
    }
    Ok(())
}

fn cmd_config(start: &Path, args: ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let root = project_io::discover_site(start)?;
    let (config, mut doc) = config_io::read_config(&root)?;

    match args.value {
        None => println!("{}", config_io::config_value(&config, &args.key)?),
        Some(value) => {
            config_io::set_config_value(&mut doc, &args.key, &value)?;
            config_io::write_config(&root, &doc)?;
            tracing::info!(key = %args.key, "config updated");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(titles: &[&str]) -> Vec<ProjectRecord> {
        titles
            .iter()
            .map(|t| ProjectRecord {
                title: Some(t.to_string()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn find_project_by_number() {
        let projects = titled(&["Alpha", "Beta"]);
        assert_eq!(find_project(&projects, "2"), Ok(1));
        assert!(find_project(&projects, "0").is_err());
        assert!(find_project(&projects, "3").is_err());
    }

    #[test]
    fn find_project_by_title_ignores_case() {
        let projects = titled(&["Alpha", "Beta", "beta"]);
        assert_eq!(find_project(&projects, "BETA"), Ok(1));
        assert!(find_project(&projects, "Gamma").is_err());
    }

    #[test]
    fn untitled_projects_match_fallback_title() {
        let projects = vec![ProjectRecord::default()];
        assert_eq!(find_project(&projects, "untitled project"), Ok(0));
    }
}
