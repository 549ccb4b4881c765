use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::project_io::{self, CONFIG_FILE};
use crate::model::config::default_projects_path;

const FOLIO_TOML_TEMPLATE: &str = r##"[site]
name = "{name}"
projects = "{projects}"

[stats]
# GitHub account whose repositories get star/fork counts.
# Leave empty to skip lookups.
account_name = "{account}"
enable_repo_stats = true
# api_base = "https://api.github.com"
# timeout_secs = 10

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
#
# [ui.tag_colors]
# rust = "#FF8844"
# web = "#44DDFF"
"##;

const SAMPLE_PROJECTS: &str = r#"[
  {
    "title": "Example Project",
    "description": "Replace this entry with your own work.",
    "image": "assets/img/example.png",
    "tags": ["example", "🏆 Sample Award", "docs"],
    "repoUrl": "https://github.com/{account}/example",
    "liveUrl": "https://example.com",
    "featured": true
  }
]
"#;

/// Infer a site name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape a value for a TOML basic string
fn toml_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn render_folio_toml(name: &str, account: &str) -> String {
    FOLIO_TOML_TEMPLATE
        .replace("{name}", &toml_escape(name))
        .replace("{projects}", &default_projects_path())
        .replace("{account}", &toml_escape(account))
}

fn render_sample_projects(account: &str) -> String {
    let owner = if account.is_empty() { "you" } else { account };
    SAMPLE_PROJECTS.replace("{account}", owner)
}

pub fn cmd_init(args: InitArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = dir.join(CONFIG_FILE);
    let projects_path = dir.join(default_projects_path());

    if !args.force {
        if config_path.exists() {
            return Err(format!("{} already exists (use --force to overwrite)", CONFIG_FILE).into());
        }
        if projects_path.exists() {
            return Err(format!(
                "{} already exists (use --force to overwrite)",
                default_projects_path()
            )
            .into());
        }
    }

    // Note an enclosing site, which this one will shadow
    if let Some(parent) = dir.parent()
        && let Ok(parent_root) = project_io::discover_site(parent)
    {
        eprintln!("Note: enclosing site found at {}/", parent_root.display());
    }

    let name = args.name.unwrap_or_else(|| {
        dir.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Portfolio".to_string())
    });
    let account = args.account.unwrap_or_default();

    if let Some(parent) = projects_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, render_folio_toml(&name, &account))?;
    fs::write(&projects_path, render_sample_projects(&account))?;
    tracing::info!(root = %dir.display(), "initialized site");

    println!("Initialized folio site: {}", name);
    if account.is_empty() {
        println!("  stats: off (set one with: folio config stats.account_name <user>)");
    } else {
        println!("  stats: github.com/{}", account);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::project_io::parse_projects;
    use crate::model::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("my-portfolio"), "My Portfolio");
        assert_eq!(infer_name("site"), "Site");
    }

    #[test]
    fn rendered_toml_parses() {
        let text = render_folio_toml("Jo \"JJ\" Smith", "jo");
        let config: SiteConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.site.name, "Jo \"JJ\" Smith");
        assert_eq!(config.site.projects, "assets/projects.json");
        assert_eq!(config.stats.account_name, "jo");
        assert!(config.stats.lookups_enabled());
    }

    #[test]
    fn sample_projects_parse() {
        let projects = parse_projects(&render_sample_projects("jo")).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(
            projects[0].repo_url.as_deref(),
            Some("https://github.com/jo/example")
        );
        assert!(projects[0].featured);
    }

    #[test]
    fn init_writes_files_and_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        let args = || InitArgs {
            name: Some("Test".into()),
            account: None,
            force: false,
        };
        cmd_init(args(), tmp.path()).unwrap();
        assert!(tmp.path().join(CONFIG_FILE).is_file());
        assert!(tmp.path().join("assets/projects.json").is_file());

        assert!(cmd_init(args(), tmp.path()).is_err());

        let forced = InitArgs {
            force: true,
            ..args()
        };
        cmd_init(forced, tmp.path()).unwrap();
    }
}
