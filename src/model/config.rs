use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteInfo,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Path of the projects document, relative to the site root
    #[serde(default = "default_projects_path")]
    pub projects: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        SiteInfo {
            name: default_site_name(),
            projects: default_projects_path(),
        }
    }
}

/// Repository star/fork lookup.
///
/// Lookups only happen when `enable_repo_stats` is set and `account_name`
/// is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub account_name: String,
    #[serde(default = "default_true")]
    pub enable_repo_stats: bool,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            account_name: String::new(),
            enable_repo_stats: true,
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StatsConfig {
    pub fn lookups_enabled(&self) -> bool {
        self.enable_repo_stats && !self.account_name.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
            tag_colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_site_name() -> String {
    "Portfolio".to_string()
}

pub fn default_projects_path() -> String {
    "assets/projects.json".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.site.name, "Portfolio");
        assert_eq!(config.site.projects, "assets/projects.json");
        assert_eq!(config.stats.account_name, "");
        assert!(config.stats.enable_repo_stats);
        assert_eq!(config.stats.api_base, "https://api.github.com");
        assert_eq!(config.stats.timeout_secs, 10);
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn lookups_need_flag_and_account() {
        let mut stats = StatsConfig::default();
        assert!(!stats.lookups_enabled());
        stats.account_name = "octo".into();
        assert!(stats.lookups_enabled());
        stats.enable_repo_stats = false;
        assert!(!stats.lookups_enabled());
    }

    #[test]
    fn partial_tables_fill_defaults() {
        let config: SiteConfig = toml::from_str(
            r##"
[stats]
account_name = "octo"

[ui.tag_colors]
rust = "#FF8844"
"##,
        )
        .unwrap();
        assert_eq!(config.stats.account_name, "octo");
        assert!(config.stats.enable_repo_stats);
        assert_eq!(config.ui.tag_colors.get("rust").unwrap(), "#FF8844");
        assert_eq!(config.site.name, "Portfolio");
    }
}
