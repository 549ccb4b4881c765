use std::fs;
use std::path::Path;

use crate::io::project_io::{CONFIG_FILE, ProjectError};
use crate::model::config::SiteConfig;

/// Keys `folio config` can read and write
pub const CONFIG_KEYS: &[&str] = &[
    "site.name",
    "site.projects",
    "stats.account_name",
    "stats.enable_repo_stats",
    "stats.api_base",
    "stats.timeout_secs",
];

/// Read the site config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing. A missing file yields
/// the defaults and an empty document.
pub fn read_config(root: &Path) -> Result<(SiteConfig, toml_edit::DocumentMut), ProjectError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok((SiteConfig::default(), toml_edit::DocumentMut::new()));
    }
    let config_text = fs::read_to_string(&config_path).map_err(|e| ProjectError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: SiteConfig = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text.parse()?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(root: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ProjectError> {
    let config_path = root.join(CONFIG_FILE);
    fs::write(&config_path, doc.to_string()).map_err(|e| ProjectError::WriteError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

/// Current value of a config key, as displayed by `folio config KEY`.
pub fn config_value(config: &SiteConfig, key: &str) -> Result<String, ProjectError> {
    let value = match key {
        "site.name" => config.site.name.clone(),
        "site.projects" => config.site.projects.clone(),
        "stats.account_name" => config.stats.account_name.clone(),
        "stats.enable_repo_stats" => config.stats.enable_repo_stats.to_string(),
        "stats.api_base" => config.stats.api_base.clone(),
        "stats.timeout_secs" => config.stats.timeout_secs.to_string(),
        _ => return Err(ProjectError::UnknownConfigKey(key.to_string())),
    };
    Ok(value)
}

/// Set `key` in the config document, typing the value for the key.
pub fn set_config_value(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<(), ProjectError> {
    let (table, field) = key
        .split_once('.')
        .filter(|_| CONFIG_KEYS.contains(&key))
        .ok_or_else(|| ProjectError::UnknownConfigKey(key.to_string()))?;

    let invalid = || ProjectError::InvalidConfigValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    let item = match key {
        "stats.enable_repo_stats" => {
            toml_edit::value(value.parse::<bool>().map_err(|_| invalid())?)
        }
        "stats.timeout_secs" => {
            let secs = value.parse::<u64>().map_err(|_| invalid())?;
            toml_edit::value(i64::try_from(secs).map_err(|_| invalid())?)
        }
        _ => toml_edit::value(value),
    };

    if !doc.contains_key(table) {
        doc[table] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[table][field] = item;
    Ok(())
}
