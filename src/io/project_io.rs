use std::fs;
use std::path::{Path, PathBuf};

use crate::io::config_io;
use crate::model::config::default_projects_path;
use crate::model::project::ProjectRecord;
use crate::model::site::Site;

/// Name of the site config file at the site root
pub const CONFIG_FILE: &str = "folio.toml";

/// Error type for site I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("not a folio site: no folio.toml or assets/projects.json found")]
    NotASite,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ProjectsParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse folio.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit folio.toml: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("unknown config key '{0}'")]
    UnknownConfigKey(String),
    #[error("invalid value '{value}' for {key}")]
    InvalidConfigValue { key: String, value: String },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the site by walking up from the given directory, looking for
/// folio.toml or the default projects document.
pub fn discover_site(start: &Path) -> Result<PathBuf, ProjectError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() || current.join(default_projects_path()).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ProjectError::NotASite);
        }
    }
}

/// Open the site rooted at `root`, reading folio.toml if present.
pub fn open_site(root: &Path) -> Result<Site, ProjectError> {
    let (config, _doc) = config_io::read_config(root)?;
    Ok(Site {
        root: root.to_path_buf(),
        config,
    })
}

/// Parse a projects document. The top level must be an array of objects.
pub fn parse_projects(text: &str) -> Result<Vec<ProjectRecord>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Read the site's projects document. Read once per session.
pub fn load_projects(site: &Site) -> Result<Vec<ProjectRecord>, ProjectError> {
    let path = site.projects_path();
    let text = fs::read_to_string(&path).map_err(|e| ProjectError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let projects = parse_projects(&text).map_err(|e| ProjectError::ProjectsParseError {
        path: path.clone(),
        source: e,
    })?;
    tracing::info!(count = projects.len(), path = %path.display(), "loaded projects");
    Ok(projects)
}
