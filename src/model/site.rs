use std::path::PathBuf;

use super::config::SiteConfig;

/// A located portfolio site
#[derive(Debug, Clone)]
pub struct Site {
    /// Directory holding folio.toml and the assets
    pub root: PathBuf,
    /// Parsed folio.toml (defaults if absent)
    pub config: SiteConfig,
}

impl Site {
    /// Absolute path of the projects document
    pub fn projects_path(&self) -> PathBuf {
        self.root.join(&self.config.site.projects)
    }
}
