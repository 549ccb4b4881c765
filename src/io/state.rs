use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::prefs::{ThemeMode, TimelineLayout};

/// File holding persisted preferences, at the site root
pub const STATE_FILE: &str = ".folio-state.json";

/// Persisted preferences (written to .folio-state.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
    #[serde(
        default,
        rename = "timelineView",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeline_view: Option<TimelineLayout>,
}

/// Read the state file from the site root
pub fn read_ui_state(root: &Path) -> Option<UiState> {
    let path = root.join(STATE_FILE);
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write the state file to the site root
pub fn write_ui_state(root: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = root.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(&path, content.as_bytes())
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Local key-value preference store.
///
/// Reads once on open and writes through on every change. A store without a
/// root keeps preferences in memory only.
#[derive(Debug, Clone, Default)]
pub struct PrefsStore {
    root: Option<PathBuf>,
    state: UiState,
}

impl PrefsStore {
    pub fn open(root: &Path) -> Self {
        PrefsStore {
            root: Some(root.to_path_buf()),
            state: read_ui_state(root).unwrap_or_default(),
        }
    }

    pub fn in_memory() -> Self {
        PrefsStore::default()
    }

    /// Stored theme, or dark when nothing is stored
    pub fn theme(&self) -> ThemeMode {
        self.state.theme.unwrap_or_default()
    }

    pub fn timeline_layout(&self) -> TimelineLayout {
        self.state.timeline_view.unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> std::io::Result<()> {
        self.state.theme = Some(theme);
        self.flush()
    }

    pub fn set_timeline_layout(&mut self, layout: TimelineLayout) -> std::io::Result<()> {
        self.state.timeline_view = Some(layout);
        self.flush()
    }

    fn flush(&self) -> std::io::Result<()> {
        match &self.root {
            Some(root) => write_ui_state(root, &self.state),
            None => Ok(()),
        }
    }
}
