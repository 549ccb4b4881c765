use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::state::PrefsStore;
use crate::model::{ProjectRecord, Site, SiteConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A site with default config that is never written to.
pub fn test_site() -> Site {
    Site {
        root: PathBuf::from("/tmp/test-folio"),
        config: SiteConfig::default(),
    }
}

pub fn project(title: &str, description: &str, tags: &[&str]) -> ProjectRecord {
    ProjectRecord {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

/// Three projects:
/// - Alpha: tag X, GitHub repo owned by `me`
/// - Beta: tag Y, live demo only
/// - Gamma: tags X, Z, and an award tag; featured
pub fn sample_projects() -> Vec<ProjectRecord> {
    let mut alpha = project("Alpha", "A terminal tool", &["X"]);
    alpha.repo_url = Some("https://github.com/me/alpha".into());

    let mut beta = project("Beta", "Web front end", &["Y"]);
    beta.live_url = Some("https://beta.example.com".into());

    let mut gamma = project(
        "Gamma",
        "Compiler for a tiny language",
        &["X", "Z", "\u{1F3C6} Winner"],
    );
    gamma.featured = true;

    vec![alpha, beta, gamma]
}

/// An App over `projects` with in-memory preferences.
pub fn app_with_projects(projects: Vec<ProjectRecord>) -> App {
    App::new(test_site(), Ok(projects), PrefsStore::in_memory())
}
