use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Datelike;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use indexmap::IndexMap;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use regex::Regex;

use crate::io::logging;
use crate::io::project_io::{ProjectError, discover_site, load_projects, open_site};
use crate::io::state::PrefsStore;
use crate::io::stats_client::{GithubClient, StatsFeed};
use crate::model::{ProjectRecord, Site};
use crate::ops::cards::{CardView, card_view};
use crate::ops::chips::{ChipBar, chip_bar};
use crate::ops::detail::detail_view;
use crate::ops::filter::{FilterState, filter_indices, normalize_query, tag_counts};
use crate::ops::stats::{RepoStats, StatsRequest, StatsUpdate, stats_requests};

use super::debounce::{Debouncer, SEARCH_DEBOUNCE};
use super::input;
use super::modal::Modal;
use super::render;
use super::theme::Theme;
use super::timeline::TimelineState;

/// Event loop poll interval when nothing is pending
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Poll interval while timeline entries are fading in
const ANIMATION_POLL: Duration = Duration::from_millis(30);

/// Which page is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Filterable project grid
    Grid,
    /// Secondary timeline page
    Timeline,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search box
    Search,
}

/// Focusable element on the grid page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    /// Position in the chip row (the overflow toggle comes last)
    Chip(usize),
    /// Card for the project at this index
    Card(usize),
}

/// Direction for arrow-key focus movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

/// Main application state
pub struct App {
    pub site: Site,
    pub projects: Vec<ProjectRecord>,
    /// Message shown in place of the grid when loading failed
    pub load_error: Option<String>,
    /// Tag counts over all projects, in chip order
    pub counts: IndexMap<String, usize>,
    pub filter: FilterState,
    /// Indices of the projects currently in the grid. Always equals
    /// `filter_indices(projects, filter)`.
    pub visible: Vec<usize>,
    pub view: View,
    pub mode: Mode,
    pub focus: Focus,
    pub should_quit: bool,
    pub theme: Theme,
    pub prefs: PrefsStore,
    /// Raw text of the search box
    pub search_input: String,
    pub search_debounce: Debouncer<String>,
    pub chips_expanded: bool,
    /// Cards whose tag row is expanded. Reset whenever the grid is rebuilt.
    pub expanded_tags: HashSet<usize>,
    /// Fetched repository stats, by project index
    pub stats: HashMap<usize, RepoStats>,
    pub modal: Modal,
    pub show_help: bool,
    /// First visible grid row
    pub grid_scroll: usize,
    /// Cards per grid row, as last laid out
    pub grid_columns: usize,
    pub timeline: TimelineState,
    /// Dialog rectangle of the open modal, for backdrop clicks
    pub modal_area: Option<Rect>,
    /// Where the modal's Close control was drawn
    pub modal_close_area: Option<Rect>,
    /// Time the current frame is drawn for
    pub frame_time: Instant,
    pub year: i32,
}

impl App {
    pub fn new(
        site: Site,
        loaded: Result<Vec<ProjectRecord>, ProjectError>,
        prefs: PrefsStore,
    ) -> Self {
        let (projects, load_error) = match loaded {
            Ok(projects) => (projects, None),
            Err(e) => {
                tracing::error!(error = %e, "failed to load projects");
                let message = format!(
                    "Failed to load projects. Please check {}.",
                    site.config.site.projects
                );
                (Vec::new(), Some(message))
            }
        };

        let theme = Theme::from_config(prefs.theme(), &site.config.ui);
        let timeline = TimelineState::new(prefs.timeline_layout());
        let counts = tag_counts(&projects);

        let mut app = App {
            site,
            projects,
            load_error,
            counts,
            filter: FilterState::default(),
            visible: Vec::new(),
            view: View::Grid,
            mode: Mode::Navigate,
            focus: Focus::Search,
            should_quit: false,
            theme,
            prefs,
            search_input: String::new(),
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE),
            chips_expanded: false,
            expanded_tags: HashSet::new(),
            stats: HashMap::new(),
            modal: Modal::default(),
            show_help: false,
            grid_scroll: 0,
            grid_columns: 1,
            timeline,
            modal_area: None,
            modal_close_area: None,
            frame_time: Instant::now(),
            year: chrono::Local::now().year(),
        };
        app.refresh_grid();
        app
    }

    /// Recompute the grid from the current filter.
    pub fn refresh_grid(&mut self) {
        self.visible = filter_indices(
            &self.projects,
            &self.filter.selected_tag,
            &self.filter.query,
        );
        self.expanded_tags.clear();
        self.grid_scroll = 0;
        if let Focus::Card(idx) = self.focus
            && !self.visible.contains(&idx)
        {
            self.focus = Focus::Search;
        }
    }

    pub fn select_tag(&mut self, tag: &str) {
        self.filter.selected_tag = tag.to_string();
        self.refresh_grid();
    }

    /// Normalise `raw` into the active query and re-filter.
    pub fn apply_query(&mut self, raw: &str) {
        self.filter.query = normalize_query(raw);
        self.refresh_grid();
    }

    /// The search box changed; schedule a re-filter after the quiet period.
    pub fn on_search_input(&mut self, now: Instant) {
        self.search_debounce.schedule(now, self.search_input.clone());
    }

    /// Apply a pending search right away (leaving the search box).
    pub fn flush_search(&mut self) {
        if self.search_debounce.is_pending() {
            self.search_debounce.cancel();
            let raw = self.search_input.clone();
            self.apply_query(&raw);
        }
    }

    /// Advance timers to `now`.
    pub fn tick(&mut self, now: Instant) {
        self.frame_time = now;
        if let Some(raw) = self.search_debounce.poll(now) {
            tracing::debug!(query = %raw, "applying search");
            self.apply_query(&raw);
        }
    }

    /// How long the event loop may block before something is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let mut timeout = IDLE_POLL;
        if let Some(due) = self.search_debounce.time_until_due(now) {
            timeout = timeout.min(due);
        }
        if self.view == View::Timeline && self.timeline.reveal.is_animating(now) {
            timeout = timeout.min(ANIMATION_POLL);
        }
        timeout
    }

    /// Regex highlighting the active query in titles and descriptions
    pub fn active_search_re(&self) -> Option<Regex> {
        if self.filter.query.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(&self.filter.query))).ok()
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.theme.mode.toggled();
        self.theme = Theme::from_config(mode, &self.site.config.ui);
        if let Err(e) = self.prefs.set_theme(mode) {
            tracing::warn!(error = %e, "could not persist theme");
        }
    }

    pub fn toggle_timeline_layout(&mut self) {
        let layout = self.timeline.layout.toggled();
        self.timeline.layout = layout;
        if let Err(e) = self.prefs.set_timeline_layout(layout) {
            tracing::warn!(error = %e, "could not persist timeline layout");
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Grid => View::Timeline,
            View::Timeline => View::Grid,
        };
    }

    /// Expand or collapse the tag row of card `idx`.
    pub fn toggle_card_tags(&mut self, idx: usize) {
        if !self.expanded_tags.remove(&idx) {
            self.expanded_tags.insert(idx);
        }
    }

    pub fn toggle_chip_overflow(&mut self) {
        self.chips_expanded = !self.chips_expanded;
        if let Focus::Chip(pos) = self.focus {
            let len = self.chip_bar().len();
            self.focus = Focus::Chip(pos.min(len.saturating_sub(1)));
        }
    }

    /// Activate the chip at `pos`: select its tag, or flip the overflow.
    pub fn activate_chip(&mut self, pos: usize) {
        let bar = self.chip_bar();
        if let Some(chip) = bar.chips.get(pos) {
            let tag = chip.tag.clone();
            self.select_tag(&tag);
        } else if bar.toggle.is_some() {
            self.toggle_chip_overflow();
        }
    }

    pub fn chip_bar(&self) -> ChipBar {
        chip_bar(
            &self.counts,
            &self.filter.selected_tag,
            self.chips_expanded,
        )
    }

    /// Views for the cards currently in the grid
    pub fn card_views(&self) -> Vec<CardView> {
        self.visible
            .iter()
            .map(|&idx| {
                card_view(
                    idx,
                    &self.projects[idx],
                    self.expanded_tags.contains(&idx),
                    self.stats.get(&idx),
                )
            })
            .collect()
    }

    /// Project the current selection refers to, on either page
    pub fn selected_project(&self) -> Option<usize> {
        match self.view {
            View::Grid => match self.focus {
                Focus::Card(idx) => Some(idx),
                _ => None,
            },
            View::Timeline => {
                (self.timeline.cursor < self.projects.len()).then_some(self.timeline.cursor)
            }
        }
    }

    /// Open the details modal for project `idx`.
    pub fn open_details(&mut self, idx: usize) {
        let Some(project) = self.projects.get(idx) else {
            return;
        };
        self.modal.open(detail_view(idx, project), self.focus);
    }

    /// Close the modal and put focus back where it was.
    pub fn close_modal(&mut self) {
        self.modal_area = None;
        self.modal_close_area = None;
        if let Some(focus) = self.modal.close() {
            self.focus = match focus {
                Focus::Card(idx) if !self.visible.contains(&idx) => Focus::Search,
                other => other,
            };
        }
    }

    /// Record the outcome of one stats lookup.
    pub fn apply_stats_update(&mut self, update: StatsUpdate) {
        match update.result {
            Ok(stats) => {
                self.stats.insert(update.project_index, stats);
            }
            Err(e) => {
                tracing::debug!(
                    project = update.project_index,
                    error = %e,
                    "stats lookup failed"
                );
            }
        }
    }

    /// Lookups still needed for this session
    pub fn stats_requests(&self) -> Vec<StatsRequest> {
        stats_requests(&self.projects, &self.site.config.stats)
            .into_iter()
            .filter(|r| !self.stats.contains_key(&r.project_index))
            .collect()
    }

    /// Focus targets in Tab order
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Search];
        order.extend((0..self.chip_bar().len()).map(Focus::Chip));
        order.extend(self.visible.iter().map(|&idx| Focus::Card(idx)));
        order
    }

    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.cycle_focus(-1);
    }

    fn cycle_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = order[(pos + delta).rem_euclid(len) as usize];
    }

    /// Arrow-key movement between the search box, chips, and cards.
    pub fn move_focus(&mut self, dir: Dir) {
        let chips = self.chip_bar().len();
        let first_card = self.visible.first().map(|&idx| Focus::Card(idx));
        self.focus = match (self.focus, dir) {
            (Focus::Search, Dir::Down) => {
                if chips > 0 {
                    Focus::Chip(0)
                } else {
                    first_card.unwrap_or(Focus::Search)
                }
            }
            (Focus::Search, _) => Focus::Search,
            (Focus::Chip(pos), Dir::Left) => Focus::Chip(pos.saturating_sub(1)),
            (Focus::Chip(pos), Dir::Right) => Focus::Chip((pos + 1).min(chips.saturating_sub(1))),
            (Focus::Chip(_), Dir::Up) => Focus::Search,
            (Focus::Chip(pos), Dir::Down) => first_card.unwrap_or(Focus::Chip(pos)),
            (Focus::Card(idx), dir) => self.move_card_focus(idx, dir, chips),
        };
    }

    fn move_card_focus(&self, idx: usize, dir: Dir, chips: usize) -> Focus {
        let Some(pos) = self.visible.iter().position(|&i| i == idx) else {
            return Focus::Search;
        };
        let cols = self.grid_columns.max(1);
        let last = self.visible.len() - 1;
        let next = match dir {
            Dir::Left => pos.saturating_sub(1),
            Dir::Right => (pos + 1).min(last),
            Dir::Down => (pos + cols).min(last),
            Dir::Up if pos < cols => {
                return if chips > 0 {
                    Focus::Chip(0)
                } else {
                    Focus::Search
                };
            }
            Dir::Up => pos - cols,
        };
        Focus::Card(self.visible[next])
    }

    /// Enter on the focused element
    pub fn activate_focus(&mut self) {
        match self.focus {
            Focus::Search => self.mode = Mode::Search,
            Focus::Chip(pos) => self.activate_chip(pos),
            Focus::Card(idx) => self.open_details(idx),
        }
    }
}

/// Run the TUI application
pub fn run(site_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match site_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let root = discover_site(&start)?;
    let site = open_site(&root)?;
    logging::init_file(&site.root);

    let loaded = load_projects(&site);
    let prefs = PrefsStore::open(&site.root);
    let mut app = App::new(site, loaded, prefs);
    let feed = start_stats_feed(&app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &feed);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_stats_feed(app: &App) -> StatsFeed {
    let requests = app.stats_requests();
    if requests.is_empty() {
        return StatsFeed::idle();
    }
    match GithubClient::new(&app.site.config.stats) {
        Ok(client) => {
            tracing::info!(count = requests.len(), "fetching repository stats");
            StatsFeed::start(Arc::new(client), requests)
        }
        Err(e) => {
            tracing::warn!(error = %e, "stats client unavailable");
            StatsFeed::idle()
        }
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    feed: &StatsFeed,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        for update in feed.poll() {
            app.apply_stats_update(update);
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key, Instant::now());
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
