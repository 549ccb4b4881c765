use std::collections::HashMap;
use std::ops::Range;
use std::time::{Duration, Instant};

use crate::model::TimelineLayout;

/// How long a newly revealed entry takes to fade in
pub const REVEAL_DURATION: Duration = Duration::from_millis(300);

/// Tracks which timeline entries have scrolled into view.
///
/// An entry is revealed the first time it is inside the viewport and stays
/// revealed for the rest of the session.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: HashMap<usize, Instant>,
}

impl RevealTracker {
    /// Mark every entry in `visible` as revealed (first sighting wins).
    pub fn observe(&mut self, visible: Range<usize>, now: Instant) {
        for idx in visible {
            self.revealed.entry(idx).or_insert(now);
        }
    }

    pub fn is_revealed(&self, idx: usize) -> bool {
        self.revealed.contains_key(&idx)
    }

    /// Fade-in progress from 0.0 (hidden) to 1.0 (fully shown).
    pub fn progress(&self, idx: usize, now: Instant) -> f32 {
        match self.revealed.get(&idx) {
            None => 0.0,
            Some(at) => {
                let elapsed = now.saturating_duration_since(*at);
                (elapsed.as_secs_f32() / REVEAL_DURATION.as_secs_f32()).min(1.0)
            }
        }
    }

    /// Whether any entry is still fading in.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.revealed
            .values()
            .any(|at| now.saturating_duration_since(*at) < REVEAL_DURATION)
    }
}

/// State of the timeline page
#[derive(Debug, Clone, Default)]
pub struct TimelineState {
    pub layout: TimelineLayout,
    /// Selected entry (project index)
    pub cursor: usize,
    /// First visible entry
    pub scroll: usize,
    pub reveal: RevealTracker,
}

impl TimelineState {
    pub fn new(layout: TimelineLayout) -> Self {
        TimelineState {
            layout,
            ..Default::default()
        }
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    /// Adjust scroll so the cursor is within `per_page` entries.
    pub fn scroll_to_cursor(&mut self, per_page: usize) {
        let per_page = per_page.max(1);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + per_page {
            self.scroll = self.cursor + 1 - per_page;
        }
    }
}
