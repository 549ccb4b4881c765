use indexmap::IndexMap;

/// Chips shown before the overflow toggle
pub const VISIBLE_CHIP_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    pub tag: String,
    pub count: usize,
    pub pressed: bool,
}

/// Overflow control at the end of the chip row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipToggle {
    /// Collapsed, hiding this many chips
    More(usize),
    Less,
}

impl ChipToggle {
    pub fn label(self) -> String {
        match self {
            ChipToggle::More(n) => format!("+{} more", n),
            ChipToggle::Less => "Show less".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipBar {
    pub chips: Vec<ChipView>,
    pub toggle: Option<ChipToggle>,
}

impl ChipBar {
    /// Number of focusable items (chips plus the toggle)
    pub fn len(&self) -> usize {
        self.chips.len() + usize::from(self.toggle.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lay out the chip row for `counts` (already in display order).
///
/// When collapsed, a selected tag past the visible limit takes the last
/// visible slot so the pressed chip is always on screen.
pub fn chip_bar(counts: &IndexMap<String, usize>, selected: &str, expanded: bool) -> ChipBar {
    let total = counts.len();
    let chip = |(tag, count): (&String, &usize)| ChipView {
        tag: tag.clone(),
        count: *count,
        pressed: tag == selected,
    };

    let mut chips: Vec<ChipView> = if expanded {
        counts.iter().map(chip).collect()
    } else {
        counts.iter().take(VISIBLE_CHIP_LIMIT).map(chip).collect()
    };
    if !expanded
        && let Some(pos) = counts.get_index_of(selected)
        && pos >= VISIBLE_CHIP_LIMIT
        && let Some(last) = chips.last_mut()
        && let Some(entry) = counts.get_index(pos)
    {
        *last = chip(entry);
    }

    let toggle = if total <= VISIBLE_CHIP_LIMIT {
        None
    } else if expanded {
        Some(ChipToggle::Less)
    } else {
        Some(ChipToggle::More(total - VISIBLE_CHIP_LIMIT))
    };

    ChipBar { chips, toggle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::ProjectRecord;
    use crate::ops::filter::tag_counts;

    fn counts_for(tags: &[&str]) -> IndexMap<String, usize> {
        let projects: Vec<ProjectRecord> = tags
            .iter()
            .map(|t| ProjectRecord {
                tags: vec![t.to_string()],
                ..Default::default()
            })
            .collect();
        tag_counts(&projects)
    }

    #[test]
    fn one_chip_per_tag_with_counts() {
        let bar = chip_bar(&counts_for(&["X", "Y", "X"]), "All", false);
        let summary: Vec<(&str, usize, bool)> = bar
            .chips
            .iter()
            .map(|c| (c.tag.as_str(), c.count, c.pressed))
            .collect();
        assert_eq!(summary, vec![("All", 3, true), ("X", 2, false), ("Y", 1, false)]);
        assert_eq!(bar.toggle, None);
        assert_eq!(bar.len(), 3);
    }

    #[test]
    fn exactly_one_chip_pressed() {
        let bar = chip_bar(&counts_for(&["X", "Y"]), "Y", false);
        let pressed: Vec<&str> = bar
            .chips
            .iter()
            .filter(|c| c.pressed)
            .map(|c| c.tag.as_str())
            .collect();
        assert_eq!(pressed, vec!["Y"]);
    }

    #[test]
    fn overflow_collapses_to_six_plus_toggle() {
        let counts = counts_for(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        assert_eq!(counts.len(), 9);

        let bar = chip_bar(&counts, "All", false);
        assert_eq!(bar.chips.len(), 6);
        assert_eq!(bar.chips[0].tag, "All");
        assert_eq!(bar.chips[5].tag, "e");
        assert_eq!(bar.toggle, Some(ChipToggle::More(3)));
        assert_eq!(bar.toggle.unwrap().label(), "+3 more");
        assert_eq!(bar.len(), 7);

        let open = chip_bar(&counts, "All", true);
        assert_eq!(open.chips.len(), 9);
        assert_eq!(open.toggle.unwrap().label(), "Show less");
    }

    #[test]
    fn exactly_six_chips_has_no_toggle() {
        let bar = chip_bar(&counts_for(&["a", "b", "c", "d", "e"]), "All", false);
        assert_eq!(bar.chips.len(), 6);
        assert_eq!(bar.toggle, None);
    }

    #[test]
    fn collapsed_row_keeps_selection_past_limit_visible() {
        let counts = counts_for(&["a", "b", "c", "d", "e", "f", "g"]);
        let bar = chip_bar(&counts, "g", false);
        let pressed: Vec<&str> = bar
            .chips
            .iter()
            .filter(|c| c.pressed)
            .map(|c| c.tag.as_str())
            .collect();
        assert_eq!(pressed, vec!["g"]);
        assert_eq!(bar.chips.len(), 6);
        assert_eq!(bar.chips[5].tag, "g");
        assert_eq!(bar.toggle, Some(ChipToggle::More(2)));

        let open = chip_bar(&counts, "g", true);
        assert_eq!(open.chips.iter().filter(|c| c.pressed).count(), 1);
        assert_eq!(open.chips[5].tag, "e");
    }
}
