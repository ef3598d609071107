//! Application state definitions
//!
//! Contains the state types for the terminal front end: the current mode,
//! the feature checklist and the combination browser cursor.

use std::collections::BTreeSet;

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Feature checklist with live metrics and plot locators
    FeatureSelect,
    /// Scrollable list of every combination table position
    CombinationBrowser,
}

/// Main application state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Checklist row under the cursor
    pub feature_cursor: usize,
    /// Ticked feature indices
    pub selected: BTreeSet<usize>,
    /// Highlighted position in the combination browser
    pub browser_selection: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

impl AppState {
    /// Initial state: every feature of a `universe_size` universe ticked.
    pub fn new(universe_size: usize) -> Self {
        Self {
            mode: AppMode::FeatureSelect,
            feature_cursor: 0,
            selected: (0..universe_size).collect(),
            browser_selection: 0,
            help_visible: false,
        }
    }

    /// Tick or untick a feature
    pub fn toggle(&mut self, index: usize) {
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected indices in ascending order
    pub fn selection(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }
}
