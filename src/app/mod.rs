//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode)
//! - Main module - App struct and event loop
//!
//! Every key press that changes the selection re-runs the catalog's display
//! boundary; the result is kept next to the state and redrawn.

mod state;

pub use state::{AppMode, AppState};

use crate::catalog::{DisplayResult, ModelCatalog};
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::{FeatureTuiError, Result};
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, info};

/// Rows moved by PageUp/PageDown in the combination browser
pub const BROWSER_PAGE: usize = 20;

/// Main application struct
pub struct App {
    catalog: ModelCatalog,
    state: AppState,
    result: DisplayResult,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application instance with every feature selected
    pub fn new(catalog: ModelCatalog) -> Self {
        info!("Creating new App instance");
        let state = AppState::new(catalog.universe().len());
        let result = catalog.present_indices(&state.selection());
        Self {
            catalog,
            state,
            result,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Result for the current selection
    pub fn result(&self) -> &DisplayResult {
        &self.result
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Get reference to keybinding context
    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal
                .draw(|f| {
                    self.ui_renderer.render(
                        f,
                        &self.state,
                        &self.result,
                        &self.catalog,
                        &self.keybinding_context,
                    )
                })
                .map_err(|e| FeatureTuiError::terminal(format!("Failed to draw frame: {}", e)))?;

            if crossterm::event::poll(Duration::from_millis(250))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if self.handle_key_event(key_event) {
                        info!("Exit requested");
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle a key press. Returns `true` when the application should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        // Windows reports both press and release
        if key_event.kind == KeyEventKind::Release {
            return false;
        }

        let action = self
            .keybinding_context
            .action_for(&self.state.mode, &key_event);

        // Help overlay swallows everything except its own dismissal
        if self.state.help_visible {
            if action == Some(KeyAction::Help) || key_event.code == crossterm::event::KeyCode::Esc
            {
                self.toggle_help();
            }
            return false;
        }

        let Some(action) = action else {
            return false;
        };
        debug!("Key action {:?} in {:?}", action, self.state.mode);

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.toggle_help(),
            _ => match self.state.mode {
                AppMode::FeatureSelect => self.handle_feature_action(action),
                AppMode::CombinationBrowser => self.handle_browser_action(action),
            },
        }
        false
    }

    fn handle_feature_action(&mut self, action: KeyAction) {
        let count = self.catalog.universe().len();
        match action {
            KeyAction::NavigateUp => {
                self.state.feature_cursor = self.state.feature_cursor.saturating_sub(1);
            }
            KeyAction::NavigateDown => {
                if self.state.feature_cursor + 1 < count {
                    self.state.feature_cursor += 1;
                }
            }
            KeyAction::Toggle => {
                self.state.toggle(self.state.feature_cursor);
                self.refresh();
            }
            KeyAction::SelectAll => {
                self.state.selected = (0..count).collect();
                self.refresh();
            }
            KeyAction::ClearAll => {
                self.state.selected.clear();
                self.refresh();
            }
            KeyAction::SwitchView => {
                self.state.browser_selection = self.result.position;
                self.state.mode = AppMode::CombinationBrowser;
            }
            _ => {}
        }
    }

    fn handle_browser_action(&mut self, action: KeyAction) {
        let last = self.catalog.table().len().saturating_sub(1);
        let sel = self.state.browser_selection;
        match action {
            KeyAction::NavigateUp => self.state.browser_selection = sel.saturating_sub(1),
            KeyAction::NavigateDown => self.state.browser_selection = (sel + 1).min(last),
            KeyAction::PageUp => self.state.browser_selection = sel.saturating_sub(BROWSER_PAGE),
            KeyAction::PageDown => self.state.browser_selection = (sel + BROWSER_PAGE).min(last),
            KeyAction::Home => self.state.browser_selection = 0,
            KeyAction::End => self.state.browser_selection = last,
            KeyAction::Apply => {
                if let Some(comb) = self.catalog.table().get(sel) {
                    self.state.selected = comb.iter().collect();
                    self.refresh();
                }
                self.state.mode = AppMode::FeatureSelect;
            }
            KeyAction::SwitchView | KeyAction::Back => self.state.mode = AppMode::FeatureSelect,
            _ => {}
        }
    }

    /// Re-resolve the current selection
    fn refresh(&mut self) {
        self.result = self.catalog.present_indices(&self.state.selection());
        debug!(
            "Selection {:?} -> position {} ({})",
            self.state.selected, self.result.position, self.result.status
        );
    }
}
