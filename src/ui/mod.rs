//! User interface rendering module
//!
//! - `header` - Title, introduction, navigation bar and help overlay
//! - `panels` - Feature checklist, result panels and the combination browser

mod header;
mod panels;

pub use header::{intro_text, TITLE};
pub use panels::{browser_line, checklist_line};

use crate::app::{AppMode, AppState};
use crate::catalog::{DisplayResult, ModelCatalog};
use crate::components::keybindings::KeybindingContext;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI for the current state and selection result
    pub fn render(
        &self,
        f: &mut Frame,
        state: &AppState,
        result: &DisplayResult,
        catalog: &ModelCatalog,
        keybinding_ctx: &KeybindingContext,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Introduction
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        header::render_title(f, chunks[0], TITLE);
        header::render_intro(f, chunks[1], catalog.table().len());

        match state.mode {
            AppMode::FeatureSelect => {
                panels::render_feature_select(f, state, result, catalog, chunks[2]);
            }
            AppMode::CombinationBrowser => {
                panels::render_combination_browser(f, state, catalog, chunks[2]);
            }
        }

        header::render_nav_bar(f, state, keybinding_ctx, chunks[3]);

        // Render help overlay if visible (on top of everything)
        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
