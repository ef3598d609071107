//! Centralized theme and styling for the TUI
//!
//! Single source of truth for the colors and styles used by the checklist,
//! the metrics and plot panels, and the combination browser.

use crate::catalog::SelectionStatus;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Primary dark background - used for most panels
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for the cursor row
    pub const SECONDARY: Color = Color::Yellow;

    pub const SUCCESS: Color = Color::Green;

    pub const WARNING: Color = Color::Yellow;

    pub const ERROR: Color = Color::Red;

    /// Autoregressive power features
    pub const POWER_LAG: Color = Color::LightMagenta;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Selected item text (for contrast on yellow bg)
    pub const SELECTED_FG: Color = Color::Black;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted/secondary text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Main title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Active border style
    pub fn border_active() -> Style {
        Style::default().fg(Colors::PRIMARY)
    }

    /// Inactive border style
    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Row under the cursor
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Ticked checklist entry
    pub fn checked() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    /// Unticked checklist entry
    pub fn unchecked() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Navigation bar key hint
    pub fn nav_key() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Navigation bar action label
    pub fn nav_label() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

// =============================================================================
// SEMANTIC STYLES
// =============================================================================

/// Semantic styling helpers
pub struct Theme;

impl Theme {
    /// Style of the status label for a selection outcome
    pub fn status_style(status: SelectionStatus) -> Style {
        match status {
            SelectionStatus::Ready => Style::default().fg(Colors::PRIMARY),
            SelectionStatus::Insufficient => Style::default()
                .fg(Colors::WARNING)
                .add_modifier(Modifier::BOLD),
            SelectionStatus::Invalid | SelectionStatus::Inconsistent => Style::default()
                .fg(Colors::ERROR)
                .add_modifier(Modifier::BOLD),
        }
    }
}
