//! Header and common widget rendering
//!
//! Title bar, project introduction, navigation bar and help overlay.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::Styles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Application title
pub const TITLE: &str = "Hourly Power Consumption: Support Vector Regression Models";

/// Introductory text shown under the title
pub fn intro_text(model_count: usize) -> String {
    format!(
        "Projects power consumption at a given hour using Support Vector Regression. \
         Test any of the {} input combinations below. The Power[t-n] inputs carry most \
         of the weight: models keep their accuracy whenever they are present, so a \
         plain autoregression already models consumption well.",
        model_count
    )
}

/// Render a title section
pub fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let title_widget = Paragraph::new(title)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active()),
        )
        .alignment(Alignment::Center)
        .style(Styles::title());
    f.render_widget(title_widget, area);
}

/// Render the project introduction
pub fn render_intro(f: &mut Frame, area: Rect, model_count: usize) {
    let intro = Paragraph::new(intro_text(model_count))
        .style(Styles::text_muted())
        .wrap(Wrap { trim: true });
    f.render_widget(intro, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let mut spans = Vec::new();
    for item in keybinding_ctx.get_nav_items(&state.mode) {
        spans.push(Span::styled(format!(" {} ", item.key_display), Styles::nav_key()));
        spans.push(Span::styled(format!("{}  ", item.action_label), Styles::nav_label()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    help_overlay.render(f, f.area());
}
