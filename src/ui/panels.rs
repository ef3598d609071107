//! Content panels
//!
//! Feature checklist with the status label, metrics block and plot locators
//! of the current selection, plus the combination browser.

use crate::app::AppState;
use crate::catalog::{DisplayResult, ModelCatalog};
use crate::engine::combinations::Combination;
use crate::logic::resolver::metrics_summary;
use crate::theme::{Colors, Styles, Theme};
use crate::types::Feature;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// One checklist row, e.g. `[x]  7  Power[t-1] (kWh)`
pub fn checklist_line(index: usize, label: &str, checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    format!("{} {:>2}  {}", mark, index, label)
}

/// One browser row, e.g. `    0  ( 6)  [0, 1, 2, 3, 4, 5]`
pub fn browser_line(position: usize, combination: &Combination) -> String {
    format!("{:>5}  ({:>2})  {}", position, combination.len(), combination)
}

fn block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_style(Styles::title())
        .border_style(if focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        })
}

// ============================================================================
// Feature Selection
// ============================================================================

pub fn render_feature_select(
    f: &mut Frame,
    state: &AppState,
    result: &DisplayResult,
    catalog: &ModelCatalog,
    area: Rect,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_checklist(f, state, result, catalog, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Metrics
            Constraint::Min(8),    // Plots
        ])
        .split(columns[1]);

    let metrics = Paragraph::new(result.metrics_text.clone())
        .block(block(&format!("Model {} metrics", result.position), false))
        .style(Styles::text());
    f.render_widget(metrics, rows[0]);

    render_plots(f, result, catalog, rows[1]);
}

fn render_checklist(
    f: &mut Frame,
    state: &AppState,
    result: &DisplayResult,
    catalog: &ModelCatalog,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let status = Paragraph::new(result.label.clone()).style(Theme::status_style(result.status));
    f.render_widget(status, chunks[0]);

    let items: Vec<ListItem> = catalog
        .universe()
        .labels()
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let checked = state.is_selected(index);
            let style = if index == state.feature_cursor {
                Styles::selected()
            } else if checked && Feature::from_index(index).is_some_and(Feature::is_power_lag) {
                Style::default().fg(Colors::POWER_LAG)
            } else if checked {
                Styles::checked()
            } else {
                Styles::unchecked()
            };
            ListItem::new(checklist_line(index, label, checked)).style(style)
        })
        .collect();

    let title = format!(
        "Features ({}/{} selected)",
        state.selected.len(),
        catalog.universe().len()
    );
    f.render_widget(List::new(items).block(block(&title, true)), chunks[1]);
}

fn render_plots(f: &mut Frame, result: &DisplayResult, catalog: &ModelCatalog, area: Rect) {
    let heading = |text: &'static str| Line::from(Span::styled(text, Styles::title()));
    let locator = |text: String| Line::from(Span::styled(format!("  {}", text), Styles::text()));

    let lines = vec![
        heading("Predicted energy consumption and real energy consumption"),
        locator(result.artifacts.prediction.clone()),
        Line::from(""),
        heading("Scatter plot of predicted/real energy consumption"),
        locator(result.artifacts.scatter.clone()),
        Line::from(""),
        heading("Scatter plots between Power Consumption and each feature"),
        locator(catalog.artifacts().exploration_plot()),
    ];

    let plots = Paragraph::new(lines)
        .block(block("Plots", false))
        .wrap(Wrap { trim: false });
    f.render_widget(plots, area);
}

// ============================================================================
// Combination Browser
// ============================================================================

pub fn render_combination_browser(
    f: &mut Frame,
    state: &AppState,
    catalog: &ModelCatalog,
    area: Rect,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let table = catalog.table();
    let items: Vec<ListItem> = table
        .iter()
        .enumerate()
        .map(|(pos, comb)| ListItem::new(browser_line(pos, comb)))
        .collect();

    let list = List::new(items)
        .block(block(&format!("Models ({})", table.len()), true))
        .style(Styles::text())
        .highlight_style(Styles::selected())
        .highlight_symbol(">> ");
    let mut list_state = ListState::default().with_selected(Some(state.browser_selection));
    f.render_stateful_widget(list, columns[0], &mut list_state);

    let mut lines = Vec::new();
    if let Some(comb) = table.get(state.browser_selection) {
        lines.push(Line::from(Span::styled(
            format!("Position {}", state.browser_selection),
            Styles::title(),
        )));
        lines.push(Line::from(""));
        for index in comb.iter() {
            let label = catalog.universe().label(index).unwrap_or("?");
            lines.push(Line::from(format!("  {:>2}  {}", index, label)));
        }
        lines.push(Line::from(""));
        if let Some(row) = catalog.metrics().get(state.browser_selection) {
            lines.extend(metrics_summary(row).lines().map(|l| Line::from(l.to_string())));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter applies this combination to the checklist",
            Styles::text_muted(),
        )));
    }

    let detail = Paragraph::new(lines)
        .block(block("Details", false))
        .wrap(Wrap { trim: false });
    f.render_widget(detail, columns[1]);
}
