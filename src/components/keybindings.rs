//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current application mode.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Home,
    End,
    Toggle,
    SelectAll,
    ClearAll,
    Apply,
    SwitchView,
    Back,
    Quit,
    Help,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
    /// Shown in the navigation bar (secondary aliases are not)
    pub in_nav_bar: bool,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
            in_nav_bar: true,
        }
    }

    /// Create an alias that works but is only listed in the help overlay
    pub fn alias(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            in_nav_bar: false,
            ..Self::new(key, action, display, description)
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            modifiers,
            ..Self::new(key, action, display, description)
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        // Shift is implied by uppercase chars and '?' on most layouts
        self.key == event.code
            && self.modifiers.difference(KeyModifiers::SHIFT)
                == event.modifiers.difference(KeyModifiers::SHIFT)
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding {
                in_nav_bar: false,
                ..Keybinding::with_modifiers(
                    KeyCode::Char('c'),
                    KeyModifiers::CONTROL,
                    KeyAction::Quit,
                    "Ctrl+C",
                    "Quit",
                )
            },
        ];

        self.mode_bindings.insert(
            AppMode::FeatureSelect,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous feature"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next feature"),
                Keybinding::alias(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Previous feature"),
                Keybinding::alias(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Next feature"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle feature"),
                Keybinding::alias(KeyCode::Enter, KeyAction::Toggle, "Enter", "Toggle feature"),
                Keybinding::new(KeyCode::Char('a'), KeyAction::SelectAll, "A", "Select all"),
                Keybinding::new(KeyCode::Char('n'), KeyAction::ClearAll, "N", "Clear all"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchView, "Tab", "Browse models"),
                Keybinding::alias(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::CombinationBrowser,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous model"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next model"),
                Keybinding::alias(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Previous model"),
                Keybinding::alias(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Next model"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "First model"),
                Keybinding::new(KeyCode::End, KeyAction::End, "End", "Last model"),
                Keybinding::new(KeyCode::Enter, KeyAction::Apply, "Enter", "Use this combination"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchView, "Tab", "Back to checklist"),
                Keybinding::alias(KeyCode::Esc, KeyAction::Back, "Esc", "Back to checklist"),
                Keybinding::alias(KeyCode::Char('b'), KeyAction::Back, "B", "Back to checklist"),
            ],
        );
    }

    /// All keybindings active in a mode (mode-specific first)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        self.mode_bindings
            .get(mode)
            .into_iter()
            .flatten()
            .chain(self.global_bindings.iter())
            .collect()
    }

    /// Action bound to a key event in the given mode, if any
    pub fn action_for(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Items for the bottom navigation bar
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        self.get_bindings(mode)
            .into_iter()
            .filter(|b| b.in_nav_bar)
            .map(|b| NavBarItem {
                key_display: b.display.clone(),
                action_label: b.description.clone(),
            })
            .collect()
    }

    /// Help overlay content grouped into sections
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let group = |title: &str, pred: fn(KeyAction) -> bool| HelpSection {
            title: title.to_string(),
            items: self
                .get_bindings(mode)
                .into_iter()
                .filter(|b| pred(b.action))
                .map(|b| (b.display.clone(), b.description.clone()))
                .collect(),
        };

        [
            group("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::Home
                        | KeyAction::End
                )
            }),
            group("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Toggle
                        | KeyAction::SelectAll
                        | KeyAction::ClearAll
                        | KeyAction::Apply
                        | KeyAction::SwitchView
                )
            }),
            group("General", |a| {
                matches!(a, KeyAction::Back | KeyAction::Help | KeyAction::Quit)
            }),
        ]
        .into_iter()
        .filter(|s| !s.items.is_empty())
        .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_mode_specific_actions() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.action_for(&AppMode::FeatureSelect, &key(KeyCode::Char(' '))),
            Some(KeyAction::Toggle)
        );
        assert_eq!(
            ctx.action_for(&AppMode::CombinationBrowser, &key(KeyCode::Enter)),
            Some(KeyAction::Apply)
        );
        assert_eq!(
            ctx.action_for(&AppMode::CombinationBrowser, &key(KeyCode::Char(' '))),
            None
        );
    }

    #[test]
    fn test_global_bindings_apply_everywhere() {
        let ctx = KeybindingContext::new();
        for mode in [AppMode::FeatureSelect, AppMode::CombinationBrowser] {
            assert_eq!(ctx.action_for(&mode, &key(KeyCode::Char('q'))), Some(KeyAction::Quit));
            let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
            assert_eq!(ctx.action_for(&mode, &ctrl_c), Some(KeyAction::Quit));
        }
    }

    #[test]
    fn test_shifted_question_mark_is_help() {
        let ctx = KeybindingContext::new();
        let event = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(ctx.action_for(&AppMode::FeatureSelect, &event), Some(KeyAction::Help));
    }

    #[test]
    fn test_nav_bar_hides_aliases() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(&AppMode::FeatureSelect);
        assert!(items.iter().any(|i| i.key_display == "Space"));
        assert!(!items.iter().any(|i| i.key_display == "J"));
        assert!(!items.iter().any(|i| i.key_display == "Ctrl+C"));
    }

    #[test]
    fn test_help_sections() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(&AppMode::FeatureSelect);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Navigation", "Actions", "General"]);
    }
}
