use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fmt;

/// Represents a keyboard key with optional modifiers (Ctrl, Alt, Shift)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a key binding with no modifiers
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Create a key binding with Ctrl modifier
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Create a key binding with Shift modifier
    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    /// Check if this key binding matches the given key event
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.code == event.code && self.modifiers == event.modifiers
    }
}

impl From<KeyCode> for KeyBinding {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Esc => write!(f, "Esc"),
            KeyCode::Backspace => write!(f, "Bksp"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::BackTab => write!(f, "S-Tab"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            other => write!(f, "{:?}", other),
        }
    }
}

/// What a key press asks the navigator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FocusNext,
    FocusPrevious,
    Activate,
    Back,
    Quit,
}

/// Key bindings with their help descriptions
pub struct Keymap {
    bindings: Vec<(KeyBinding, Action, &'static str)>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        keymap
            .bind(KeyCode::Tab, Action::FocusNext, "next")
            .bind(KeyCode::Down, Action::FocusNext, "next")
            .bind(KeyBinding::shift(KeyCode::BackTab), Action::FocusPrevious, "previous")
            .bind(KeyCode::BackTab, Action::FocusPrevious, "previous")
            .bind(KeyCode::Up, Action::FocusPrevious, "previous")
            .bind(KeyCode::Enter, Action::Activate, "push")
            .bind(KeyCode::Char(' '), Action::Activate, "push")
            .bind(KeyCode::Esc, Action::Back, "back")
            .bind(KeyCode::Backspace, Action::Back, "back")
            .bind(KeyCode::Left, Action::Back, "back")
            .bind(KeyCode::Char('q'), Action::Quit, "quit")
            .bind(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit, "quit");
        keymap
    }
}

impl Keymap {
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Add a binding; later bindings for the same key win
    pub fn bind(&mut self, key: impl Into<KeyBinding>, action: Action, description: &'static str) -> &mut Self {
        let key = key.into();
        self.bindings.retain(|(existing, _, _)| *existing != key);
        self.bindings.push((key, action, description));
        self
    }

    pub fn resolve(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(key, _, _)| key.matches(event))
            .map(|(_, action, _)| *action)
    }

    /// Help entries, keys sharing a description joined as aliases
    pub fn hints(&self) -> Vec<(String, &'static str)> {
        let mut grouped: HashMap<&'static str, Vec<String>> = HashMap::new();
        let mut order = Vec::new();

        for (key, _, description) in &self.bindings {
            grouped
                .entry(*description)
                .or_insert_with(|| {
                    order.push(*description);
                    Vec::new()
                })
                .push(key.to_string());
        }

        order
            .into_iter()
            .map(|description| {
                let mut keys = grouped.remove(description).unwrap_or_default();
                keys.dedup();
                (keys.join("/"), description)
            })
            .collect()
    }
}
