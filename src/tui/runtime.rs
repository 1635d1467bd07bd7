use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use log::debug;
use ratatui::Frame;
use ratatui::layout::Rect;
use std::time::Duration;

use crate::tui::keymap::{Action, Keymap};
use crate::tui::navigator::Navigator;
use crate::tui::renderer::Renderer;
use crate::tui::theme::Theme;

/// Runtime configuration for TUI behavior and appearance
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Visual theme (colors, styles)
    pub theme: Theme,

    /// Frame budget of the event loop
    pub tick_rate: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            tick_rate: Duration::from_millis(16),
        }
    }
}

/// Routes key events to the navigator and renders it
pub struct StackRuntime {
    navigator: Navigator,
    keymap: Keymap,
    config: RuntimeConfig,
}

impl StackRuntime {
    pub fn new(navigator: Navigator, config: RuntimeConfig) -> Self {
        Self {
            navigator,
            keymap: Keymap::default(),
            config,
        }
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn tick_rate(&self) -> Duration {
        self.config.tick_rate
    }

    /// Handle a keyboard event. Returns Ok(false) when the app should quit.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(true);
        }

        let Some(action) = self.keymap.resolve(&key_event) else {
            return Ok(true);
        };
        debug!("Key {:?} -> {:?}", key_event.code, action);

        match action {
            Action::FocusNext => self.navigator.focus_next(),
            Action::FocusPrevious => self.navigator.focus_previous(),
            Action::Activate => {
                self.navigator.activate_focused();
            }
            Action::Back => {
                self.navigator.back();
            }
            Action::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Render to the whole frame
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        self.render_to_area(frame, area);
    }

    pub fn render_to_area(&self, frame: &mut Frame, area: Rect) {
        Renderer::render(frame, &self.config.theme, &self.keymap, &self.navigator, area);
    }
}
