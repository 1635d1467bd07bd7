/*
Catppuccin Color Palette (subset)

Latte
Lavender,7287fd
Blue,1e66f5
Peach,fe640b
Red,d20f39
Text,4c4f69
Subtext 0,6c6f85
Overlay 0,9ca0b0
Surface 0,ccd0da
Base,eff1f5
Mantle,e6e9ef

Mocha
Lavender,b4befe
Blue,89b4fa
Peach,fab387
Red,f38ba8
Text,cdd6f4
Subtext 0,a6adc8
Overlay 0,6c7086
Surface 0,313244
Base,1e1e2e
Mantle,181825
*/

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Mocha, // Dark theme (default)
    Latte, // Light theme
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub lavender: Color,
    pub blue: Color,
    pub peach: Color,
    pub red: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay0: Color,
    pub surface0: Color,
    pub base: Color,
    pub mantle: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self {
                lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
                blue: Color::Rgb(0x89, 0xb4, 0xfa),
                peach: Color::Rgb(0xfa, 0xb3, 0x87),
                red: Color::Rgb(0xf3, 0x8b, 0xa8),
                text: Color::Rgb(0xcd, 0xd6, 0xf4),
                subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
                overlay0: Color::Rgb(0x6c, 0x70, 0x86),
                surface0: Color::Rgb(0x31, 0x32, 0x44),
                base: Color::Rgb(0x1e, 0x1e, 0x2e),
                mantle: Color::Rgb(0x18, 0x18, 0x25),
            },
            ThemeVariant::Latte => Self {
                lavender: Color::Rgb(0x72, 0x87, 0xfd),
                blue: Color::Rgb(0x1e, 0x66, 0xf5),
                peach: Color::Rgb(0xfe, 0x64, 0x0b),
                red: Color::Rgb(0xd2, 0x0f, 0x39),
                text: Color::Rgb(0x4c, 0x4f, 0x69),
                subtext0: Color::Rgb(0x6c, 0x6f, 0x85),
                overlay0: Color::Rgb(0x9c, 0xa0, 0xb0),
                surface0: Color::Rgb(0xcc, 0xd0, 0xda),
                base: Color::Rgb(0xef, 0xf1, 0xf5),
                mantle: Color::Rgb(0xe6, 0xe9, 0xef),
            },
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.lavender).add_modifier(Modifier::BOLD)
    }

    /// Back affordance in the navigation bar
    pub fn back_style(&self) -> Style {
        Style::default().fg(self.blue)
    }

    pub fn link_style(&self, enabled: bool, focused: bool) -> Style {
        let style = if enabled {
            Style::default().fg(self.blue)
        } else {
            Style::default().fg(self.overlay0)
        };

        if focused {
            style.bg(self.surface0).add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.subtext0)
    }

    pub fn bar_style(&self) -> Style {
        Style::default().bg(self.mantle)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}
