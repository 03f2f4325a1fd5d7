//! Catppuccin palettes (Mocha dark, Latte light), reduced to the colors the
//! screens draw with.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Mocha,
    Latte,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub green: Color,
    pub teal: Color,
    pub blue: Color,
    pub lavender: Color,
    pub peach: Color,
    pub red: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay1: Color,
    pub surface1: Color,
    pub base: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            green: Color::Rgb(0xa6, 0xe3, 0xa1),
            teal: Color::Rgb(0x94, 0xe2, 0xd5),
            blue: Color::Rgb(0x89, 0xb4, 0xfa),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
            peach: Color::Rgb(0xfa, 0xb3, 0x87),
            red: Color::Rgb(0xf3, 0x8b, 0xa8),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
            surface1: Color::Rgb(0x45, 0x47, 0x5a),
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
        }
    }

    fn latte() -> Self {
        Self {
            green: Color::Rgb(0x40, 0xa0, 0x2b),
            teal: Color::Rgb(0x17, 0x92, 0x99),
            blue: Color::Rgb(0x1e, 0x66, 0xf5),
            lavender: Color::Rgb(0x72, 0x87, 0xfd),
            peach: Color::Rgb(0xfe, 0x64, 0x0b),
            red: Color::Rgb(0xd2, 0x0f, 0x39),
            text: Color::Rgb(0x4c, 0x4f, 0x69),
            subtext0: Color::Rgb(0x6c, 0x6f, 0x85),
            overlay1: Color::Rgb(0x8c, 0x8f, 0xa1),
            surface1: Color::Rgb(0xbc, 0xc0, 0xcc),
            base: Color::Rgb(0xef, 0xf1, 0xf5),
        }
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.red)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.overlay1)
    }

    /// Highlighted chip or card
    pub fn active_style(&self) -> Style {
        Style::default()
            .fg(self.base)
            .bg(self.green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.green)
        } else {
            Style::default().fg(self.surface1)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}
