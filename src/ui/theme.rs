use crate::types::{Rgb, Theme};
use ratatui::style::{Color, Modifier, Style};

// ── Fixed arcade palette ────────────────────────────────────────
pub const ADMIN_BG: Color = Color::Rgb(20, 20, 60);
pub const ADMIN_ACCENT: Color = Color::Rgb(0, 255, 0);
pub const ROW_BG: Color = Color::Rgb(40, 40, 70);
pub const ROW_BORDER: Color = Color::Rgb(0, 180, 0);
pub const FIELD_BG: Color = Color::Rgb(40, 40, 80);
pub const FIELD_ACTIVE_BG: Color = Color::Rgb(60, 60, 100);
pub const FIELD_BORDER: Color = Color::Rgb(150, 150, 220);
pub const PATH_DIM: Color = Color::Rgb(200, 200, 200);
pub const DANGER: Color = Color::Rgb(255, 50, 50);
pub const DANGER_HOVER: Color = Color::Rgb(255, 80, 80);
pub const HIGHLIGHT: Color = Color::Rgb(255, 255, 0);
pub const ARROW: Color = Color::Rgb(255, 220, 0);
pub const OVERLAY_BG: Color = Color::Rgb(40, 40, 70);

pub fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Colours taken from the configured theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub button: Color,
    pub button_hover: Color,
    pub text: Color,
    pub header: Color,
}

impl From<&Theme> for Palette {
    fn from(theme: &Theme) -> Self {
        Self {
            background: rgb(theme.background_color),
            button: rgb(theme.button_color),
            button_hover: rgb(theme.button_hover_color),
            text: rgb(theme.text_color),
            header: rgb(theme.header_color),
        }
    }
}

impl Palette {
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn key_hint_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(PATH_DIM)
    }

    pub fn button_style(&self, hovered: bool) -> Style {
        let bg = if hovered { self.button_hover } else { self.button };
        Style::default()
            .fg(self.text)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }
}

pub fn admin_title_style() -> Style {
    Style::default()
        .fg(ADMIN_ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn field_style(active: bool) -> Style {
    Style::default().bg(if active { FIELD_ACTIVE_BG } else { FIELD_BG })
}

pub fn field_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(HIGHLIGHT)
    } else {
        Style::default().fg(FIELD_BORDER)
    }
}
