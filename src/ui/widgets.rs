use super::hitmap::HitMap;
use super::theme::{self, Palette};
use crate::types::Command;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Per-frame drawing state shared by the screen renderers.
pub struct DrawCtx<'h> {
    pub hits: &'h mut HitMap,
    pub pointer: Option<Position>,
    pub palette: Palette,
}

impl DrawCtx<'_> {
    pub fn hovered(&self, area: Rect) -> bool {
        self.pointer.is_some_and(|p| area.contains(p))
    }

    /// Draw a clickable button and register its command.
    pub fn button(&mut self, f: &mut Frame, area: Rect, label: &str, command: Command) {
        let hovered = self.hovered(area);
        draw_button_face(f, area, label, self.palette.button_style(hovered), hovered);
        self.hits.register(area, command);
    }

    /// A button that turns red under the pointer.
    pub fn danger_button(&mut self, f: &mut Frame, area: Rect, label: &str, command: Command) {
        let hovered = self.hovered(area);
        let mut style = self.palette.button_style(false);
        if hovered {
            style = style.bg(theme::DANGER_HOVER);
        }
        draw_button_face(f, area, label, style, hovered);
        self.hits.register(area, command);
    }
}

fn draw_button_face(f: &mut Frame, area: Rect, label: &str, style: Style, hovered: bool) {
    if area.height >= 3 {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if hovered {
                BorderType::Thick
            } else {
                BorderType::Plain
            })
            .border_style(Style::default().fg(Color::White))
            .style(style);
        let inner = block.inner(area);
        f.render_widget(block, area);
        let label_row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        f.render_widget(
            Paragraph::new(Line::from(label)).alignment(Alignment::Center),
            label_row,
        );
    } else {
        f.render_widget(
            Paragraph::new(Line::from(format!("[ {} ]", label)))
                .alignment(Alignment::Center)
                .style(style),
            area,
        );
    }
}

/// Fixed-size rectangle centred in `area`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Keep the end of `text` (the interesting part of a path), prefixed with
/// `...` when it does not fit in `max_width` columns.
pub fn truncate_front(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut tail: Vec<char> = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }
    let tail: String = tail.into_iter().rev().collect();
    format!("...{}", tail)
}
