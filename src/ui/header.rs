use super::theme::Palette;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const SPARKLE_CHARS: &[char] = &['.', '+', '*', '+', '.', ' '];

pub fn draw_header(f: &mut Frame, area: Rect, tick: u64, palette: &Palette) {
    let tick = tick as usize;

    let left_sparkle = SPARKLE_CHARS[tick / 4 % SPARKLE_CHARS.len()];
    let right_sparkle = SPARKLE_CHARS[(tick / 4 + 3) % SPARKLE_CHARS.len()];

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  m K A S T   A R C A D E  {}", left_sparkle, right_sparkle),
            palette.title_style(),
        )),
        Line::from(Span::styled(
            "INSERT COIN - SELECT A GAME",
            palette.text_style(),
        )),
    ];

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
