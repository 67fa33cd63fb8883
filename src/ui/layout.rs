use super::theme::Palette;
use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Bottom status line: the flash message while it lasts, otherwise the
/// key hints for the current screen.
pub fn draw_footer(
    f: &mut Frame,
    area: Rect,
    app: &App,
    palette: &Palette,
    hints: &[(&str, &str)],
) {
    if let Some(msg) = app.active_flash() {
        let footer = Line::from(Span::styled(
            format!(" {} ", msg),
            Style::default()
                .fg(palette.header)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(footer), area);
        return;
    }

    let mut spans = vec![Span::raw(" ")];
    for (key, label) in hints {
        spans.push(Span::styled(*key, palette.key_hint_style()));
        spans.push(Span::styled(format!(" {}  ", label), palette.footer_style()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
