use super::theme;
use super::widgets::{centered_fixed, DrawCtx};
use crate::app::App;
use crate::types::{Command, PasswordPurpose};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn draw_password_dialog(
    f: &mut Frame,
    area: Rect,
    app: &App,
    purpose: PasswordPurpose,
    ctx: &mut DrawCtx,
) {
    let popup = centered_fixed(50, 12, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", purpose.title()),
            ctx.palette.title_style(),
        )))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(ctx.palette.button_hover))
        .style(Style::default().bg(theme::OVERLAY_BG));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // prompt
            Constraint::Length(3), // input
            Constraint::Length(1),
            Constraint::Length(3), // buttons
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled("Enter password:", ctx.palette.text_style()))
            .alignment(Alignment::Center),
        rows[0],
    );

    let cursor = if app.tick / 15 % 2 == 0 { "█" } else { " " };
    let input_area = Rect::new(
        rows[1].x + 2,
        rows[1].y,
        rows[1].width.saturating_sub(4),
        rows[1].height,
    );
    let input = Paragraph::new(Line::from(vec![
        Span::styled(app.password.masked(), ctx.palette.text_style()),
        Span::styled(cursor, Style::default().fg(theme::HIGHLIGHT)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::field_border_style(true))
            .style(theme::field_style(true)),
    );
    f.render_widget(input, input_area);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14),
            Constraint::Length(2),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(rows[3]);

    ctx.button(f, buttons[1], "Confirm", Command::SubmitPassword);
    ctx.button(f, buttons[3], "Cancel", Command::CancelPassword);
}
