use super::header;
use super::layout;
use super::theme;
use super::widgets::{truncate_front, DrawCtx};
use crate::app::App;
use crate::types::{Command, GameRecord, PasswordPurpose};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Paged strip of game cards with admin and quit buttons.
pub fn draw_main_screen(f: &mut Frame, area: Rect, app: &App, ctx: &mut DrawCtx) {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(8),    // cards
            Constraint::Length(3), // buttons
            Constraint::Length(1), // footer
        ])
        .split(area);

    header::draw_header(f, vert[0], app.tick, &ctx.palette);
    draw_strip(f, vert[1], app, ctx);
    draw_buttons(f, vert[2], ctx);
    layout::draw_footer(
        f,
        vert[3],
        app,
        &ctx.palette,
        &[
            ("[←→]", "Page"),
            ("[Tab]", "Select"),
            ("[Enter]", "Play"),
            ("[1-9]", "Quick play"),
            ("[a]", "Admin"),
            ("[q]", "Quit"),
        ],
    );
}

fn draw_strip(f: &mut Frame, area: Rect, app: &App, ctx: &mut DrawCtx) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(5),
        ])
        .split(area);

    let len = app.games.len();
    let screen = &app.main_screen;

    if screen.can_scroll_back() {
        draw_arrow(f, cols[0], "<", ctx);
        ctx.hits.register(cols[0], Command::ChangePage(-1));
    }
    if screen.can_scroll_forward(len) {
        draw_arrow(f, cols[2], ">", ctx);
        ctx.hits.register(cols[2], Command::ChangePage(1));
    }

    if len == 0 {
        let middle = Rect::new(cols[1].x, cols[1].y + cols[1].height / 2, cols[1].width, 1);
        f.render_widget(
            Paragraph::new(Span::styled("No games configured", ctx.palette.text_style()))
                .alignment(Alignment::Center),
            middle,
        );
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, screen.games_per_screen as u32);
            screen.games_per_screen
        ])
        .spacing(2)
        .split(cols[1]);

    for (slot, index) in screen.visible(len).enumerate() {
        let game = &app.games[index];
        let card = slots[slot];
        draw_card(f, card, game, slot + 1, index == screen.selected, ctx);
        ctx.hits
            .register(card, Command::Launch(game.executable_path.clone()));
    }
}

fn draw_arrow(f: &mut Frame, area: Rect, glyph: &str, ctx: &DrawCtx) {
    let style = if ctx.hovered(area) {
        Style::default()
            .fg(ctx.palette.header)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
            .fg(theme::ARROW)
            .add_modifier(Modifier::BOLD)
    };
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    f.render_widget(
        Paragraph::new(Span::styled(glyph, style)).alignment(Alignment::Center),
        row,
    );
}

fn draw_card(
    f: &mut Frame,
    area: Rect,
    game: &GameRecord,
    number: usize,
    selected: bool,
    ctx: &DrawCtx,
) {
    let lit = selected || ctx.hovered(area);
    let border_color = if lit {
        ctx.palette.header
    } else {
        ctx.palette.button
    };

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {} ", number), ctx.palette.key_hint_style()),
            Span::styled(
                format!("{} ", game.name),
                ctx.palette.text_style().add_modifier(Modifier::BOLD),
            ),
        ]))
        .borders(Borders::ALL)
        .border_type(if lit {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let width = inner.width.saturating_sub(2) as usize;
    let image = if game.image_path.is_empty() {
        Span::styled(" [ no image ]", ctx.palette.footer_style())
    } else {
        Span::styled(
            format!(" [img] {}", truncate_front(&game.image_path, width.saturating_sub(7))),
            ctx.palette.footer_style(),
        )
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(image),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", game.description),
            ctx.palette.text_style(),
        )),
    ];
    let body_height = inner.height.saturating_sub(1);
    let body = Rect::new(inner.x, inner.y, inner.width, body_height);
    lines.truncate(body_height as usize);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);

    let play = if lit { ">> PLAY <<" } else { "PLAY" };
    let play_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    f.render_widget(
        Paragraph::new(Span::styled(play, ctx.palette.key_hint_style())).alignment(Alignment::Center),
        play_row,
    );
}

fn draw_buttons(f: &mut Frame, area: Rect, ctx: &mut DrawCtx) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(14),
            Constraint::Min(0),
            Constraint::Length(14),
            Constraint::Length(2),
        ])
        .split(area);

    ctx.button(
        f,
        cols[1],
        "ADMIN",
        Command::OpenPassword(PasswordPurpose::Admin),
    );
    ctx.button(
        f,
        cols[3],
        "QUIT",
        Command::OpenPassword(PasswordPurpose::Exit),
    );
}
