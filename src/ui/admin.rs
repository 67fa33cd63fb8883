use super::hitmap::HitMap;
use super::layout;
use super::theme;
use super::widgets::{centered_fixed, truncate_front, DrawCtx};
use crate::app::App;
use crate::screens::admin::{AdminView, EditBuffer};
use crate::types::{Command, EditTarget, FormField};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Admin panel: game list, edit form, or the delete confirmation on top
/// of the list.
pub fn draw_admin(f: &mut Frame, area: Rect, app: &App, ctx: &mut DrawCtx) {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("< ADMIN PANEL >", theme::admin_title_style())),
        ])
        .alignment(Alignment::Center),
        vert[0],
    );

    match &app.admin.view {
        AdminView::List => {
            draw_list(f, vert[1], app, ctx);
            draw_admin_footer(f, vert[2], app, ctx, LIST_HINTS);
        }
        AdminView::EditForm(buffer) => {
            draw_edit_form(f, vert[1], app, buffer, ctx);
            let hints = if buffer.active.is_some() {
                ACTIVE_FIELD_HINTS
            } else {
                FORM_HINTS
            };
            draw_admin_footer(f, vert[2], app, ctx, hints);
        }
        AdminView::DeleteConfirm(index) => {
            // The list stays visible underneath but takes no clicks.
            let mut scratch = HitMap::default();
            let mut under = DrawCtx {
                hits: &mut scratch,
                pointer: None,
                palette: ctx.palette,
            };
            draw_list(f, vert[1], app, &mut under);
            draw_delete_confirm(f, area, app, *index, ctx);
            draw_admin_footer(f, vert[2], app, ctx, CONFIRM_HINTS);
        }
    }
}

const LIST_HINTS: &[(&str, &str)] = &[
    ("[↑↓]", "Select"),
    ("[←→]", "Page"),
    ("[e]", "Edit"),
    ("[d]", "Delete"),
    ("[n]", "New"),
    ("[Esc]", "Back"),
];

const FORM_HINTS: &[(&str, &str)] = &[
    ("[↑↓]", "Field"),
    ("[Enter]", "Edit field"),
    ("[Ctrl+S]", "Save"),
    ("[Esc]", "Cancel"),
];

const ACTIVE_FIELD_HINTS: &[(&str, &str)] = &[
    ("[Enter]", "Done"),
    ("[Tab]", "Next field"),
    ("[Esc]", "Discard"),
];

const CONFIRM_HINTS: &[(&str, &str)] = &[("[y]", "Delete"), ("[n]", "Keep")];

fn draw_admin_footer(
    f: &mut Frame,
    area: Rect,
    app: &App,
    ctx: &DrawCtx,
    hints: &[(&str, &str)],
) {
    let [w, h] = app.config.resolution;
    let resolution = format!("Resolution: {}x{} ", w, h);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(resolution.len() as u16),
        ])
        .split(area);

    layout::draw_footer(f, cols[0], app, &ctx.palette, hints);
    f.render_widget(
        Paragraph::new(Span::styled(resolution, Style::default().fg(theme::PATH_DIM)))
            .alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_list(f: &mut Frame, area: Rect, app: &App, ctx: &mut DrawCtx) {
    let admin = &app.admin;
    let len = app.games.len();

    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" Games ({}) ", len),
            theme::admin_title_style(),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ROW_BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // column headers
            Constraint::Min(1),    // rows
            Constraint::Length(3), // navigation
        ])
        .split(inner);

    let header_cols = row_columns(vert[0]);
    let header_style = Style::default()
        .fg(ctx.palette.header)
        .add_modifier(Modifier::BOLD);
    f.render_widget(Paragraph::new(Span::styled("  Name", header_style)), header_cols[0]);
    f.render_widget(Paragraph::new(Span::styled("Path", header_style)), header_cols[1]);
    f.render_widget(
        Paragraph::new(Span::styled("Actions", header_style)).alignment(Alignment::Center),
        Rect::new(
            header_cols[2].x,
            header_cols[2].y,
            header_cols[2].width + header_cols[3].width,
            1,
        ),
    );

    if len == 0 {
        f.render_widget(
            Paragraph::new(Span::styled("No games available.", ctx.palette.text_style()))
                .alignment(Alignment::Center),
            Rect::new(vert[1].x, vert[1].y + 1, vert[1].width, 1),
        );
    }

    for (row, index) in admin.page_range(len).enumerate() {
        let y = vert[1].y + row as u16;
        if y >= vert[1].bottom() {
            break;
        }
        let row_area = Rect::new(vert[1].x, y, vert[1].width, 1);
        let game = &app.games[index];
        let selected = index == admin.cursor;
        if selected {
            f.render_widget(
                Block::default().style(Style::default().bg(theme::ROW_BG)),
                row_area,
            );
        }

        let cols = row_columns(row_area);
        let marker = if selected { "> " } else { "  " };
        let name_width = cols[0].width.saturating_sub(2) as usize;
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme::HIGHLIGHT)),
                Span::styled(
                    truncate_front(&game.name, name_width),
                    ctx.palette.text_style(),
                ),
            ])),
            cols[0],
        );
        f.render_widget(
            Paragraph::new(Span::styled(
                truncate_front(&game.executable_path, cols[1].width as usize),
                Style::default().fg(theme::PATH_DIM),
            )),
            cols[1],
        );

        ctx.button(
            f,
            cols[2],
            "Edit",
            Command::RequestEdit(EditTarget::Existing(index)),
        );
        ctx.danger_button(f, cols[3], "Delete", Command::RequestDeleteConfirm(index));
    }

    draw_list_nav(f, vert[2], app, ctx);
}

/// Name | path | edit | delete
fn row_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(12),
        ])
        .spacing(1)
        .split(area)
}

fn draw_list_nav(f: &mut Frame, area: Rect, app: &App, ctx: &mut DrawCtx) {
    let admin = &app.admin;
    let len = app.games.len();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10), // prev
            Constraint::Length(14), // page indicator
            Constraint::Length(10), // next
            Constraint::Min(0),
            Constraint::Length(18), // add
            Constraint::Length(1),
            Constraint::Length(10), // back
        ])
        .split(area);

    if admin.has_prev_page() {
        ctx.button(f, cols[0], "Prev", Command::ChangePage(-1));
    }
    let indicator = Rect::new(cols[1].x, cols[1].y + cols[1].height / 2, cols[1].width, 1);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("Page {}/{}", admin.page + 1, admin.page_count(len)),
            ctx.palette.text_style(),
        ))
        .alignment(Alignment::Center),
        indicator,
    );
    if admin.has_next_page(len) {
        ctx.button(f, cols[2], "Next", Command::ChangePage(1));
    }

    ctx.button(
        f,
        cols[4],
        "Add New Game",
        Command::RequestEdit(EditTarget::New),
    );
    ctx.button(f, cols[6], "Back", Command::ExitAdmin);
}

fn draw_edit_form(f: &mut Frame, area: Rect, app: &App, buffer: &EditBuffer, ctx: &mut DrawCtx) {
    let title = match buffer.target {
        EditTarget::New => " Add New Game ",
        EditTarget::Existing(_) => " Edit Game ",
    };
    let block = Block::default()
        .title(Line::from(Span::styled(title, theme::admin_title_style())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ROW_BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(FormField::ALL.iter().map(|_| Constraint::Length(4)));
    constraints.extend([
        Constraint::Length(1), // error
        Constraint::Length(3), // buttons
        Constraint::Min(0),
    ]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in FormField::ALL.iter().enumerate() {
        draw_field(f, rows[i + 1], app, buffer, *field, ctx);
    }

    let error_row = rows[FormField::ALL.len() + 1];
    if let Some(error) = &buffer.error {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("  {}", error),
                Style::default()
                    .fg(theme::DANGER)
                    .add_modifier(Modifier::BOLD),
            )),
            error_row,
        );
    }

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Length(2),
        ])
        .split(rows[FormField::ALL.len() + 2]);
    ctx.button(f, buttons[1], "Cancel", Command::CancelEdit);
    ctx.button(f, buttons[3], "Save", Command::CommitSave);
}

fn draw_field(
    f: &mut Frame,
    area: Rect,
    app: &App,
    buffer: &EditBuffer,
    field: FormField,
    ctx: &mut DrawCtx,
) {
    let active = buffer.active_field() == Some(field);
    let focused = buffer.focus == field;
    let inset = Rect::new(area.x + 2, area.y, area.width.saturating_sub(4), area.height);

    let mut label = vec![Span::styled(field.label(), ctx.palette.text_style())];
    if field.uses_picker() {
        let hint = if active && buffer.picker_pending() {
            "  (choosing file...)"
        } else {
            "  (click to browse)"
        };
        label.push(Span::styled(hint, Style::default().fg(theme::PATH_DIM)));
    }
    f.render_widget(
        Paragraph::new(Line::from(label)),
        Rect::new(inset.x, inset.y, inset.width, 1),
    );

    let input = Rect::new(inset.x, inset.y + 1, inset.width, inset.height.saturating_sub(1).min(3));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        })
        .border_style(theme::field_border_style(focused || ctx.hovered(input)))
        .style(theme::field_style(active));
    let text_width = block.inner(input).width.saturating_sub(1) as usize;

    let mut spans = vec![Span::styled(
        truncate_front(buffer.display_value(field), text_width),
        ctx.palette.text_style(),
    )];
    if active && app.tick / 15 % 2 == 0 {
        spans.push(Span::styled("█", Style::default().fg(theme::HIGHLIGHT)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), input);
    ctx.hits.register(input, Command::ActivateField(field));
}

fn draw_delete_confirm(f: &mut Frame, area: Rect, app: &App, index: usize, ctx: &mut DrawCtx) {
    let popup = centered_fixed(56, 11, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Line::from(Span::styled(
            " DELETE GAME ",
            Style::default()
                .fg(theme::DANGER)
                .add_modifier(Modifier::BOLD),
        )))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme::DANGER))
        .style(Style::default().bg(theme::OVERLAY_BG));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let name = app.games.get(index).map(|g| g.name.as_str()).unwrap_or("");
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1), // question
            Constraint::Length(1), // name
            Constraint::Length(1),
            Constraint::Length(3), // buttons
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Are you sure you want to delete the game:",
            ctx.palette.text_style(),
        ))
        .alignment(Alignment::Center),
        rows[1],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("\"{}\"", truncate_front(name, rows[2].width.saturating_sub(2) as usize)),
            Style::default()
                .fg(theme::HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        rows[2],
    );

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(rows[4]);
    ctx.button(f, buttons[1], "Cancel", Command::CancelDelete);
    ctx.danger_button(f, buttons[3], "Delete", Command::CommitDelete(index));
}
