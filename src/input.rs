use crate::app::App;
use crate::screens::admin::AdminView;
use crate::types::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C is the window-close request: it asks for the exit password.
    if ctrl && key.code == KeyCode::Char('c') {
        if !matches!(app.screen, Screen::PasswordPrompt(_)) {
            app.quit_signal();
        }
        return;
    }

    match app.screen {
        Screen::PasswordPrompt(_) => handle_password_key(app, key),
        Screen::Main => handle_main_key(app, key),
        Screen::Admin => match &app.admin.view {
            AdminView::List => handle_admin_list_key(app, key),
            AdminView::EditForm(buffer) => {
                if buffer.active.is_some() {
                    handle_active_field_key(app, key);
                } else {
                    handle_form_key(app, key);
                }
            }
            AdminView::DeleteConfirm(index) => {
                let index = *index;
                handle_confirm_key(app, key, index);
            }
        },
    }
}

fn handle_password_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.execute(Command::SubmitPassword),
        KeyCode::Esc => app.execute(Command::CancelPassword),
        KeyCode::Backspace => app.password.remove_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.password.add_char(c);
        }
        _ => {}
    }
}

fn handle_main_key(app: &mut App, key: KeyEvent) {
    let len = app.games.len();
    match key.code {
        KeyCode::Right | KeyCode::PageDown => app.execute(Command::ChangePage(1)),
        KeyCode::Left | KeyCode::PageUp => app.execute(Command::ChangePage(-1)),
        KeyCode::Tab => app.main_screen.select_next(len),
        KeyCode::BackTab => app.main_screen.select_prev(len),
        KeyCode::Enter => {
            if let Some(game) = app.games.get(app.main_screen.selected) {
                let path = game.executable_path.clone();
                app.execute(Command::Launch(path));
            }
        }
        // Quick play: the number shown on each visible card.
        KeyCode::Char(c @ '1'..='9') => {
            let slot = c as usize - '1' as usize;
            let index = app.main_screen.visible(len).nth(slot);
            if let Some(game) = index.and_then(|i| app.games.get(i)) {
                let path = game.executable_path.clone();
                app.execute(Command::Launch(path));
            }
        }
        KeyCode::Char('a') => app.execute(Command::OpenPassword(PasswordPurpose::Admin)),
        KeyCode::Char('q') | KeyCode::Esc => {
            app.execute(Command::OpenPassword(PasswordPurpose::Exit));
        }
        _ => {}
    }
}

fn handle_admin_list_key(app: &mut App, key: KeyEvent) {
    let len = app.games.len();
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.admin.move_cursor(1, len),
        KeyCode::Up | KeyCode::Char('k') => app.admin.move_cursor(-1, len),
        KeyCode::Right | KeyCode::PageDown => app.execute(Command::ChangePage(1)),
        KeyCode::Left | KeyCode::PageUp => app.execute(Command::ChangePage(-1)),
        KeyCode::Enter | KeyCode::Char('e') => {
            let cursor = app.admin.cursor;
            app.execute(Command::RequestEdit(EditTarget::Existing(cursor)));
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let cursor = app.admin.cursor;
            app.execute(Command::RequestDeleteConfirm(cursor));
        }
        KeyCode::Char('n') | KeyCode::Char('a') => {
            app.execute(Command::RequestEdit(EditTarget::New));
        }
        KeyCode::Esc | KeyCode::Char('b') => app.execute(Command::ExitAdmin),
        _ => {}
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent, index: usize) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.execute(Command::CommitDelete(index)),
        KeyCode::Char('n') | KeyCode::Esc => app.execute(Command::CancelDelete),
        _ => {}
    }
}

/// Edit form with no field taking text.
fn handle_form_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => app.execute(Command::CommitSave),
        KeyCode::Esc => app.execute(Command::CancelEdit),
        KeyCode::Down | KeyCode::Tab => {
            if let Some(buffer) = app.admin.edit_buffer_mut() {
                buffer.focus = buffer.focus.next();
            }
        }
        KeyCode::Up | KeyCode::BackTab => {
            if let Some(buffer) = app.admin.edit_buffer_mut() {
                buffer.focus = buffer.focus.prev();
            }
        }
        KeyCode::Enter if !ctrl => {
            if let Some(field) = app.admin.edit_buffer().map(|b| b.focus) {
                app.execute(Command::ActivateField(field));
            }
        }
        _ => {}
    }
}

/// Edit form while a field is receiving keystrokes.
fn handle_active_field_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('s') {
        app.execute(Command::CommitSave);
        return;
    }

    let Some(buffer) = app.admin.edit_buffer_mut() else {
        return;
    };
    match key.code {
        KeyCode::Enter => buffer.commit_active(),
        KeyCode::Tab => {
            buffer.commit_active();
            buffer.focus = buffer.focus.next();
        }
        KeyCode::BackTab => {
            buffer.commit_active();
            buffer.focus = buffer.focus.prev();
        }
        KeyCode::Esc => buffer.discard_active(),
        KeyCode::Backspace => buffer.pop_char(),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            buffer.push_char(c);
        }
        _ => {}
    }
}

/// Pointer input. Only the press edge of the left button counts as a
/// click, so holding the button down never repeats an action.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let pos = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer = Some(pos);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.pointer = Some(pos);
            click(app, pos);
        }
        _ => {}
    }
}

fn click(app: &mut App, pos: Position) {
    let hit = app.hit_map.hit(pos);

    // Clicking anywhere but the active field finishes editing it.
    if let Some(buffer) = app.admin.edit_buffer_mut() {
        if let Some(active) = buffer.active_field() {
            if hit != Some(Command::ActivateField(active)) {
                buffer.commit_active();
            }
        }
    }

    if let Some(command) = hit {
        app.execute(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{app_with, game};
    use crate::ui::hitmap::HitMap;
    use crossterm::event::KeyEventKind;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    fn mouse(kind: MouseEventKind, pos: Position) -> MouseEvent {
        MouseEvent {
            kind,
            column: pos.x,
            row: pos.y,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Render one frame the way the event loop does, refreshing the hit map.
    fn frame(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut hits = HitMap::default();
        terminal
            .draw(|f| crate::ui::draw(f, app, &mut hits))
            .unwrap();
        app.hit_map = hits;
    }

    fn click_on(app: &mut App, command: &Command) {
        frame(app);
        let pos = app
            .hit_map
            .position_of(command)
            .unwrap_or_else(|| panic!("{:?} not on screen", command));
        handle_mouse(app, mouse(MouseEventKind::Down(MouseButton::Left), pos));
    }

    #[test]
    fn ctrl_c_opens_exit_prompt_instead_of_quitting() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, Vec::new());
        let mut key = ctrl('c');
        key.kind = KeyEventKind::Press;
        handle_key(&mut app, key);
        assert!(!app.should_quit);
        assert_eq!(app.screen, Screen::PasswordPrompt(PasswordPurpose::Exit));
    }

    #[test]
    fn exit_password_typed_on_keyboard() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, Vec::new());
        handle_key(&mut app, press(KeyCode::Char('q')));
        type_text(&mut app, "exit12");
        handle_key(&mut app, press(KeyCode::Backspace));
        type_text(&mut app, "23");
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[test]
    fn wrong_admin_password_stays_on_prompt() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, Vec::new());
        handle_key(&mut app, press(KeyCode::Char('a')));
        type_text(&mut app, "nope");
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.screen, Screen::PasswordPrompt(PasswordPurpose::Admin));
        assert_eq!(app.password.input(), "");
        assert_eq!(app.active_flash(), Some("ACCESS DENIED"));

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Main);
    }

    #[test]
    fn quick_play_uses_visible_slot() {
        let dir = TempDir::new().unwrap();
        let games = ["Pong", "Tetris", "Galaga", "Joust"]
            .iter()
            .map(|n| game(n))
            .collect();
        let mut app = app_with(&dir, games);
        app.main_screen.change_page(1, 4);
        handle_key(&mut app, press(KeyCode::Char('3')));
        // The path does not exist, so the launch is reported as a failure
        // naming the third visible card.
        let flash = app.active_flash().unwrap_or_default().to_string();
        assert!(flash.contains("/games/joust"), "{}", flash);
    }

    #[test]
    fn arrows_page_and_tab_walks_the_selection() {
        let dir = TempDir::new().unwrap();
        let games = ["A", "B", "C", "D", "E"].iter().map(|n| game(n)).collect();
        let mut app = app_with(&dir, games);
        for _ in 0..3 {
            handle_key(&mut app, press(KeyCode::Tab));
        }
        assert_eq!(app.main_screen.selected, 3);
        assert_eq!(app.main_screen.current_index, 1);
        handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.main_screen.current_index, 2);
        handle_key(&mut app, press(KeyCode::PageDown));
        assert_eq!(app.main_screen.current_index, 2);
        handle_key(&mut app, press(KeyCode::Left));
        handle_key(&mut app, press(KeyCode::Left));
        assert_eq!(app.main_screen.current_index, 0);
        assert!(app.main_screen.visible(5).contains(&app.main_screen.selected));
        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.main_screen.selected, 1);
    }

    #[test]
    fn add_game_from_keyboard() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, Vec::new());
        app.screen = Screen::Admin;

        handle_key(&mut app, press(KeyCode::Char('n')));
        handle_key(&mut app, press(KeyCode::Enter));
        type_text(&mut app, "Pong");
        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Down));
        // Focus is on the executable path; typing works even though the
        // picker could not open without a runtime.
        handle_key(&mut app, press(KeyCode::Enter));
        type_text(&mut app, "/bin/pong");
        handle_key(&mut app, ctrl('s'));

        assert!(matches!(app.admin.view, AdminView::List));
        assert_eq!(app.games.len(), 1);
        assert_eq!(app.games[0].name, "Pong");
        assert_eq!(app.games[0].executable_path, "/bin/pong");
        assert_eq!(app.games[0].description, NO_DESCRIPTION);
    }

    #[test]
    fn esc_discards_field_then_form() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, vec![game("Pong")]);
        app.screen = Screen::Admin;
        handle_key(&mut app, press(KeyCode::Enter));
        handle_key(&mut app, press(KeyCode::Enter));
        type_text(&mut app, "XYZ");
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(
            app.admin.edit_buffer().map(|b| b.form.name.as_str()),
            Some("Pong")
        );
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(matches!(app.admin.view, AdminView::List));
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Main);
        assert_eq!(app.games[0].name, "Pong");
    }

    #[test]
    fn plain_s_does_not_save_the_form() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, Vec::new());
        app.screen = Screen::Admin;
        app.execute(Command::RequestEdit(EditTarget::New));
        {
            let buffer = app.admin.edit_buffer_mut().unwrap();
            buffer.set_value(FormField::Name, "Pong".into());
            buffer.set_value(FormField::ExecutablePath, "/bin/pong".into());
        }

        handle_key(&mut app, press(KeyCode::Char('s')));
        assert!(matches!(app.admin.view, AdminView::EditForm(_)));
        assert!(app.games.is_empty());

        handle_key(&mut app, ctrl('s'));
        assert!(matches!(app.admin.view, AdminView::List));
        assert_eq!(app.games.len(), 1);
    }

    #[test]
    fn delete_confirm_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, vec![game("Pong"), game("Tetris")]);
        app.screen = Screen::Admin;
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Char('d')));
        handle_key(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.games.len(), 2);
        handle_key(&mut app, press(KeyCode::Char('d')));
        handle_key(&mut app, press(KeyCode::Char('y')));
        assert_eq!(app.games.len(), 1);
        assert_eq!(app.games[0].name, "Pong");
    }

    #[test]
    fn clicking_through_admin_flow() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, vec![game("Pong")]);

        click_on(&mut app, &Command::OpenPassword(PasswordPurpose::Admin));
        assert_eq!(app.screen, Screen::PasswordPrompt(PasswordPurpose::Admin));
        type_text(&mut app, "admin123");
        click_on(&mut app, &Command::SubmitPassword);
        assert_eq!(app.screen, Screen::Admin);

        click_on(&mut app, &Command::RequestEdit(EditTarget::Existing(0)));
        click_on(&mut app, &Command::ActivateField(FormField::Name));
        type_text(&mut app, " II");
        click_on(&mut app, &Command::CommitSave);
        assert_eq!(app.games[0].name, "Pong II");

        click_on(&mut app, &Command::ExitAdmin);
        assert_eq!(app.screen, Screen::Main);
    }

    #[test]
    fn clicking_elsewhere_commits_active_field() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, vec![game("Pong")]);
        app.screen = Screen::Admin;
        app.execute(Command::RequestEdit(EditTarget::Existing(0)));
        click_on(&mut app, &Command::ActivateField(FormField::Description));
        type_text(&mut app, "!");

        // A click on empty space lands on no region.
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), Position::new(0, 39)),
        );
        let buffer = app.admin.edit_buffer().unwrap();
        assert!(buffer.active.is_none());
        assert_eq!(buffer.form.description, "About Pong!");
    }

    #[test]
    fn release_and_motion_do_not_click() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, Vec::new());
        frame(&mut app);
        let pos = app
            .hit_map
            .position_of(&Command::OpenPassword(PasswordPurpose::Exit))
            .unwrap();

        handle_mouse(&mut app, mouse(MouseEventKind::Moved, pos));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), pos));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), pos));
        assert_eq!(app.screen, Screen::Main);
        assert_eq!(app.pointer, Some(pos));
    }
}
