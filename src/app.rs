use crate::launcher;
use crate::picker::PickerHandle;
use crate::screens::admin::{AdminPanel, AdminView, EditBuffer};
use crate::screens::main_screen::MainScreen;
use crate::screens::password::PasswordDialog;
use crate::store::GameStore;
use crate::types::*;
use crate::ui::hitmap::HitMap;
use ratatui::layout::Position;
use tracing::{debug, info, warn};

/// Ticks a flash message stays on screen (30 ticks per second).
const FLASH_TICKS: u64 = 60;

/// Top-level application state and the single owner of the game collection.
pub struct App {
    pub config: Config,
    pub games: Vec<GameRecord>,
    store: GameStore,
    pub screen: Screen,
    pub main_screen: MainScreen,
    pub admin: AdminPanel,
    pub password: PasswordDialog,
    /// Clickable regions from the last rendered frame.
    pub hit_map: HitMap,
    /// Last known pointer position, for hover highlighting.
    pub pointer: Option<Position>,
    pub should_quit: bool,
    /// Set after a launch; the frame loop iconifies the terminal window.
    pub minimize_requested: bool,
    pub tick: u64,
    /// Brief status message shown in the footer, auto-clears.
    pub flash_message: Option<String>,
    pub flash_until: u64,
}

impl App {
    pub fn new(config: Config, store: GameStore, games: Vec<GameRecord>) -> Self {
        let main_screen = MainScreen::new(config.games_per_screen);
        let load_notice = store.load_notice().map(str::to_string);
        let mut app = Self {
            config,
            games,
            store,
            screen: Screen::Main,
            main_screen,
            admin: AdminPanel::default(),
            password: PasswordDialog::default(),
            hit_map: HitMap::default(),
            pointer: None,
            should_quit: false,
            minimize_requested: false,
            tick: 0,
            flash_message: None,
            flash_until: 0,
        };
        if let Some(notice) = load_notice {
            app.flash(notice);
        }
        app
    }

    pub fn flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some(message.into());
        self.flash_until = self.tick + FLASH_TICKS;
    }

    pub fn active_flash(&self) -> Option<&str> {
        self.flash_message
            .as_deref()
            .filter(|_| self.tick < self.flash_until)
    }

    /// Run one deferred command.
    pub fn execute(&mut self, command: Command) {
        debug!(?command, screen = ?self.screen, "execute");
        match command {
            Command::OpenPassword(purpose) => self.open_password(purpose),
            Command::Launch(path) => self.launch(&path),
            Command::ChangePage(direction) => self.change_page(direction),
            Command::ExitAdmin => self.exit_admin(),
            Command::RequestEdit(target) => self.request_edit(target),
            Command::RequestDeleteConfirm(index) => self.request_delete_confirm(index),
            Command::CommitDelete(index) => self.commit_delete(index),
            Command::CancelDelete => self.admin.cancel_delete(),
            Command::ActivateField(field) => self.activate_field(field),
            Command::CommitSave => self.commit_save(),
            Command::CancelEdit => self.admin.cancel_edit(),
            Command::SubmitPassword => self.submit_password(),
            Command::CancelPassword => self.cancel_password(),
        }
    }

    /// The operating system (or Ctrl+C) asked us to close: confirm first.
    pub fn quit_signal(&mut self) {
        if self.screen == Screen::PasswordPrompt(PasswordPurpose::Exit) {
            return;
        }
        info!("quit requested, asking for exit password");
        self.open_password(PasswordPurpose::Exit);
    }

    pub fn open_password(&mut self, purpose: PasswordPurpose) {
        self.password.activate();
        self.screen = Screen::PasswordPrompt(purpose);
    }

    pub fn submit_password(&mut self) {
        let Screen::PasswordPrompt(purpose) = self.screen else {
            return;
        };
        let secret = match purpose {
            PasswordPurpose::Admin => &self.config.admin_password,
            PasswordPurpose::Exit => &self.config.exit_password,
        };
        if !self.password.matches(secret) {
            warn!(?purpose, "wrong password");
            self.password.clear();
            self.flash("ACCESS DENIED");
            return;
        }
        self.password.clear();
        match purpose {
            PasswordPurpose::Admin => {
                info!("entering admin panel");
                self.admin.reset();
                self.admin.clamp(self.games.len());
                self.screen = Screen::Admin;
            }
            PasswordPurpose::Exit => {
                info!("exit password accepted");
                self.should_quit = true;
            }
        }
    }

    pub fn cancel_password(&mut self) {
        self.password.clear();
        self.screen = Screen::Main;
    }

    pub fn exit_admin(&mut self) {
        self.admin.reset();
        self.main_screen.clamp(self.games.len());
        self.screen = Screen::Main;
    }

    /// Scroll whichever screen is active.
    pub fn change_page(&mut self, direction: isize) {
        let len = self.games.len();
        match self.screen {
            Screen::Main => self.main_screen.change_page(direction, len),
            Screen::Admin => self.admin.change_page(direction, len),
            Screen::PasswordPrompt(_) => {}
        }
    }

    /// Start a game. Failures are logged and flashed, never propagated.
    pub fn launch(&mut self, executable_path: &str) {
        match launcher::spawn_game(executable_path) {
            Ok(_) => {
                let name = self
                    .games
                    .iter()
                    .find(|g| g.executable_path == executable_path)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| executable_path.to_string());
                self.flash(format!("Launching {}...", name));
                self.minimize_requested = true;
            }
            Err(e) => {
                warn!("{}", e);
                self.flash(e.to_string());
            }
        }
    }

    /// Open the edit form for an existing record, or an empty one for `New`.
    pub fn request_edit(&mut self, target: EditTarget) {
        let record = match target {
            EditTarget::New => None,
            EditTarget::Existing(index) => match self.games.get(index) {
                Some(game) => Some(game),
                None => return,
            },
        };
        self.admin.view = AdminView::EditForm(EditBuffer::new(target, record));
    }

    pub fn request_delete_confirm(&mut self, index: usize) {
        if index < self.games.len() {
            self.admin.view = AdminView::DeleteConfirm(index);
        }
    }

    pub fn commit_delete(&mut self, index: usize) {
        if index < self.games.len() {
            let removed = self.games.remove(index);
            info!(name = %removed.name, index, "game deleted");
            self.persist();
        }
        self.admin.view = AdminView::List;
        self.admin.clamp(self.games.len());
        self.main_screen.clamp(self.games.len());
    }

    /// Validate and store the edit form. Invalid input keeps the form open.
    pub fn commit_save(&mut self) {
        let Some(buffer) = self.admin.edit_buffer_mut() else {
            return;
        };
        buffer.commit_active();
        let record = match buffer.to_record() {
            Ok(record) => record,
            Err(e) => {
                debug!("save rejected: {}", e);
                buffer.error = Some(e);
                return;
            }
        };
        let target = buffer.target;

        match target {
            EditTarget::Existing(index) if index < self.games.len() => {
                info!(name = %record.name, index, "game updated");
                self.games[index] = record;
            }
            _ => {
                info!(name = %record.name, "game added");
                self.games.push(record);
                self.admin.cursor = self.games.len() - 1;
                self.admin.page = self.admin.cursor / crate::screens::admin::GAMES_PER_PAGE;
            }
        }
        self.persist();
        self.admin.view = AdminView::List;
    }

    /// Activate a form field; path fields also open the file picker.
    pub fn activate_field(&mut self, field: FormField) {
        let Some(buffer) = self.admin.edit_buffer_mut() else {
            return;
        };
        buffer.activate(field);
        if !field.uses_picker() {
            return;
        }
        if buffer.picker_pending() {
            debug!(?field, "file picker already open");
            return;
        }
        debug!(?field, "opening file picker");
        buffer.attach_picker(PickerHandle::spawn(field));
    }

    /// Called every tick to drain the file picker.
    pub fn poll_picker(&mut self) {
        if let Some(buffer) = self.admin.edit_buffer_mut() {
            buffer.poll_picker();
        }
    }

    fn persist(&mut self) {
        match self.store.save(&self.games) {
            Ok(()) => debug!(path = %self.store.path().display(), "games saved"),
            Err(e) => {
                warn!("{}", e);
                self.flash(format!("Save failed: {}", e));
            }
        }
    }
}
