use crate::launcher;
use crate::picker::{PickerHandle, PickerPoll};
use crate::types::{EditTarget, FormField, GameRecord, NO_DESCRIPTION};
use thiserror::Error;
use tracing::debug;

/// Rows per page in the admin list.
pub const GAMES_PER_PAGE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,
    #[error("Executable path is required")]
    MissingExecutable,
}

/// The field currently receiving keystrokes, with its uncommitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveField {
    pub field: FormField,
    pub text: String,
}

/// Working copy of a record while the edit form is open.
#[derive(Debug)]
pub struct EditBuffer {
    pub target: EditTarget,
    pub form: GameRecord,
    pub active: Option<ActiveField>,
    /// Keyboard focus, independent of the active text-entry target.
    pub focus: FormField,
    pub error: Option<FormError>,
    picker: Option<PickerHandle>,
}

impl EditBuffer {
    pub fn new(target: EditTarget, record: Option<&GameRecord>) -> Self {
        Self {
            target,
            form: record.cloned().unwrap_or_default(),
            active: None,
            focus: FormField::Name,
            error: None,
            picker: None,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.form.name,
            FormField::Description => &self.form.description,
            FormField::ExecutablePath => &self.form.executable_path,
            FormField::ImagePath => &self.form.image_path,
        }
    }

    pub fn set_value(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.form.name,
            FormField::Description => &mut self.form.description,
            FormField::ExecutablePath => &mut self.form.executable_path,
            FormField::ImagePath => &mut self.form.image_path,
        };
        *slot = value;
    }

    /// Text shown for a field: the live buffer if it is active.
    pub fn display_value(&self, field: FormField) -> &str {
        match &self.active {
            Some(active) if active.field == field => &active.text,
            _ => self.value(field),
        }
    }

    pub fn active_field(&self) -> Option<FormField> {
        self.active.as_ref().map(|a| a.field)
    }

    /// Make `field` the text-entry target, committing whatever was active.
    pub fn activate(&mut self, field: FormField) {
        if self.active_field() == Some(field) {
            return;
        }
        self.commit_active();
        self.focus = field;
        self.active = Some(ActiveField {
            field,
            text: self.value(field).to_string(),
        });
    }

    /// Write the active buffer into the form and deactivate it.
    pub fn commit_active(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(field = ?active.field, text = %active.text, "field committed");
            self.set_value(active.field, active.text);
        }
    }

    /// Drop the active buffer without touching the form.
    pub fn discard_active(&mut self) {
        self.active = None;
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(active) = &mut self.active {
            active.text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(active) = &mut self.active {
            active.text.pop();
        }
    }

    pub fn picker_pending(&self) -> bool {
        self.picker.is_some()
    }

    pub fn attach_picker(&mut self, picker: PickerHandle) {
        self.picker = Some(picker);
    }

    /// Drain the file picker once. A chosen path lands in the form and
    /// deactivates the field if it is still the one being edited.
    pub fn poll_picker(&mut self) {
        let Some(picker) = &mut self.picker else {
            return;
        };
        let field = picker.field();
        match picker.poll() {
            PickerPoll::Pending => return,
            PickerPoll::Picked(path) => {
                self.set_value(field, path.to_string_lossy().to_string());
                if self.active_field() == Some(field) {
                    self.active = None;
                }
            }
            PickerPoll::Dismissed => debug!(?field, "file picker dismissed"),
            PickerPoll::Gone => debug!(?field, "file picker ended without a result"),
        }
        self.picker = None;
    }

    /// Validate the form and build the record to store.
    pub fn to_record(&self) -> Result<GameRecord, FormError> {
        if self.form.name.is_empty() {
            return Err(FormError::MissingName);
        }
        if self.form.executable_path.is_empty() {
            return Err(FormError::MissingExecutable);
        }
        let description = if self.form.description.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            self.form.description.clone()
        };
        let image_path = if self.form.image_path.is_empty() {
            launcher::extract_icon(&self.form.executable_path).unwrap_or_default()
        } else {
            self.form.image_path.clone()
        };
        Ok(GameRecord {
            name: self.form.name.clone(),
            description,
            executable_path: self.form.executable_path.clone(),
            image_path,
        })
    }
}

/// Exclusive sub-views of the admin panel.
#[derive(Debug)]
pub enum AdminView {
    List,
    EditForm(EditBuffer),
    DeleteConfirm(usize),
}

#[derive(Debug)]
pub struct AdminPanel {
    pub page: usize,
    /// Keyboard cursor in the list (absolute index).
    pub cursor: usize,
    pub view: AdminView,
}

impl Default for AdminPanel {
    fn default() -> Self {
        Self {
            page: 0,
            cursor: 0,
            view: AdminView::List,
        }
    }
}

impl AdminPanel {
    pub fn page_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = (self.page * GAMES_PER_PAGE).min(len);
        start..(start + GAMES_PER_PAGE).min(len)
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 0
    }

    pub fn has_next_page(&self, len: usize) -> bool {
        (self.page + 1) * GAMES_PER_PAGE < len
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(GAMES_PER_PAGE).max(1)
    }

    /// Move by whole pages; a page is reachable only if it has a row on it.
    pub fn change_page(&mut self, direction: isize, len: usize) {
        let target = self.page as isize + direction;
        if target >= 0 && (target as usize) * GAMES_PER_PAGE < len {
            self.page = target as usize;
            self.cursor = self.page * GAMES_PER_PAGE;
        }
    }

    /// Keep page and cursor valid after the collection shrank.
    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.min(self.page_count(len) - 1);
        self.cursor = self.cursor.min(len.saturating_sub(1));
        if !self.page_range(len).contains(&self.cursor) {
            self.cursor = self.page_range(len).start;
        }
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let target = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = target as usize;
        self.page = self.cursor / GAMES_PER_PAGE;
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        match &self.view {
            AdminView::EditForm(buffer) => Some(buffer),
            _ => None,
        }
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        match &mut self.view {
            AdminView::EditForm(buffer) => Some(buffer),
            _ => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.view, AdminView::EditForm(_)) {
            self.view = AdminView::List;
        }
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.view, AdminView::DeleteConfirm(_)) {
            self.view = AdminView::List;
        }
    }

    pub fn reset(&mut self) {
        self.view = AdminView::List;
    }
}
