use serde::{Deserialize, Deserializer, Serialize};

/// Description stored when the operator leaves the field empty.
pub const NO_DESCRIPTION: &str = "No description";

pub type Rgb = [u8; 3];

/// A game entry in the games file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub executable_path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_path: String,
}

/// Older files wrote `null` for a missing image.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Colour theme, every entry falls back to the stock arcade palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background_color: Rgb,
    pub button_color: Rgb,
    pub button_hover_color: Rgb,
    pub text_color: Rgb,
    pub header_color: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: [10, 10, 40],
            button_color: [80, 80, 200],
            button_hover_color: [120, 120, 255],
            text_color: [255, 255, 255],
            header_color: [255, 200, 0],
        }
    }
}

/// Top-level persisted launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub admin_password: String,
    pub exit_password: String,
    pub fullscreen: bool,
    pub resolution: [u32; 2],
    pub theme: Theme,
    /// Number of game cards visible at once on the main screen.
    pub games_per_screen: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_password: "admin123".into(),
            exit_password: "exit123".into(),
            fullscreen: true,
            resolution: [1920, 1080],
            theme: Theme::default(),
            games_per_screen: 3,
        }
    }
}

/// Which secret a password prompt checks, and where success leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPurpose {
    Admin,
    Exit,
}

impl PasswordPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            PasswordPurpose::Admin => "ADMIN ACCESS",
            PasswordPurpose::Exit => "EXIT LAUNCHER",
        }
    }
}

/// The active screen component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Admin,
    PasswordPrompt(PasswordPurpose),
}

/// Whether the edit form creates a record or replaces one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(usize),
}

/// One of the four inputs on the admin edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    ExecutablePath,
    ImagePath,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Description,
        FormField::ExecutablePath,
        FormField::ImagePath,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name:",
            FormField::Description => "Description:",
            FormField::ExecutablePath => "File Path:",
            FormField::ImagePath => "Image:",
        }
    }

    /// Path fields open the native file picker when activated.
    pub fn uses_picker(&self) -> bool {
        matches!(self, FormField::ExecutablePath | FormField::ImagePath)
    }

    pub fn next(&self) -> FormField {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> FormField {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A deferred action produced by a screen component and run by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenPassword(PasswordPurpose),
    /// Start the executable at this path.
    Launch(String),
    /// Scroll the main strip by one card, or the admin list by one page.
    ChangePage(isize),
    ExitAdmin,
    RequestEdit(EditTarget),
    RequestDeleteConfirm(usize),
    CommitDelete(usize),
    CancelDelete,
    ActivateField(FormField),
    CommitSave,
    CancelEdit,
    SubmitPassword,
    CancelPassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: Config = serde_json::from_str(
            r#"{"admin_password": "letmein", "theme": {"text_color": [1, 2, 3]}}"#,
        )
        .unwrap();
        assert_eq!(cfg.admin_password, "letmein");
        assert_eq!(cfg.exit_password, "exit123");
        assert!(cfg.fullscreen);
        assert_eq!(cfg.theme.text_color, [1, 2, 3]);
        assert_eq!(cfg.theme.header_color, [255, 200, 0]);
        assert_eq!(cfg.games_per_screen, 3);
    }

    #[test]
    fn game_record_accepts_null_image() {
        let game: GameRecord = serde_json::from_str(
            r#"{"name": "Pong", "description": "", "executable_path": "/bin/pong", "image_path": null}"#,
        )
        .unwrap();
        assert_eq!(game.image_path, "");
    }

    #[test]
    fn form_field_focus_wraps() {
        assert_eq!(FormField::ImagePath.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::ImagePath);
        assert!(FormField::ExecutablePath.uses_picker());
        assert!(!FormField::Description.uses_picker());
    }
}
