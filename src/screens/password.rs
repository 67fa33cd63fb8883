/// Masked single-line password entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordDialog {
    input: String,
}

impl PasswordDialog {
    /// Reset the buffer for a fresh prompt.
    pub fn activate(&mut self) {
        self.input.clear();
    }

    pub fn add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn remove_char(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// What the operator sees: one `*` per typed character.
    pub fn masked(&self) -> String {
        "*".repeat(self.input.chars().count())
    }

    pub fn matches(&self, secret: &str) -> bool {
        self.input == secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_erasing() {
        let mut dialog = PasswordDialog::default();
        for c in "pässword".chars() {
            dialog.add_char(c);
        }
        dialog.remove_char();
        assert_eq!(dialog.input(), "pässwor");
        assert_eq!(dialog.masked(), "*******");
        assert!(dialog.matches("pässwor"));

        dialog.activate();
        assert_eq!(dialog.input(), "");
        dialog.remove_char();
        assert_eq!(dialog.masked(), "");
    }
}
