use crate::types::FormField;
use std::path::PathBuf;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Result of checking a pending file picker once per tick.
#[derive(Debug, PartialEq, Eq)]
pub enum PickerPoll {
    Pending,
    Picked(PathBuf),
    Dismissed,
    /// The picker task went away without answering.
    Gone,
}

/// A native file dialog running off the render thread.
///
/// The dialog task owns the sending half of a one-slot channel and is the
/// only writer; the frame loop drains the receiving half with `poll`.
#[derive(Debug)]
pub struct PickerHandle {
    field: FormField,
    rx: oneshot::Receiver<Option<PathBuf>>,
}

impl PickerHandle {
    /// Open the file dialog for `field` on a blocking worker.
    pub fn spawn(field: FormField) -> Self {
        let (tx, rx) = oneshot::channel();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || {
                    let picked = file_dialog(field).pick_file();
                    debug!(?field, ?picked, "file picker closed");
                    let _ = tx.send(picked);
                });
            }
            Err(e) => warn!("file picker unavailable: {}", e),
        }
        Self { field, rx }
    }

    #[cfg(test)]
    pub fn from_receiver(field: FormField, rx: oneshot::Receiver<Option<PathBuf>>) -> Self {
        Self { field, rx }
    }

    pub fn field(&self) -> FormField {
        self.field
    }

    pub fn poll(&mut self) -> PickerPoll {
        match self.rx.try_recv() {
            Ok(Some(path)) => PickerPoll::Picked(path),
            Ok(None) => PickerPoll::Dismissed,
            Err(oneshot::error::TryRecvError::Empty) => PickerPoll::Pending,
            Err(oneshot::error::TryRecvError::Closed) => PickerPoll::Gone,
        }
    }
}

fn file_dialog(field: FormField) -> rfd::FileDialog {
    match field {
        FormField::ImagePath => rfd::FileDialog::new()
            .set_title("Select Image")
            .add_filter("Image files", &["png", "jpg", "jpeg", "gif", "bmp", "webp"]),
        _ => executable_dialog(),
    }
}

#[cfg(windows)]
fn executable_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new()
        .set_title("Select Executable")
        .add_filter("Executable files", &["exe"])
        .add_filter("Batch files", &["bat", "cmd"])
}

// Unix executables rarely carry an extension, so no filter is applied.
#[cfg(not(windows))]
fn executable_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new().set_title("Select Executable")
}
