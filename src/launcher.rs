use crate::error::{LauncherError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// xterm window-manipulation sequence that iconifies the terminal window.
pub const ICONIFY_SEQUENCE: &str = "\x1b[2t";

/// Start a game executable as a detached child process.
///
/// No arguments are passed and no output is captured. The launcher does not
/// wait for the game; a background thread reaps it when it exits.
pub fn spawn_game(executable_path: &str) -> Result<u32> {
    let exe = Path::new(executable_path);
    if !exe.exists() {
        return Err(LauncherError::MissingExecutable(exe.to_path_buf()));
    }

    let mut cmd = Command::new(exe);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut cmd);

    let mut child = cmd.spawn().map_err(|source| LauncherError::Spawn {
        path: exe.to_path_buf(),
        source,
    })?;
    let pid = child.id();
    info!(pid, path = %exe.display(), "game started");

    std::thread::spawn(move || match child.wait() {
        Ok(status) => debug!(pid, %status, "game exited"),
        Err(e) => debug!(pid, "failed to wait on game: {}", e),
    });

    Ok(pid)
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows_sys::Win32::System::Threading::{CREATE_NEW_PROCESS_GROUP, DETACHED_PROCESS};
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

/// Look for an icon to show for an executable that has no image set.
///
/// Icon extraction is not supported yet, so this always comes back empty.
pub fn extract_icon(executable_path: &str) -> Option<String> {
    debug!(path = executable_path, "icon extraction requested but not available");
    None
}
