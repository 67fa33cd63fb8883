use crate::error::{LauncherError, Result};
use crate::types::Config;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Load the config from disk. A missing file is created with defaults; an
/// unreadable or malformed one falls back to defaults without touching it.
pub fn load_or_create(path: &Path) -> Config {
    if !path.exists() {
        info!(path = %path.display(), "config file not found, creating defaults");
        let config = Config::default();
        if let Err(e) = save_config(path, &config) {
            warn!("{}", e);
        }
        return config;
    }
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("{}", LauncherError::json(path, e));
            Config::default()
        }),
        Err(e) => {
            warn!("{}", LauncherError::io(path, e));
            Config::default()
        }
    }
}

/// Persist the config to disk.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LauncherError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|e| LauncherError::json(path, e))?;
    fs::write(path, json).map_err(|e| LauncherError::io(path, e))
}

/// Pixel size of the display hosting the terminal, if the terminal reports it.
pub fn probe_resolution() -> Option<[u32; 2]> {
    let size = crossterm::terminal::window_size().ok()?;
    if size.width == 0 || size.height == 0 {
        return None;
    }
    Some([u32::from(size.width), u32::from(size.height)])
}

/// Store a freshly probed resolution, writing the file only when it changed
/// (or always, when `force` is set). Returns whether the file was written.
pub fn refresh_resolution(
    path: &Path,
    config: &mut Config,
    probed: Option<[u32; 2]>,
    force: bool,
) -> Result<bool> {
    let changed = match probed {
        Some(resolution) if resolution != config.resolution => {
            config.resolution = resolution;
            true
        }
        _ => false,
    };
    if !changed && !force {
        return Ok(false);
    }
    save_config(path, config)?;
    info!(
        width = config.resolution[0],
        height = config.resolution[1],
        "updated config with display resolution"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = load_or_create(&path);
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded: Config =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn malformed_config_falls_back_without_overwriting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = load_or_create(&path);
        assert_eq!(config, Config::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn resolution_is_persisted_only_when_it_differs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = load_or_create(&path);

        assert!(!refresh_resolution(&path, &mut config, Some([1920, 1080]), false).unwrap());
        assert!(!refresh_resolution(&path, &mut config, None, false).unwrap());

        assert!(refresh_resolution(&path, &mut config, Some([2560, 1440]), false).unwrap());
        assert_eq!(config.resolution, [2560, 1440]);
        assert_eq!(load_or_create(&path).resolution, [2560, 1440]);
    }

    #[test]
    fn forced_refresh_rewrites_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"admin_password": "pw"}"#).unwrap();
        let mut config = load_or_create(&path);

        assert!(refresh_resolution(&path, &mut config, None, true).unwrap());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"exit_password\""));
        assert!(written.contains("\"pw\""));
    }
}
