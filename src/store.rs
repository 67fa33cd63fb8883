use crate::error::{LauncherError, Result};
use crate::types::GameRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_GAMES_FILE: &str = "games.json";

/// On-disk layout of the games file. Entries are decoded one by one so a
/// single bad record does not cost the rest of the collection.
#[derive(Debug, Default, Deserialize)]
struct GamesFile {
    #[serde(default)]
    games: Vec<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Serialize)]
struct GamesFileRef<'a> {
    games: &'a [GameRecord],
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// The games file backing the launcher's collection.
///
/// Top-level keys other than `games` are kept and written back on save.
#[derive(Debug)]
pub struct GameStore {
    path: PathBuf,
    extra: Map<String, Value>,
    /// Problem found while loading, for the operator to see.
    load_notice: Option<String>,
}

impl GameStore {
    /// Open the store and read its collection. A missing or malformed file
    /// yields an empty collection; the file is only written on the next save.
    /// Entries that fail to decode are skipped and reported.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Vec<GameRecord>) {
        let path = path.into();
        let mut load_notice = None;
        let file = match read_games_file(&path) {
            Ok(Some(file)) => file,
            Ok(None) => {
                info!(path = %path.display(), "games file not found, starting empty");
                GamesFile::default()
            }
            Err(e) => {
                warn!("{}", e);
                load_notice = Some(format!(
                    "Could not read {}, starting with no games",
                    path.display()
                ));
                GamesFile::default()
            }
        };

        let mut games = Vec::with_capacity(file.games.len());
        let mut skipped = 0;
        for (index, entry) in file.games.into_iter().enumerate() {
            match serde_json::from_value::<GameRecord>(entry) {
                Ok(game) => games.push(game),
                Err(e) => {
                    warn!(path = %path.display(), index, "skipping game entry: {}", e);
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            load_notice = Some(format!(
                "Skipped {} invalid game entr{} in {}",
                skipped,
                if skipped == 1 { "y" } else { "ies" },
                path.display()
            ));
        }

        info!(path = %path.display(), count = games.len(), skipped, "loaded games");
        (
            Self {
                path,
                extra: file.extra,
                load_notice,
            },
            games,
        )
    }

    pub fn load_notice(&self) -> Option<&str> {
        self.load_notice.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the games file with the full collection.
    pub fn save(&self, games: &[GameRecord]) -> Result<()> {
        let doc = GamesFileRef {
            games,
            extra: &self.extra,
        };
        let json =
            serde_json::to_string_pretty(&doc).map_err(|e| LauncherError::json(&self.path, e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LauncherError::io(parent, e))?;
        }
        fs::write(&self.path, json).map_err(|e| LauncherError::io(&self.path, e))
    }
}

fn read_games_file(path: &Path) -> Result<Option<GamesFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|e| LauncherError::io(path, e))?;
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| LauncherError::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn game(name: &str) -> GameRecord {
        GameRecord {
            name: name.into(),
            description: format!("{} description", name),
            executable_path: format!("/games/{}", name),
            image_path: String::new(),
        }
    }

    #[test]
    fn missing_file_opens_empty_and_is_not_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        let (store, games) = GameStore::open(&path);
        assert!(games.is_empty());
        assert!(!path.exists());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn save_then_open_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        let (store, _) = GameStore::open(&path);
        store.save(&[game("b"), game("a"), game("c")]).unwrap();

        let (_, games) = GameStore::open(&path);
        let names: Vec<_> = games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn unknown_top_level_keys_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        fs::write(
            &path,
            r#"{"version": 2, "games": [{"name": "A", "description": "x", "executable_path": "/a", "image_path": ""}]}"#,
        )
        .unwrap();

        let (store, mut games) = GameStore::open(&path);
        games.clear();
        store.save(&games).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"version": 2, "games": []}));
    }

    #[test]
    fn malformed_file_opens_empty_with_notice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        fs::write(&path, "[1, 2").unwrap();
        let (store, games) = GameStore::open(&path);
        assert!(games.is_empty());
        assert!(store.load_notice().unwrap().starts_with("Could not read"));
    }

    #[test]
    fn bad_entry_is_skipped_and_the_rest_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        fs::write(
            &path,
            r#"{"games": [
                {"name": "Pong", "description": "Paddles", "executable_path": "/bin/pong", "image_path": ""},
                {"name": "Broken", "description": "no exe key"},
                {"name": "Tetris", "executable_path": "/bin/tetris"}
            ]}"#,
        )
        .unwrap();

        let (store, games) = GameStore::open(&path);
        let names: Vec<_> = games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Pong", "Tetris"]);
        assert_eq!(games[1].description, "");
        assert_eq!(
            store.load_notice(),
            Some(format!("Skipped 1 invalid game entry in {}", path.display()).as_str())
        );

        // Saving keeps the good records.
        store.save(&games).unwrap();
        let (_, reloaded) = GameStore::open(&path);
        assert_eq!(reloaded, games);
    }

    #[test]
    fn clean_file_has_no_notice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        let (store, _) = GameStore::open(&path);
        store.save(&[game("a")]).unwrap();
        let (store, _) = GameStore::open(&path);
        assert_eq!(store.load_notice(), None);
    }

    #[test]
    fn save_into_missing_directory_creates_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("games.json");
        let (store, _) = GameStore::open(&path);
        store.save(&[game("a")]).unwrap();
        assert!(path.exists());
    }
}
