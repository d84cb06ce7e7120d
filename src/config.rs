use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::game::GameSettings;
use crate::session::DEFAULT_PAUSE_TICKS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub pause_ticks: u32,
    pub shuffle: bool,
    pub categories: Vec<String>,
    pub catalog: Option<PathBuf>,
    pub key_up_submit_keys: Vec<String>,
    pub quit_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pause_ticks: DEFAULT_PAUSE_TICKS,
            shuffle: false,
            categories: Vec::new(),
            catalog: None,
            key_up_submit_keys: Vec::new(),
            quit_key: "Escape".to_string(),
        }
    }
}

impl From<&Config> for GameSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            pause_ticks: cfg.pause_ticks,
            key_up_submit_keys: cfg.key_up_submit_keys.clone(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("keydrill_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable files fall back to the defaults.
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("ignoring config {}: {e}", self.path.display()),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            pause_ticks: 4,
            shuffle: true,
            categories: vec!["Browser".into()],
            catalog: Some(PathBuf::from("/tmp/hotkeys.csv")),
            key_up_submit_keys: vec!["F12".into()],
            quit_key: "F10".into(),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_into_a_file_path_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();

        let store = FileConfigStore::with_path(blocker.join("config.json"));
        assert!(matches!(store.save(&Config::default()), Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "shuffle": true }"#).unwrap();

        let loaded = FileConfigStore::with_path(&path).load();
        assert!(loaded.shuffle);
        assert_eq!(loaded.pause_ticks, DEFAULT_PAUSE_TICKS);
        assert_eq!(loaded.quit_key, "Escape");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn game_settings_follow_config() {
        let cfg = Config {
            pause_ticks: 5,
            key_up_submit_keys: vec!["F12".into()],
            ..Default::default()
        };
        let settings = GameSettings::from(&cfg);
        assert_eq!(settings.pause_ticks, 5);
        assert_eq!(settings.key_up_submit_keys, vec!["F12".to_string()]);
    }
}
