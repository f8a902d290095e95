use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub mod persistence;
pub mod user;

pub use persistence::PersistentState;
pub use user::{PlayerConfig, ServerConfig, UserConfig};

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("quaver");

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_state_path() -> PathBuf {
        Self::get_config_dir().join("state.toml")
    }

    /// Load both files. A missing config.toml is written out with defaults;
    /// an unreadable one falls back to defaults with a warning.
    pub fn load() -> (UserConfig, PersistentState) {
        let config_path = Self::get_config_path();
        let user_config = if config_path.exists() {
            read_or_default(&config_path)
        } else {
            let c = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&c) {
                let _ = fs::write(&config_path, content);
            }
            c
        };

        let state_path = Self::get_state_path();
        let state = if state_path.exists() {
            read_or_default(&state_path)
        } else {
            PersistentState::default()
        };

        (user_config, state)
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
    match parsed {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("ignoring {}: {}", path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_or_default_falls_back_on_garbage() {
        let path = std::env::temp_dir().join(format!("quaver-state-{}.toml", std::process::id()));
        fs::write(&path, "volume = \"loud\"").unwrap();
        let state: PersistentState = read_or_default(&path);
        assert_eq!(state, PersistentState::default());

        fs::write(&path, "volume = 80").unwrap();
        let state: PersistentState = read_or_default(&path);
        assert_eq!(state.volume, 80);
        let _ = fs::remove_file(&path);
    }
}
