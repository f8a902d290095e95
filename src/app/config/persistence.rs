use serde::{Deserialize, Serialize};
use std::fs;

/// Automatically saved session state
/// stored in `state.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_volume() -> u8 {
    50
}

impl Default for PersistentState {
    fn default() -> Self {
        Self {
            volume: default_volume(),
        }
    }
}

impl PersistentState {
    pub fn save(&self) {
        let path = super::AppConfig::get_state_path();
        match toml::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    tracing::warn!("could not save {}: {}", path.display(), e);
                }
            }
            Err(e) => tracing::warn!("could not serialize state: {}", e),
        }
    }
}
