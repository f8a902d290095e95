use crate::app::keys::KeyConfig;
use crate::app::queue::EnqueuePolicy;
use serde::{Deserialize, Serialize};

/// User-editable configuration (ReadOnly by App after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub enqueue_policy: EnqueuePolicy,
    #[serde(default)]
    pub keys: KeyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:4533".to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// `mpd` or `none`
    pub backend: String,
    pub mpd_host: String,
    pub mpd_port: u16,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            backend: "mpd".to_string(),
            mpd_host: "localhost".to_string(),
            mpd_port: 6600,
        }
    }
}
