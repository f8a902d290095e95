use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// Snapshot of the external player, as returned by a status poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendStatus {
    pub state: PlayerState,
    pub position_ms: u64,
    pub duration_ms: u64,
    /// Current Volume (0-100)
    pub volume: Option<u8>,
}

/// Blocking transport interface to an external media player.
///
/// Implementations are driven from the player worker only; every call may
/// block on I/O.
pub trait PlayerBackend: Send + Sync {
    /// Replace whatever is loaded with `locator` and start playing it.
    fn load(&self, locator: &str) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn resume(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
    fn seek(&self, position_secs: f64) -> Result<()>;
    fn set_volume(&self, volume: u8) -> Result<()>;
    fn status(&self) -> Result<BackendStatus>;
}
