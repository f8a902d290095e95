use crate::player::traits::{BackendStatus, PlayerBackend};
use anyhow::Result;

/// Stand-in used when no real backend is compiled in or configured.
/// Loads fail, so the UI reports the problem instead of hanging.
pub struct NullBackend;

impl PlayerBackend for NullBackend {
    fn load(&self, _locator: &str) -> Result<()> {
        anyhow::bail!("no player backend available")
    }
    fn pause(&self) -> Result<()> {
        Ok(())
    }
    fn resume(&self) -> Result<()> {
        Ok(())
    }
    fn stop(&self) -> Result<()> {
        Ok(())
    }
    fn seek(&self, _position_secs: f64) -> Result<()> {
        Ok(())
    }
    fn set_volume(&self, _volume: u8) -> Result<()> {
        Ok(())
    }
    fn status(&self) -> Result<BackendStatus> {
        Ok(BackendStatus::default())
    }
}
