pub mod adapter;
pub mod events;
pub mod generic;
#[cfg(feature = "mpd")]
pub mod mpd;
pub mod traits;

pub use adapter::{PlayerAdapter, PlayerHandle, EVENT_CHANNEL_CAPACITY, POLL_INTERVAL};
pub use events::{Command, Generation, PlayerCommand, PlayerEvent, PlayerEventKind};
pub use generic::NullBackend;
#[cfg(feature = "mpd")]
pub use mpd::MpdBackend;
pub use traits::{BackendStatus, PlayerBackend, PlayerState};

use crate::app::config::user::PlayerConfig;
use std::sync::Arc;

/// Factory for the configured backend.
pub fn get_backend(config: &PlayerConfig) -> Arc<dyn PlayerBackend> {
    #[cfg(feature = "mpd")]
    {
        if config.backend == "mpd" {
            return Arc::new(MpdBackend::new(config.mpd_host.clone(), config.mpd_port));
        }
    }
    tracing::warn!(backend = %config.backend, "unknown or disabled player backend, playback unavailable");
    Arc::new(NullBackend)
}
