use crate::library::Track;

/// Tag carried by every command and event. Bumped by the bridge whenever a
/// command supersedes the current playback.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play { track: Track, locator: String },
    Pause,
    Resume,
    Stop,
    Seek(f64),
    SetVolume(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCommand {
    pub generation: Generation,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEventKind {
    Started(Track),
    Progress { position_ms: u64, duration_ms: u64 },
    Paused,
    Resumed,
    Stopped,
    Ended(Track),
    Error(String),
}

/// Lifecycle notification emitted by the player worker.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEvent {
    /// Generation of the command that caused this event.
    pub generation: Generation,
    pub kind: PlayerEventKind,
}

impl PlayerEvent {
    pub fn new(generation: Generation, kind: PlayerEventKind) -> Self {
        Self { generation, kind }
    }
}
