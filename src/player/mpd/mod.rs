use super::traits::{BackendStatus, PlayerBackend, PlayerState};
use anyhow::{Context, Result};
use mpd::{Client, Song, State};
use std::sync::Mutex;
use std::time::Duration;

/// Drives an MPD daemon as a single-track transport: every load replaces
/// the daemon's queue with the one stream URL.
pub struct MpdBackend {
    host: String,
    port: u16,
    client: Mutex<Option<Client>>,
}

impl MpdBackend {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            client: Mutex::new(None),
        }
    }

    fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Run `f` against a live connection, reconnecting first if the old one died.
    fn with_client<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Client) -> Result<T>,
    {
        let mut guard = self
            .client
            .lock()
            .map_err(|_| anyhow::anyhow!("MPD client mutex poisoned"))?;

        let alive = guard
            .as_mut()
            .map(|client| client.ping().is_ok())
            .unwrap_or(false);

        if !alive {
            let addr = self.addr();
            match Client::connect(&addr) {
                Ok(client) => {
                    tracing::info!(%addr, "connected to MPD");
                    *guard = Some(client);
                }
                Err(e) => {
                    *guard = None;
                    anyhow::bail!("Failed to connect to MPD at {}: {}", addr, e);
                }
            }
        }

        match guard.as_mut() {
            Some(client) => f(client),
            None => anyhow::bail!("No MPD connection"),
        }
    }
}

fn millis(d: Option<Duration>) -> u64 {
    d.map(|t| t.as_millis() as u64).unwrap_or(0)
}

impl PlayerBackend for MpdBackend {
    fn load(&self, locator: &str) -> Result<()> {
        self.with_client(|client| {
            client.clear().context("Failed to clear MPD queue")?;
            let song = Song {
                file: locator.to_string(),
                ..Default::default()
            };
            client.push(&song).context("MPD rejected the stream")?;
            client.play().context("Failed to start playback")
        })
    }

    fn pause(&self) -> Result<()> {
        self.with_client(|client| client.pause(true).context("Failed to pause"))
    }

    fn resume(&self) -> Result<()> {
        self.with_client(|client| client.pause(false).context("Failed to resume"))
    }

    fn stop(&self) -> Result<()> {
        self.with_client(|client| client.stop().context("Failed to stop"))
    }

    fn seek(&self, position_secs: f64) -> Result<()> {
        self.with_client(|client| {
            let song = client.currentsong()?.context("No song playing")?;
            let place = song.place.context("No song place")?;
            client
                .seek(place.id, position_secs.max(0.0))
                .context("Failed to seek")
        })
    }

    fn set_volume(&self, volume: u8) -> Result<()> {
        self.with_client(|client| {
            client
                .volume(volume.min(100) as i8)
                .context("Failed to set volume")
        })
    }

    fn status(&self) -> Result<BackendStatus> {
        self.with_client(|client| {
            let status = client.status().context("Failed to read MPD status")?;
            Ok(BackendStatus {
                state: match status.state {
                    State::Play => PlayerState::Playing,
                    State::Pause => PlayerState::Paused,
                    State::Stop => PlayerState::Stopped,
                },
                position_ms: millis(status.elapsed),
                duration_ms: millis(status.duration),
                // -1 when MPD has no mixer
                volume: (status.volume >= 0).then(|| status.volume as u8),
            })
        })
    }
}
