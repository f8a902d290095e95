//! Player worker: owns the backend on its own task, executes commands and
//! turns status polls into lifecycle events.

use super::events::{Command, Generation, PlayerCommand, PlayerEvent, PlayerEventKind};
use super::traits::{PlayerBackend, PlayerState};
use crate::library::Track;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const EVENT_CHANNEL_CAPACITY: usize = 5;
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

// Polls with nothing playing after a load before we give up on it.
const MAX_START_POLLS: u32 = 40;

/// Command side of the player, held by the bridge.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl PlayerHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PlayerCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Fire-and-forget: failures come back as `Error` events.
    pub fn send(&self, generation: Generation, command: Command) {
        tracing::info!(generation, command = command_name(&command), "player command");
        if self.tx.send(PlayerCommand { generation, command }).is_err() {
            tracing::warn!("player worker is gone, command dropped");
        }
    }
}

// Locators carry auth tokens, keep them out of the log.
fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Play { .. } => "play",
        Command::Pause => "pause",
        Command::Resume => "resume",
        Command::Stop => "stop",
        Command::Seek(_) => "seek",
        Command::SetVolume(_) => "set_volume",
    }
}

pub struct PlayerAdapter;

impl PlayerAdapter {
    pub fn spawn(
        backend: Arc<dyn PlayerBackend>,
    ) -> (PlayerHandle, mpsc::Receiver<PlayerEvent>, JoinHandle<()>) {
        Self::spawn_with_interval(backend, POLL_INTERVAL)
    }

    pub fn spawn_with_interval(
        backend: Arc<dyn PlayerBackend>,
        interval: Duration,
    ) -> (PlayerHandle, mpsc::Receiver<PlayerEvent>, JoinHandle<()>) {
        let (handle, commands) = PlayerHandle::channel();
        let (events, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let worker = Worker {
            backend,
            events,
            loaded: None,
        };
        let join = tokio::spawn(worker.run(commands, interval));
        (handle, events_rx, join)
    }
}

struct Loaded {
    track: Track,
    generation: Generation,
    state: PlayerState,
    seen_playing: bool,
    idle_polls: u32,
    last_position: Option<u64>,
}

struct Worker {
    backend: Arc<dyn PlayerBackend>,
    events: mpsc::Sender<PlayerEvent>,
    loaded: Option<Loaded>,
}

impl Worker {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<PlayerCommand>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!("player worker started");

        loop {
            let alive = tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(cmd) => self.execute(cmd).await,
                    None => false,
                },
                _ = ticker.tick() => self.poll().await,
            };
            if !alive {
                break;
            }
        }

        tracing::info!("player worker stopped");
    }

    /// Waits while the channel is full; returns false once the bridge is gone.
    async fn emit(&self, generation: Generation, kind: PlayerEventKind) -> bool {
        self.events
            .send(PlayerEvent::new(generation, kind))
            .await
            .is_ok()
    }

    async fn call<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn PlayerBackend) -> Result<T> + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || f(backend.as_ref()))
            .await
            .context("player backend task failed")?
    }

    async fn execute(&mut self, cmd: PlayerCommand) -> bool {
        let PlayerCommand {
            generation,
            command,
        } = cmd;

        match command {
            Command::Play { track, locator } => {
                // Superseded before the load so the old track can never report Ended.
                self.loaded = None;
                match self.call(move |b| b.load(&locator)).await {
                    Ok(()) => {
                        self.loaded = Some(Loaded {
                            track: track.clone(),
                            generation,
                            state: PlayerState::Playing,
                            seen_playing: false,
                            idle_polls: 0,
                            last_position: None,
                        });
                        self.emit(generation, PlayerEventKind::Started(track)).await
                    }
                    Err(e) => self.fail(generation, e).await,
                }
            }
            Command::Pause => self.transport(generation, PlayerState::Paused).await,
            Command::Resume => self.transport(generation, PlayerState::Playing).await,
            Command::Stop => {
                self.loaded = None;
                match self.call(|b| b.stop()).await {
                    Ok(()) => self.emit(generation, PlayerEventKind::Stopped).await,
                    Err(e) => self.fail(generation, e).await,
                }
            }
            Command::Seek(secs) => {
                if self.loaded.is_none() {
                    return true;
                }
                match self.call(move |b| b.seek(secs)).await {
                    Ok(()) => true,
                    Err(e) => self.fail(generation, e).await,
                }
            }
            Command::SetVolume(volume) => match self.call(move |b| b.set_volume(volume)).await {
                Ok(()) => true,
                Err(e) => self.fail(generation, e).await,
            },
        }
    }

    async fn fail(&self, generation: Generation, err: anyhow::Error) -> bool {
        tracing::warn!(generation, "player error: {:#}", err);
        self.emit(generation, PlayerEventKind::Error(format!("{:#}", err)))
            .await
    }

    async fn transport(&mut self, generation: Generation, target: PlayerState) -> bool {
        if self.loaded.is_none() {
            return true;
        }
        let result = if target == PlayerState::Paused {
            self.call(|b| b.pause()).await
        } else {
            self.call(|b| b.resume()).await
        };

        match result {
            Ok(()) => {
                if let Some(loaded) = self.loaded.as_mut() {
                    loaded.state = target;
                }
                let kind = if target == PlayerState::Paused {
                    PlayerEventKind::Paused
                } else {
                    PlayerEventKind::Resumed
                };
                self.emit(generation, kind).await
            }
            Err(e) => self.fail(generation, e).await,
        }
    }

    async fn poll(&mut self) -> bool {
        let Some(generation) = self.loaded.as_ref().map(|l| l.generation) else {
            return true;
        };

        let status = match self.call(|b| b.status()).await {
            Ok(status) => status,
            Err(e) => {
                self.loaded = None;
                return self.fail(generation, e).await;
            }
        };

        let Some(loaded) = self.loaded.as_mut() else {
            return true;
        };

        match status.state {
            PlayerState::Stopped if loaded.seen_playing => {
                let track = loaded.track.clone();
                self.loaded = None;
                self.emit(generation, PlayerEventKind::Ended(track)).await
            }
            PlayerState::Stopped => {
                loaded.idle_polls += 1;
                if loaded.idle_polls < MAX_START_POLLS {
                    return true;
                }
                self.loaded = None;
                self.emit(
                    generation,
                    PlayerEventKind::Error("player never started playback".into()),
                )
                .await
            }
            state => {
                loaded.seen_playing = true;
                let mut pending = Vec::new();
                if state != loaded.state {
                    // Changed outside of our commands (e.g. another client).
                    loaded.state = state;
                    pending.push(if state == PlayerState::Paused {
                        PlayerEventKind::Paused
                    } else {
                        PlayerEventKind::Resumed
                    });
                }
                if loaded.last_position != Some(status.position_ms) {
                    loaded.last_position = Some(status.position_ms);
                    pending.push(PlayerEventKind::Progress {
                        position_ms: status.position_ms,
                        duration_ms: status.duration_ms,
                    });
                }
                for kind in pending {
                    if !self.emit(generation, kind).await {
                        return false;
                    }
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::traits::BackendStatus;
    use std::sync::Mutex;
    use tokio::time::timeout;

    #[derive(Default)]
    struct FakeBackend {
        status: Mutex<BackendStatus>,
        calls: Mutex<Vec<String>>,
        fail_load: bool,
    }

    impl FakeBackend {
        fn set_state(&self, state: PlayerState, position_ms: u64) {
            let mut status = self.status.lock().unwrap();
            status.state = state;
            status.position_ms = position_ms;
            status.duration_ms = 200_000;
        }
    }

    impl PlayerBackend for FakeBackend {
        fn load(&self, locator: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("load {}", locator));
            if self.fail_load {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }
        fn pause(&self) -> Result<()> {
            self.calls.lock().unwrap().push("pause".into());
            Ok(())
        }
        fn resume(&self) -> Result<()> {
            self.calls.lock().unwrap().push("resume".into());
            Ok(())
        }
        fn stop(&self) -> Result<()> {
            self.calls.lock().unwrap().push("stop".into());
            Ok(())
        }
        fn seek(&self, _position_secs: f64) -> Result<()> {
            Ok(())
        }
        fn set_volume(&self, _volume: u8) -> Result<()> {
            Ok(())
        }
        fn status(&self) -> Result<BackendStatus> {
            Ok(self.status.lock().unwrap().clone())
        }
    }

    fn track(id: &str) -> Track {
        Track {
            id: id.into(),
            title: format!("Song {}", id),
            artist: "Artist".into(),
            album: "Album".into(),
            duration_ms: 200_000,
            locator: format!("mem://{}", id),
        }
    }

    fn play(handle: &PlayerHandle, generation: Generation, id: &str) {
        let t = track(id);
        handle.send(
            generation,
            Command::Play {
                locator: t.locator.clone(),
                track: t,
            },
        );
    }

    async fn next_event(rx: &mut mpsc::Receiver<PlayerEvent>) -> PlayerEvent {
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for player event")
            .expect("player worker stopped")
    }

    async fn assert_quiet(rx: &mut mpsc::Receiver<PlayerEvent>) {
        assert!(timeout(Duration::from_millis(60), rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_natural_finish_emits_single_ended() {
        let backend = Arc::new(FakeBackend::default());
        backend.set_state(PlayerState::Playing, 1_000);
        let (handle, mut rx, _join) =
            PlayerAdapter::spawn_with_interval(backend.clone(), Duration::from_millis(5));

        play(&handle, 3, "a");
        assert_eq!(
            next_event(&mut rx).await,
            PlayerEvent::new(3, PlayerEventKind::Started(track("a")))
        );
        assert_eq!(
            next_event(&mut rx).await.kind,
            PlayerEventKind::Progress {
                position_ms: 1_000,
                duration_ms: 200_000
            }
        );

        backend.set_state(PlayerState::Stopped, 0);
        assert_eq!(
            next_event(&mut rx).await,
            PlayerEvent::new(3, PlayerEventKind::Ended(track("a")))
        );
        assert_quiet(&mut rx).await;
    }

    #[tokio::test]
    async fn test_stop_suppresses_ended() {
        let backend = Arc::new(FakeBackend::default());
        backend.set_state(PlayerState::Playing, 0);
        let (handle, mut rx, _join) =
            PlayerAdapter::spawn_with_interval(backend.clone(), Duration::from_millis(5));

        play(&handle, 1, "a");
        assert!(matches!(next_event(&mut rx).await.kind, PlayerEventKind::Started(_)));
        assert!(matches!(next_event(&mut rx).await.kind, PlayerEventKind::Progress { .. }));

        handle.send(2, Command::Stop);
        backend.set_state(PlayerState::Stopped, 0);
        assert_eq!(next_event(&mut rx).await, PlayerEvent::new(2, PlayerEventKind::Stopped));
        assert_quiet(&mut rx).await;
        assert!(backend.calls.lock().unwrap().contains(&"stop".to_string()));
    }

    #[tokio::test]
    async fn test_pause_and_resume_follow_commands() {
        let backend = Arc::new(FakeBackend::default());
        backend.set_state(PlayerState::Playing, 500);
        let (handle, mut rx, _join) =
            PlayerAdapter::spawn_with_interval(backend.clone(), Duration::from_secs(3600));

        play(&handle, 1, "a");
        next_event(&mut rx).await;
        // first tick of the interval fires immediately, skip its progress if any
        handle.send(1, Command::Pause);
        let mut kinds = Vec::new();
        while kinds.last() != Some(&PlayerEventKind::Paused) {
            kinds.push(next_event(&mut rx).await.kind);
        }
        handle.send(1, Command::Resume);
        assert_eq!(next_event(&mut rx).await.kind, PlayerEventKind::Resumed);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported_as_event() {
        let backend = Arc::new(FakeBackend {
            fail_load: true,
            ..Default::default()
        });
        let (handle, mut rx, _join) =
            PlayerAdapter::spawn_with_interval(backend, Duration::from_millis(5));

        play(&handle, 7, "a");
        let event = next_event(&mut rx).await;
        assert_eq!(event.generation, 7);
        match event.kind {
            PlayerEventKind::Error(message) => assert!(message.contains("connection refused")),
            other => panic!("expected error, got {:?}", other),
        }
        assert_quiet(&mut rx).await;
    }
}
