//! The single consumer of player events and user input. Everything that
//! mutates the queue, the pages or the generation counter goes through here.

use super::events::AppEvent;
use super::inputs;
use super::pages::{Modal, Page};
use super::queue::EnqueuePolicy;
use super::state::App;
use super::state::ui::clamp_cursor;
use crate::error::LibraryError;
use crate::library::{flatten_indexes, DirectoryNode, Entry, NavigationCache, RemoteLibrary, Track};
use crate::player::{Command, Generation, PlayerEvent, PlayerEventKind, PlayerHandle, PlayerState};
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc;

pub const VOLUME_STEP: i16 = 5;
pub const SEEK_STEP_SECS: f64 = 10.0;

/// Everything the user can ask for, already resolved from key presses.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Enqueue(Track),
    EnqueueDirectory(String),
    EnqueuePlaylist(String),
    RemoveAt(usize),
    PlaySelected(usize),
    /// Append and start playing right away.
    PlayTrack(Track),
    ClearQueue,
    Next,
    Previous,
    Stop,
    TogglePause,
    SeekRelative(f64),
    ChangeVolume(i16),

    SwitchPage(Page),
    PushModal(Modal),
    PopModal,

    OpenArtist(usize),
    /// Move the artist cursor and show that artist without leaving the list.
    PreviewArtist(usize),
    OpenDirectory(String),
    RefreshArtist,
    RefreshIndexes,
    RefreshPlaylists,
    ToggleStar(String),

    CreatePlaylist(String),
    DeletePlaylist(String),
    AddToPlaylist { playlist_id: String, entry: Entry },

    Quit,
}

enum Work {
    Dir(String),
    Track(Track),
}

// Remote calls are synchronous. On the multi-threaded runtime we tell the
// scheduler so the player worker keeps running meanwhile.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

pub struct EventBridge {
    app: App,
    generation: Generation,
    applied: u64,
    player: PlayerHandle,
    library: Arc<dyn RemoteLibrary>,
    cache: NavigationCache,
    policy: EnqueuePolicy,
}

impl EventBridge {
    pub fn new(
        app: App,
        player: PlayerHandle,
        library: Arc<dyn RemoteLibrary>,
        policy: EnqueuePolicy,
    ) -> Self {
        Self {
            app,
            generation: 0,
            applied: 0,
            player,
            library,
            cache: NavigationCache::new(),
            policy,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn into_app(self) -> App {
        self.app
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Player events applied so far; stale ones are not counted.
    pub fn applied_events(&self) -> u64 {
        self.applied
    }

    pub fn cache(&self) -> &NavigationCache {
        &self.cache
    }

    /// Initial library state: artist index and playlists.
    pub fn bootstrap(&mut self) {
        self.load_indexes();
        self.load_starred();
        self.dispatch(Action::RefreshPlaylists);
    }

    /// Main loop: redraw, wait for the next input, apply it. Returns when
    /// the user quits or the terminal side goes away.
    pub async fn run<F>(
        &mut self,
        mut player_events: mpsc::Receiver<PlayerEvent>,
        mut ui_events: mpsc::Receiver<AppEvent>,
        mut redraw: F,
    ) -> anyhow::Result<()>
    where
        F: FnMut(&App) -> anyhow::Result<()>,
    {
        let mut player_alive = true;

        while self.app.is_running {
            redraw(&self.app)?;

            tokio::select! {
                event = player_events.recv(), if player_alive => match event {
                    Some(event) => self.apply_event(event),
                    None => {
                        player_alive = false;
                        self.app.error("Player worker exited");
                    }
                },
                event = ui_events.recv() => match event {
                    Some(AppEvent::Input(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)
                    }
                    Some(AppEvent::Input(_)) => {}
                    Some(AppEvent::Tick) => self.app.tick(),
                    None => break,
                },
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = inputs::handle_key(&mut self.app, key) {
            self.dispatch(action);
        }
    }

    fn bump(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    fn go_idle(&mut self) {
        self.app.now_playing = None;
        self.app.transport = PlayerState::Stopped;
        self.app.position_ms = 0;
        self.app.duration_ms = 0;
    }

    /// Apply one player event. Events from a superseded generation are dropped.
    pub fn apply_event(&mut self, event: PlayerEvent) {
        if event.generation != self.generation {
            tracing::debug!(
                event_generation = event.generation,
                current = self.generation,
                "dropping stale player event"
            );
            return;
        }
        self.applied += 1;

        match event.kind {
            PlayerEventKind::Started(track) => {
                self.app.position_ms = 0;
                self.app.duration_ms = track.duration_ms;
                self.app.transport = PlayerState::Playing;
                self.app.now_playing = Some(track);
            }
            PlayerEventKind::Progress {
                position_ms,
                duration_ms,
            } => {
                self.app.position_ms = position_ms;
                if duration_ms > 0 {
                    self.app.duration_ms = duration_ms;
                }
            }
            PlayerEventKind::Paused => self.app.transport = PlayerState::Paused,
            PlayerEventKind::Resumed => self.app.transport = PlayerState::Playing,
            PlayerEventKind::Ended(track) => {
                tracing::debug!(id = %track.id, "track finished");
                match self.app.queue.advance(1).cloned() {
                    Some(next) => self.start(next),
                    None => self.go_idle(),
                }
            }
            PlayerEventKind::Stopped => {
                self.app.queue.clear_current();
                self.go_idle();
            }
            PlayerEventKind::Error(message) => {
                self.app.error(&format!("Player: {}", message));
                self.app.transport = PlayerState::Stopped;
            }
        }
    }

    /// Send `Play` for the queue's current entry under a fresh generation.
    fn start(&mut self, track: Track) {
        let generation = self.bump();
        self.app.position_ms = 0;
        self.player.send(
            generation,
            Command::Play {
                locator: track.locator.clone(),
                track,
            },
        );
    }

    fn play_index(&mut self, index: usize) {
        match self.app.queue.set_current(Some(index)) {
            Ok(()) => {
                if let Some(track) = self.app.queue.current_track().cloned() {
                    self.start(track);
                }
            }
            Err(e) => tracing::debug!("ignoring play request: {}", e),
        }
    }

    fn stop(&mut self) {
        let generation = self.bump();
        self.player.send(generation, Command::Stop);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");
        match action {
            Action::Enqueue(track) => {
                let title = track.title.clone();
                self.app.queue.enqueue(track);
                self.app.show_toast(&format!("Queued {}", title), false);
            }
            Action::EnqueueDirectory(id) => match self.expand_directory(&id) {
                Ok(tracks) => self.enqueue_batch(tracks),
                Err(e) => self.app.error(&format!("Could not load directory: {}", e)),
            },
            Action::EnqueuePlaylist(id) => {
                let library = Arc::clone(&self.library);
                match blocking(|| library.get_playlist(&id)) {
                    Ok(tracks) => self.enqueue_batch(tracks),
                    Err(e) => self.app.error(&format!("Could not load playlist: {}", e)),
                }
            }
            Action::RemoveAt(index) => {
                let was_current = self.app.queue.current_index() == Some(index);
                match self.app.queue.remove_at(index) {
                    Ok(_) => {
                        if was_current {
                            self.stop();
                        }
                        self.app.queue_selected =
                            clamp_cursor(self.app.queue_selected, self.app.queue.len());
                    }
                    Err(e) => tracing::debug!("ignoring remove: {}", e),
                }
            }
            Action::PlaySelected(index) => self.play_index(index),
            Action::PlayTrack(track) => {
                self.app.queue.enqueue(track);
                self.play_index(self.app.queue.len() - 1);
            }
            Action::ClearQueue => {
                self.stop();
                self.app.queue.clear();
                self.app.queue_selected = 0;
                self.go_idle();
            }
            Action::Next => {
                let target = self.app.queue.current_index().map_or(0, |c| c + 1);
                if target < self.app.queue.len() {
                    self.play_index(target);
                } else if self.app.queue.current_index().is_some() {
                    self.stop();
                }
            }
            Action::Previous => {
                if !self.app.queue.is_empty() {
                    let target = self
                        .app
                        .queue
                        .current_index()
                        .map_or(0, |c| c.saturating_sub(1));
                    self.play_index(target);
                }
            }
            Action::Stop => self.stop(),
            Action::TogglePause => match self.app.transport {
                PlayerState::Playing => self.player.send(self.generation, Command::Pause),
                PlayerState::Paused => self.player.send(self.generation, Command::Resume),
                PlayerState::Stopped => {
                    if !self.app.queue.is_empty() {
                        let index = self.app.queue.current_index().unwrap_or(0);
                        self.play_index(index);
                    }
                }
            },
            Action::SeekRelative(delta) => {
                if self.app.now_playing.is_some() {
                    let max = self.app.duration_ms as f64 / 1000.0;
                    let target = (self.app.position_ms as f64 / 1000.0 + delta).clamp(0.0, max);
                    self.player.send(self.generation, Command::Seek(target));
                }
            }
            Action::ChangeVolume(delta) => {
                let volume = (self.app.volume as i16 + delta).clamp(0, 100) as u8;
                if volume != self.app.volume {
                    self.app.volume = volume;
                    self.player.send(self.generation, Command::SetVolume(volume));
                }
            }

            Action::SwitchPage(page) => {
                if let Err(e) = self.app.pages.switch_page(page) {
                    tracing::debug!("page switch refused: {}", e);
                }
            }
            Action::PushModal(Modal::AddToPlaylist) if self.app.playlists.is_empty() => {
                self.app
                    .show_message("No playlists available. Create one first.");
            }
            Action::PushModal(modal) => {
                match modal {
                    Modal::AddToPlaylist => self.app.add_to_playlist_selected = 0,
                    Modal::NewPlaylist => self.app.input.clear(),
                    _ => {}
                }
                self.app.pages.push_modal(modal);
            }
            Action::PopModal => {
                if let Err(e) = self.app.pages.pop_modal() {
                    tracing::debug!("{}", e);
                }
            }

            Action::OpenArtist(index) => {
                if let Some(artist) = self.app.browser.artists.get(index).cloned() {
                    self.app.browser.artist_selected = index;
                    match self.fetch_directory(&artist.id) {
                        Ok(node) => self.app.browser.show_directory(node),
                        Err(e) => self
                            .app
                            .error(&format!("Could not load {}: {}", artist.name, e)),
                    }
                }
            }
            Action::PreviewArtist(index) => {
                if let Some(artist) = self.app.browser.artists.get(index).cloned() {
                    self.app.browser.artist_selected = index;
                    match self.fetch_directory(&artist.id) {
                        Ok(node) => self.app.browser.preview_directory(node),
                        Err(e) => self
                            .app
                            .error(&format!("Could not load {}: {}", artist.name, e)),
                    }
                }
            }
            Action::OpenDirectory(id) => match self.fetch_directory(&id) {
                Ok(node) => self.app.browser.show_directory(node),
                Err(e) => self.app.error(&format!("Could not load directory: {}", e)),
            },
            Action::RefreshArtist => {
                if let Some(artist) = self.app.browser.selected_artist().cloned() {
                    self.cache.invalidate(&artist.id);
                    let showing_artist = self
                        .app
                        .browser
                        .directory
                        .as_ref()
                        .is_some_and(|d| d.id == artist.id);
                    match self.fetch_directory(&artist.id) {
                        Ok(node) if showing_artist => self.app.browser.reload_directory(node),
                        Ok(node) => self.app.browser.show_directory(node),
                        Err(e) => self
                            .app
                            .error(&format!("Could not refresh {}: {}", artist.name, e)),
                    }
                }
            }
            Action::RefreshIndexes => {
                if self.load_indexes() {
                    self.cache.invalidate_all();
                    self.app.notify("Library refreshed");
                }
            }
            Action::RefreshPlaylists => {
                let library = Arc::clone(&self.library);
                match blocking(|| library.get_playlists()) {
                    Ok(playlists) => {
                        self.app.playlists = playlists;
                        self.app.playlist_selected =
                            clamp_cursor(self.app.playlist_selected, self.app.playlists.len());
                    }
                    Err(e) => self.app.error(&format!("Could not load playlists: {}", e)),
                }
            }
            Action::ToggleStar(id) => {
                let starred = self.app.browser.is_starred(&id);
                let library = Arc::clone(&self.library);
                let result = blocking(|| {
                    if starred {
                        library.unstar(&id)
                    } else {
                        library.star(&id)
                    }
                });
                match result {
                    Ok(()) if starred => {
                        self.app.browser.starred.remove(&id);
                        self.app.show_toast("Unstarred", false);
                    }
                    Ok(()) => {
                        self.app.browser.starred.insert(id);
                        self.app.show_toast("Starred", false);
                    }
                    Err(e) => self.app.error(&format!("Could not update star: {}", e)),
                }
            }

            Action::CreatePlaylist(name) => {
                self.close_modal(Modal::NewPlaylist);
                let name = name.trim().to_string();
                if name.is_empty() {
                    return;
                }
                let library = Arc::clone(&self.library);
                match blocking(|| library.create_playlist(&name)) {
                    Ok(()) => {
                        self.app.notify(&format!("Created playlist {}", name));
                        self.dispatch(Action::RefreshPlaylists);
                    }
                    Err(e) => self.app.error(&format!("Could not create playlist: {}", e)),
                }
            }
            Action::DeletePlaylist(id) => {
                self.close_modal(Modal::DeletePlaylist);
                let library = Arc::clone(&self.library);
                match blocking(|| library.delete_playlist(&id)) {
                    Ok(()) => {
                        self.app.notify("Playlist deleted");
                        self.dispatch(Action::RefreshPlaylists);
                    }
                    Err(e) => self.app.error(&format!("Could not delete playlist: {}", e)),
                }
            }
            Action::AddToPlaylist { playlist_id, entry } => {
                self.close_modal(Modal::AddToPlaylist);
                self.app.pending_entry = None;
                let ids = match entry {
                    Entry::Track(track) => Ok(vec![track.id]),
                    Entry::Directory { id, .. } => self
                        .expand_directory(&id)
                        .map(|tracks| tracks.into_iter().map(|t| t.id).collect()),
                };
                let library = Arc::clone(&self.library);
                let result = ids.and_then(|ids| {
                    blocking(|| library.add_to_playlist(&playlist_id, &ids)).map(|()| ids.len())
                });
                match result {
                    Ok(count) => {
                        self.app
                            .notify(&format!("Added {} track(s) to playlist", count));
                        self.dispatch(Action::RefreshPlaylists);
                    }
                    Err(e) => self.app.error(&format!("Could not update playlist: {}", e)),
                }
            }

            Action::Quit => self.app.is_running = false,
        }
    }

    fn close_modal(&mut self, modal: Modal) {
        if self.app.pages.top_modal() == Some(modal) {
            let _ = self.app.pages.pop_modal();
        }
    }

    fn enqueue_batch(&mut self, mut tracks: Vec<Track>) {
        self.policy.apply(&mut tracks);
        let count = tracks.len();
        self.app.queue.extend(tracks);
        self.app.show_toast(&format!("Queued {} track(s)", count), false);
    }

    /// Returns false when the server could not be reached.
    fn load_indexes(&mut self) -> bool {
        let library = Arc::clone(&self.library);
        match blocking(|| library.get_indexes()) {
            Ok(groups) => {
                self.app.browser.set_artists(flatten_indexes(groups));
                true
            }
            Err(e) => {
                self.app.error(&format!("Could not load artists: {}", e));
                false
            }
        }
    }

    fn load_starred(&mut self) {
        let library = Arc::clone(&self.library);
        match blocking(|| library.get_starred()) {
            Ok(ids) => self.app.browser.starred = ids.into_iter().collect(),
            Err(e) => self.app.error(&format!("Could not load starred items: {}", e)),
        }
    }

    fn fetch_directory(&mut self, id: &str) -> Result<DirectoryNode, LibraryError> {
        let library = Arc::clone(&self.library);
        let cache = &mut self.cache;
        blocking(|| cache.get(library.as_ref(), id).cloned())
    }

    /// All tracks under `root`, depth first in listing order. Nothing is
    /// returned if any listing on the way fails.
    pub fn expand_directory(&mut self, root: &str) -> Result<Vec<Track>, LibraryError> {
        let mut stack = vec![Work::Dir(root.to_string())];
        let mut visited = HashSet::new();
        let mut tracks = Vec::new();

        while let Some(item) = stack.pop() {
            match item {
                Work::Track(track) => tracks.push(track),
                Work::Dir(id) => {
                    if !visited.insert(id.clone()) {
                        continue;
                    }
                    let node = self.fetch_directory(&id)?;
                    stack.extend(node.entries.into_iter().rev().map(|entry| match entry {
                        Entry::Directory { id, .. } => Work::Dir(id),
                        Entry::Track(track) => Work::Track(track),
                    }));
                }
            }
        }

        Ok(tracks)
    }
}
