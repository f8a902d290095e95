pub mod browser;
pub mod ui;

pub use browser::{BrowserFocus, BrowserRow, BrowserState};
pub use ui::{LogLevel, LogLine, Toast, LOG_CAPACITY, TOAST_DURATION};

use super::config::{PersistentState, UserConfig};
use super::keys::KeyConfig;
use super::pages::{Modal, PageController};
use super::queue::PlaybackQueue;
use crate::library::{Entry, Playlist, Track};
use crate::player::PlayerState;
use crate::ui::theme::Theme;
use std::collections::VecDeque;
use std::time::Instant;

pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,
    pub is_running: bool,

    pub queue: PlaybackQueue,
    pub pages: PageController,

    // Transport, as last reported by the player
    pub now_playing: Option<Track>,
    pub transport: PlayerState,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub volume: u8,

    pub browser: BrowserState,
    pub queue_selected: usize,
    pub playlists: Vec<Playlist>,
    pub playlist_selected: usize,

    // Modal state
    pub add_to_playlist_selected: usize,
    /// Browser entry waiting for a playlist choice.
    pub pending_entry: Option<Entry>,
    pub input: String,
    pub message: String,

    pub toast: Option<Toast>,
    pub log: VecDeque<LogLine>,
}

impl App {
    pub fn new(config: &UserConfig, state: &PersistentState, theme: Theme) -> Self {
        Self {
            theme,
            keys: config.keys.clone(),
            is_running: true,
            queue: PlaybackQueue::new(),
            pages: PageController::new(),
            now_playing: None,
            transport: PlayerState::Stopped,
            position_ms: 0,
            duration_ms: 0,
            volume: state.volume.min(100),
            browser: BrowserState::default(),
            queue_selected: 0,
            playlists: Vec::new(),
            playlist_selected: 0,
            add_to_playlist_selected: 0,
            pending_entry: None,
            input: String::new(),
            message: String::new(),
            toast: None,
            log: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    pub fn show_toast(&mut self, message: &str, is_error: bool) {
        let now = Instant::now();
        let deadline = now + TOAST_DURATION;
        match self.toast.as_mut() {
            // Rapid updates reuse the toast so it doesn't flicker
            Some(current) => {
                current.message = message.to_string();
                current.is_error = is_error;
                current.deadline = deadline;
            }
            None => {
                self.toast = Some(Toast {
                    message: message.to_string(),
                    is_error,
                    start_time: now,
                    deadline,
                })
            }
        }
    }

    /// Called on every tick.
    pub fn tick(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| Instant::now() >= t.deadline)
        {
            self.toast = None;
        }
    }

    fn push_log(&mut self, level: LogLevel, message: &str) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(LogLine {
            level,
            message: message.to_string(),
        });
    }

    pub fn notify(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.push_log(LogLevel::Info, message);
        self.show_toast(message, false);
    }

    pub fn error(&mut self, message: &str) {
        tracing::warn!("{}", message);
        self.push_log(LogLevel::Error, message);
        self.show_toast(message, true);
    }

    /// Put `text` in a dismissable box on top of everything.
    pub fn show_message(&mut self, text: &str) {
        self.message = text.to_string();
        self.pages.push_modal(Modal::MessageBox);
    }

    pub fn selected_playlist(&self) -> Option<&Playlist> {
        self.playlists.get(self.playlist_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&UserConfig::default(), &PersistentState::default(), Theme::default())
    }

    #[test]
    fn test_log_is_capped() {
        let mut app = app();
        for i in 0..(LOG_CAPACITY + 10) {
            app.notify(&format!("line {}", i));
        }
        assert_eq!(app.log.len(), LOG_CAPACITY);
        assert_eq!(app.log.front().unwrap().message, "line 10");
    }

    #[test]
    fn test_error_marks_toast() {
        let mut app = app();
        app.error("boom");
        assert!(app.toast.as_ref().unwrap().is_error);
        assert_eq!(app.log.back().unwrap().level, LogLevel::Error);
        app.notify("fine");
        assert!(!app.toast.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_expired_toast_is_cleared() {
        let mut app = app();
        app.notify("hi");
        app.tick();
        assert!(app.toast.is_some());
        if let Some(t) = app.toast.as_mut() {
            t.deadline = Instant::now();
        }
        app.tick();
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_message_box_is_pushed() {
        let mut app = app();
        app.show_message("No playlists available. Create one first.");
        assert_eq!(app.pages.top_modal(), Some(Modal::MessageBox));
        assert_eq!(app.message, "No playlists available. Create one first.");
    }
}
