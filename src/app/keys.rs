use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Global
    pub quit: String,
    pub play_pause: String,
    pub stop: String,
    pub next_track: String,
    pub prev_track: String,
    pub volume_up: String,
    pub volume_down: String,
    pub seek_forward: String,
    pub seek_backward: String,

    // View Switching
    pub view_browser: String,
    pub view_queue: String,
    pub view_playlists: String,
    pub view_log: String,

    // Navigation (Shared)
    pub nav_up: String,
    pub nav_up_alt: String,
    pub nav_down: String,
    pub nav_down_alt: String,
    pub nav_left: String,
    pub nav_left_alt: String,
    pub nav_right: String,
    pub nav_right_alt: String,
    pub confirm: String,
    pub back: String,

    // Browser
    pub add_to_queue: String,
    pub add_to_playlist: String,
    pub toggle_star: String,
    pub refresh: String,
    pub refresh_all: String,
    pub search: String,
    pub search_next: String,
    pub search_prev: String,

    // Queue
    pub remove: String,
    pub clear_queue: String,

    // Playlists
    pub new_playlist: String,
    pub delete_playlist: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            play_pause: "Space".to_string(),
            stop: "s".to_string(),
            next_track: "n".to_string(),
            prev_track: "p".to_string(),
            volume_up: "+".to_string(),
            volume_down: "-".to_string(),
            seek_forward: ".".to_string(),
            seek_backward: ",".to_string(),

            view_browser: "1".to_string(),
            view_queue: "2".to_string(),
            view_playlists: "3".to_string(),
            view_log: "4".to_string(),

            nav_up: "k".to_string(),
            nav_up_alt: "Up".to_string(),
            nav_down: "j".to_string(),
            nav_down_alt: "Down".to_string(),
            nav_left: "h".to_string(),
            nav_left_alt: "Left".to_string(),
            nav_right: "l".to_string(),
            nav_right_alt: "Right".to_string(),
            confirm: "Enter".to_string(),
            back: "Esc".to_string(),

            add_to_queue: "a".to_string(),
            add_to_playlist: "A".to_string(),
            toggle_star: "y".to_string(),
            refresh: "r".to_string(),
            refresh_all: "R".to_string(),
            search: "/".to_string(),
            search_next: "n".to_string(),
            search_prev: "N".to_string(),

            remove: "d".to_string(),
            clear_queue: "D".to_string(),

            new_playlist: "n".to_string(),
            delete_playlist: "d".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "BackTab" => event.code == KeyCode::BackTab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    // Terminals differ on whether Shift+a arrives as 'A' or 'a'+SHIFT
                    (Some(ch), None) if ch.is_uppercase() => {
                        event.code == KeyCode::Char(ch)
                            || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                                && event.modifiers.contains(KeyModifiers::SHIFT))
                    }
                    (Some(ch), None) => event.code == KeyCode::Char(ch),
                    _ => false,
                }
            }
        }
    }

    /// Matches either of a primary/alternate pair.
    pub fn matches_any(&self, event: KeyEvent, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.matches(event, k))
    }

    // Helper for UI display
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "BackTab" => "S-Tab".to_string(),
            "Backspace" => "Bksp".to_string(),
            _ => key_str.to_string(),
        }
    }
}
