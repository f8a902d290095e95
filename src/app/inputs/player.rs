use super::KeyResult;
use crate::app::bridge::{Action, SEEK_STEP_SECS, VOLUME_STEP};
use crate::app::App;
use crossterm::event::KeyEvent;

pub fn handle_player_events(key: KeyEvent, app: &App) -> KeyResult {
    let keys = &app.keys;

    let action = if keys.matches(key, &keys.play_pause) {
        Action::TogglePause
    } else if keys.matches(key, &keys.stop) {
        Action::Stop
    } else if keys.matches(key, &keys.next_track) {
        Action::Next
    } else if keys.matches(key, &keys.prev_track) {
        Action::Previous
    } else if keys.matches(key, &keys.volume_up) {
        Action::ChangeVolume(VOLUME_STEP)
    } else if keys.matches(key, &keys.volume_down) {
        Action::ChangeVolume(-VOLUME_STEP)
    } else if keys.matches(key, &keys.seek_forward) {
        Action::SeekRelative(SEEK_STEP_SECS)
    } else if keys.matches(key, &keys.seek_backward) {
        Action::SeekRelative(-SEEK_STEP_SECS)
    } else {
        return KeyResult::Ignored;
    };
    action.into()
}
