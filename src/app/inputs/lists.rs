use super::KeyResult;
use crate::app::bridge::Action;
use crate::app::pages::Modal;
use crate::app::state::ui::move_cursor;
use crate::app::App;
use crossterm::event::KeyEvent;

/// Up/down on a plain list; `None` if the key is not a navigation key.
fn nav_delta(key: KeyEvent, app: &App) -> Option<isize> {
    let keys = &app.keys;
    if keys.matches_any(key, &[&keys.nav_down, &keys.nav_down_alt]) {
        Some(1)
    } else if keys.matches_any(key, &[&keys.nav_up, &keys.nav_up_alt]) {
        Some(-1)
    } else {
        None
    }
}

pub fn handle_queue_events(key: KeyEvent, app: &mut App) -> KeyResult {
    if let Some(delta) = nav_delta(key, app) {
        app.queue_selected = move_cursor(app.queue_selected, app.queue.len(), delta);
        return KeyResult::Consumed;
    }

    let keys = &app.keys;
    let has_selection = app.queue_selected < app.queue.len();

    if keys.matches(key, &keys.confirm) {
        return if has_selection {
            Action::PlaySelected(app.queue_selected).into()
        } else {
            KeyResult::Consumed
        };
    }
    if keys.matches(key, &keys.remove) {
        return if has_selection {
            Action::RemoveAt(app.queue_selected).into()
        } else {
            KeyResult::Consumed
        };
    }
    if keys.matches(key, &keys.clear_queue) {
        return Action::ClearQueue.into();
    }

    KeyResult::Ignored
}

pub fn handle_playlist_events(key: KeyEvent, app: &mut App) -> KeyResult {
    if let Some(delta) = nav_delta(key, app) {
        app.playlist_selected = move_cursor(app.playlist_selected, app.playlists.len(), delta);
        return KeyResult::Consumed;
    }

    let keys = &app.keys;
    let selected = app.selected_playlist();

    if keys.matches(key, &keys.confirm) {
        return match selected {
            Some(playlist) => Action::EnqueuePlaylist(playlist.id.clone()).into(),
            None => KeyResult::Consumed,
        };
    }
    if keys.matches(key, &keys.new_playlist) {
        return Action::PushModal(Modal::NewPlaylist).into();
    }
    if keys.matches(key, &keys.delete_playlist) {
        return match selected {
            Some(_) => Action::PushModal(Modal::DeletePlaylist).into(),
            None => KeyResult::Consumed,
        };
    }
    if keys.matches(key, &keys.refresh) {
        return Action::RefreshPlaylists.into();
    }

    KeyResult::Ignored
}
