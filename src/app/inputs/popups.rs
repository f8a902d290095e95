use super::KeyResult;
use crate::app::bridge::Action;
use crate::app::pages::Modal;
use crate::app::state::ui::move_cursor;
use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys never fall through a modal.
pub fn handle_modal(key: KeyEvent, modal: Modal, app: &mut App) -> KeyResult {
    match modal {
        Modal::MessageBox => Action::PopModal.into(),
        Modal::NewPlaylist => handle_new_playlist(key, app),
        Modal::DeletePlaylist => handle_delete_playlist(key, app),
        Modal::AddToPlaylist => handle_add_to_playlist(key, app),
    }
}

fn handle_new_playlist(key: KeyEvent, app: &mut App) -> KeyResult {
    match key.code {
        KeyCode::Esc => {
            app.input.clear();
            Action::PopModal.into()
        }
        KeyCode::Enter => Action::CreatePlaylist(std::mem::take(&mut app.input)).into(),
        KeyCode::Backspace => {
            app.input.pop();
            KeyResult::Consumed
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.push(c);
            KeyResult::Consumed
        }
        _ => KeyResult::Consumed,
    }
}

fn handle_delete_playlist(key: KeyEvent, app: &mut App) -> KeyResult {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => match app.selected_playlist() {
            Some(playlist) => Action::DeletePlaylist(playlist.id.clone()).into(),
            None => Action::PopModal.into(),
        },
        KeyCode::Char('n') | KeyCode::Esc => Action::PopModal.into(),
        _ => KeyResult::Consumed,
    }
}

fn handle_add_to_playlist(key: KeyEvent, app: &mut App) -> KeyResult {
    let keys = &app.keys;
    if keys.matches_any(key, &[&keys.nav_down, &keys.nav_down_alt]) {
        app.add_to_playlist_selected =
            move_cursor(app.add_to_playlist_selected, app.playlists.len(), 1);
        return KeyResult::Consumed;
    }
    if keys.matches_any(key, &[&keys.nav_up, &keys.nav_up_alt]) {
        app.add_to_playlist_selected =
            move_cursor(app.add_to_playlist_selected, app.playlists.len(), -1);
        return KeyResult::Consumed;
    }

    match key.code {
        KeyCode::Enter => {
            let playlist = app.playlists.get(app.add_to_playlist_selected);
            match (playlist, app.pending_entry.take()) {
                (Some(playlist), Some(entry)) => Action::AddToPlaylist {
                    playlist_id: playlist.id.clone(),
                    entry,
                }
                .into(),
                _ => Action::PopModal.into(),
            }
        }
        KeyCode::Esc => {
            app.pending_entry = None;
            Action::PopModal.into()
        }
        _ => KeyResult::Consumed,
    }
}
