use super::KeyResult;
use crate::app::bridge::Action;
use crate::app::keys::KeyConfig;
use crate::app::pages::Modal;
use crate::app::state::{BrowserFocus, BrowserRow};
use crate::app::App;
use crate::library::Entry;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_browser_events(key: KeyEvent, app: &mut App) -> KeyResult {
    let keys = app.keys.clone(); // Clone keys to avoid borrowing app
    match app.browser.focus {
        BrowserFocus::Artists => handle_artists(key, app, &keys),
        BrowserFocus::Entries => handle_entries(key, app, &keys),
    }
}

fn handle_artists(key: KeyEvent, app: &mut App, keys: &KeyConfig) -> KeyResult {
    let browser = &mut app.browser;

    let delta = if keys.matches_any(key, &[&keys.nav_down, &keys.nav_down_alt]) {
        Some(1)
    } else if keys.matches_any(key, &[&keys.nav_up, &keys.nav_up_alt]) {
        Some(-1)
    } else {
        None
    };
    if let Some(delta) = delta {
        let before = browser.artist_selected;
        browser.move_artist(delta);
        return preview_if_moved(browser.artist_selected, before);
    }
    if keys.matches_any(key, &[&keys.nav_right, &keys.nav_right_alt, &keys.confirm]) {
        if browser.artists.is_empty() {
            return KeyResult::Consumed;
        }
        return Action::OpenArtist(browser.artist_selected).into();
    }
    if keys.matches(key, &keys.search) {
        browser.search = Some(String::new());
        return KeyResult::Consumed;
    }
    if keys.matches(key, &keys.search_next) || keys.matches(key, &keys.search_prev) {
        let forward = keys.matches(key, &keys.search_next);
        return match browser.find_artist(&browser.last_search, browser.artist_selected, forward, false)
        {
            Some(i) => preview_if_moved(i, browser.artist_selected),
            None => KeyResult::Consumed,
        };
    }
    if keys.matches(key, &keys.refresh_all) {
        return Action::RefreshIndexes.into();
    }

    KeyResult::Ignored
}

/// Load the artist under a moved cursor into the entry list.
fn preview_if_moved(index: usize, before: usize) -> KeyResult {
    if index == before {
        return KeyResult::Consumed;
    }
    Action::PreviewArtist(index).into()
}

fn handle_entries(key: KeyEvent, app: &mut App, keys: &KeyConfig) -> KeyResult {
    if keys.matches_any(key, &[&keys.nav_down, &keys.nav_down_alt]) {
        app.browser.move_entry(1);
        return KeyResult::Consumed;
    }
    if keys.matches_any(key, &[&keys.nav_up, &keys.nav_up_alt]) {
        app.browser.move_entry(-1);
        return KeyResult::Consumed;
    }
    if keys.matches_any(key, &[&keys.nav_left, &keys.nav_left_alt, &keys.back]) {
        app.browser.focus = BrowserFocus::Artists;
        return KeyResult::Consumed;
    }
    if keys.matches(key, &keys.confirm) {
        return match app.browser.selected_row() {
            Some(BrowserRow::Parent(id)) => Action::OpenDirectory(id.to_string()).into(),
            Some(BrowserRow::Entry(Entry::Directory { id, .. })) => {
                Action::OpenDirectory(id.clone()).into()
            }
            Some(BrowserRow::Entry(Entry::Track(track))) => Action::PlayTrack(track.clone()).into(),
            None => KeyResult::Consumed,
        };
    }
    if keys.matches(key, &keys.add_to_queue) {
        let action = match app.browser.selected_entry() {
            Some(Entry::Directory { id, .. }) => Action::EnqueueDirectory(id.clone()),
            Some(Entry::Track(track)) => Action::Enqueue(track.clone()),
            None => return KeyResult::Consumed,
        };
        // Step down so repeated presses add consecutive entries
        app.browser.move_entry(1);
        return action.into();
    }
    if keys.matches(key, &keys.add_to_playlist) {
        return match app.browser.selected_entry().cloned() {
            Some(entry) => {
                app.pending_entry = Some(entry);
                Action::PushModal(Modal::AddToPlaylist).into()
            }
            None => KeyResult::Consumed,
        };
    }
    if keys.matches(key, &keys.toggle_star) {
        return match app.browser.selected_entry() {
            Some(Entry::Directory { id, .. }) => Action::ToggleStar(id.clone()).into(),
            Some(Entry::Track(track)) => Action::ToggleStar(track.id.clone()).into(),
            None => KeyResult::Consumed,
        };
    }
    if keys.matches(key, &keys.refresh) {
        return Action::RefreshArtist.into();
    }

    KeyResult::Ignored
}

/// Incremental artist search: every edit jumps to the first match.
pub fn handle_search(key: KeyEvent, app: &mut App) -> KeyResult {
    let browser = &mut app.browser;
    let Some(query) = browser.search.as_mut() else {
        return KeyResult::Ignored;
    };

    match key.code {
        KeyCode::Esc => {
            browser.search = None;
            return KeyResult::Consumed;
        }
        KeyCode::Enter => {
            browser.last_search = query.clone();
            browser.search = None;
            return KeyResult::Consumed;
        }
        KeyCode::Backspace => {
            query.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => query.push(c),
        _ => return KeyResult::Consumed,
    }

    let query = query.clone();
    if let Some(i) = browser.find_artist(&query, 0, true, true) {
        browser.artist_selected = i;
    }
    KeyResult::Consumed
}
