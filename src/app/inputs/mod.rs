use crate::app::bridge::Action;
use crate::app::pages::{Focus, Page};
use crate::app::App;
use crossterm::event::KeyEvent;

pub mod browser;
pub mod common;
pub mod lists;
pub mod player;
pub mod popups;

/// What a handler layer did with a key.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyResult {
    /// Not for this layer, try the next one.
    Ignored,
    /// Handled locally (cursor movement, text input).
    Consumed,
    Dispatch(Action),
}

impl From<Action> for KeyResult {
    fn from(action: Action) -> Self {
        KeyResult::Dispatch(action)
    }
}

/// Route a key press to the focused layer. View-only changes are applied
/// to `app` directly; anything touching the queue, pages or player comes
/// back as an `Action`.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // 1. Modals capture every key
    if let Focus::Modal(modal) = app.pages.focus() {
        return into_action(popups::handle_modal(key, modal, app));
    }

    // 2. Search field in the browser takes text input
    if app.pages.page() == Page::Browser && app.browser.search.is_some() {
        return into_action(browser::handle_search(key, app));
    }

    // 3. Quit and page switching
    match common::handle_common_events(key, app) {
        KeyResult::Ignored => {}
        other => return into_action(other),
    }

    // 4. Page specific keys
    let result = match app.pages.page() {
        Page::Browser => browser::handle_browser_events(key, app),
        Page::Queue => lists::handle_queue_events(key, app),
        Page::Playlists => lists::handle_playlist_events(key, app),
        Page::Log => KeyResult::Ignored,
    };
    match result {
        KeyResult::Ignored => {}
        other => return into_action(other),
    }

    // 5. Transport works everywhere unless a page used the key
    into_action(player::handle_player_events(key, app))
}

fn into_action(result: KeyResult) -> Option<Action> {
    match result {
        KeyResult::Dispatch(action) => Some(action),
        KeyResult::Ignored | KeyResult::Consumed => None,
    }
}
