use super::KeyResult;
use crate::app::bridge::Action;
use crate::app::pages::Page;
use crate::app::App;
use crossterm::event::KeyEvent;

pub fn handle_common_events(key: KeyEvent, app: &App) -> KeyResult {
    let keys = &app.keys;

    if keys.matches(key, &keys.quit) {
        return Action::Quit.into();
    }

    let views = [
        (&keys.view_browser, Page::Browser),
        (&keys.view_queue, Page::Queue),
        (&keys.view_playlists, Page::Playlists),
        (&keys.view_log, Page::Log),
    ];
    for (binding, page) in views {
        if keys.matches(key, binding) {
            return Action::SwitchPage(page).into();
        }
    }

    KeyResult::Ignored
}
