use crate::app::{App, BrowserFocus, Modal, Page};
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use layout::get_main_layout;
use widgets::{header, library, log, popups};

pub fn ui(f: &mut Frame, app: &App) {
    let layout = get_main_layout(f.area());

    header::render_status(f, layout.status_area, app);
    header::render_page_title(f, layout.page_area, app);

    match app.pages.page() {
        Page::Browser => library::browser::render(f, layout.body_area, app),
        Page::Queue => library::queue::render(f, layout.body_area, app),
        Page::Playlists => library::playlists::render(f, layout.body_area, app),
        Page::Log => log::render(f, layout.body_area, app),
    }

    render_footer(f, layout.footer_area, app);
    popups::render(f, app);
}

/// Key hints for whatever currently owns the keyboard.
fn footer_hints(app: &App) -> Vec<(String, &'static str)> {
    let k = &app.keys;
    let d = |key: &str| k.display(key);

    if let Some(modal) = app.pages.top_modal() {
        return match modal {
            Modal::MessageBox => vec![("any".into(), "close")],
            Modal::NewPlaylist => vec![(d(&k.confirm), "create"), (d(&k.back), "cancel")],
            Modal::DeletePlaylist => vec![("y".into(), "delete"), ("n".into(), "cancel")],
            Modal::AddToPlaylist => vec![(d(&k.confirm), "add"), (d(&k.back), "cancel")],
        };
    }

    let mut hints = match app.pages.page() {
        Page::Browser if app.browser.search.is_some() => {
            return vec![(d(&k.confirm), "done"), (d(&k.back), "cancel")];
        }
        Page::Browser => match app.browser.focus {
            BrowserFocus::Artists => vec![
                (d(&k.confirm), "open"),
                (d(&k.search), "search"),
                (d(&k.refresh_all), "refresh"),
            ],
            BrowserFocus::Entries => vec![
                (d(&k.confirm), "play"),
                (d(&k.add_to_queue), "queue"),
                (d(&k.add_to_playlist), "playlist"),
                (d(&k.toggle_star), "star"),
                (d(&k.refresh), "refresh"),
            ],
        },
        Page::Queue => vec![
            (d(&k.confirm), "play"),
            (d(&k.remove), "remove"),
            (d(&k.clear_queue), "clear"),
        ],
        Page::Playlists => vec![
            (d(&k.confirm), "queue"),
            (d(&k.new_playlist), "new"),
            (d(&k.delete_playlist), "delete"),
        ],
        Page::Log => Vec::new(),
    };
    hints.push((d(&k.play_pause), "pause"));
    hints.push((d(&k.quit), "quit"));
    hints
}

fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = Vec::new();
    for (key, label) in footer_hints(app) {
        spans.push(Span::styled(format!(" {} ", key), Style::default().fg(theme.blue)));
        spans.push(Span::styled(format!("{} ", label), Style::default().fg(theme.overlay)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
