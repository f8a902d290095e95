use crate::app::{App, Modal};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

pub mod add_to_playlist;
pub mod confirm;
pub mod input;
pub mod message;
pub mod toast;

/// Modals bottom to top, then the toast above everything.
pub fn render(f: &mut Frame, app: &App) {
    for modal in app.pages.modals() {
        match modal {
            Modal::MessageBox => message::render(f, app),
            Modal::NewPlaylist => input::render(f, app),
            Modal::DeletePlaylist => confirm::render(f, app),
            Modal::AddToPlaylist => add_to_playlist::render(f, app),
        }
    }

    if app.toast.is_some() {
        toast::render(f, app);
    }
}

/// Clear `area` and return a rounded popup block for it.
pub(crate) fn popup_block(f: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Block<'static> {
    f.render_widget(Clear, area);
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(Color::Reset))
}
