use crate::ui::theme::Theme;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

pub mod browser;
pub mod playlists;
pub mod queue;

/// Rounded panel; the focused one gets the accent border.
pub fn panel(title: &str, focused: bool, theme: &Theme) -> Block<'static> {
    let color = if focused { theme.blue } else { theme.surface };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Reset))
}
