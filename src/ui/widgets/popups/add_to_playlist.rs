use super::popup_block;
use crate::app::App;
use crate::ui::utils::{centered_rect, scroll_offset, truncate};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 20, f.area());
    let title = match &app.pending_entry {
        Some(entry) => format!("Add {} to playlist", truncate(entry.title(), 30)),
        None => "Add to playlist".to_string(),
    };
    let block = popup_block(f, area, &title, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let height = inner.height as usize;
    let width = inner.width as usize;
    let start = scroll_offset(app.add_to_playlist_selected, app.playlists.len(), height);

    let lines: Vec<Line> = app
        .playlists
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, playlist)| {
            let style = if i == app.add_to_playlist_selected {
                Style::default()
                    .fg(theme.base)
                    .bg(theme.blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(Span::styled(truncate(&playlist.name, width), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
