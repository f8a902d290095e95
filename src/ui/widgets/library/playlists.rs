use super::panel;
use crate::app::App;
use crate::ui::utils::{scroll_offset, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = panel(&format!("playlists · {}", app.playlists.len()), true, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.playlists.is_empty() {
        let hint = vec![
            Line::from(""),
            Line::from(Span::styled("No playlists", Style::default().fg(theme.overlay)))
                .alignment(Alignment::Center),
            Line::from(Span::styled(
                format!("Press '{}' to create one", app.keys.display(&app.keys.new_playlist)),
                Style::default().fg(theme.surface),
            ))
            .alignment(Alignment::Center),
        ];
        f.render_widget(Paragraph::new(hint), inner);
        return;
    }

    let width = inner.width as usize;
    let height = inner.height as usize;
    let start = scroll_offset(app.playlist_selected, app.playlists.len(), height);

    let lines: Vec<Line> = app
        .playlists
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, playlist)| {
            let is_sel = i == app.playlist_selected;
            let count = format!("{} songs", playlist.song_count);
            let name_w = width.saturating_sub(count.len() + 5);
            let style = if is_sel {
                Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(
                    if is_sel { " ● " } else { " ○ " },
                    Style::default().fg(if is_sel { theme.yellow } else { theme.surface }),
                ),
                Span::styled(
                    format!("{:name_w$}", truncate(&playlist.name, name_w), name_w = name_w),
                    style,
                ),
                Span::styled(format!(" {}", count), Style::default().fg(theme.overlay)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
