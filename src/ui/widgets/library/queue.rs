use super::panel;
use crate::app::App;
use crate::ui::utils::{format_duration, scroll_offset, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = panel(&format!("queue · {} songs", app.queue.len()), true, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.queue.is_empty() {
        let hint = vec![
            Line::from(""),
            Line::from(Span::styled("Empty queue", Style::default().fg(theme.overlay)))
                .alignment(Alignment::Center),
            Line::from(Span::styled(
                "Press 'a' in the browser to add songs",
                Style::default().fg(theme.surface),
            ))
            .alignment(Alignment::Center),
        ];
        f.render_widget(Paragraph::new(hint), inner);
        return;
    }

    let width = inner.width as usize;
    let height = inner.height as usize;
    let time_w = 6;
    let artist_w = width / 4;
    let title_w = width.saturating_sub(artist_w + time_w + 8);
    let current = app.queue.current_index();
    let start = scroll_offset(app.queue_selected, app.queue.len(), height);

    let lines: Vec<Line> = app
        .queue
        .tracks()
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, track)| {
            let is_sel = i == app.queue_selected;
            let is_current = current == Some(i);

            // ● selected, ◉ playing, ○ otherwise
            let (marker, marker_color, text_style) = if is_sel {
                (
                    "●",
                    theme.yellow,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )
            } else if is_current {
                ("◉", theme.red, Style::default().fg(theme.red))
            } else {
                ("○", theme.surface, Style::default().fg(theme.text))
            };

            Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(marker_color)),
                Span::styled(
                    format!("{:>3} ", i + 1),
                    Style::default().fg(theme.overlay),
                ),
                Span::styled(
                    format!("{:title_w$}", truncate(&track.title, title_w), title_w = title_w),
                    text_style,
                ),
                Span::styled(
                    format!(" {:artist_w$}", truncate(&track.artist, artist_w), artist_w = artist_w),
                    Style::default().fg(theme.overlay),
                ),
                Span::styled(
                    format!("{:>time_w$}", format_duration(track.duration_ms), time_w = time_w),
                    Style::default().fg(theme.overlay),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
