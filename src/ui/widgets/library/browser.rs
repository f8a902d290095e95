use super::panel;
use crate::app::{App, BrowserFocus, BrowserRow, BrowserState};
use crate::library::Entry;
use crate::ui::layout::get_browser_layout;
use crate::ui::utils::{format_duration, scroll_offset, truncate};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let layout = get_browser_layout(area);
    render_artists(f, layout.artists, app);
    render_entries(f, layout.entries, app);
    render_search(f, layout.search, app);
}

fn render_artists(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let browser = &app.browser;
    let block = panel("artist", browser.focus == BrowserFocus::Artists, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let height = inner.height as usize;
    let width = inner.width as usize;
    let start = scroll_offset(browser.artist_selected, browser.artists.len(), height);

    let lines: Vec<Line> = browser
        .artists
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, artist)| {
            let style = if i == browser.artist_selected {
                Style::default()
                    .fg(theme.base)
                    .bg(theme.blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(Span::styled(truncate(&artist.name, width), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_entries(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let browser = &app.browser;
    let focused = browser.focus == BrowserFocus::Entries;
    // Top-level artist nodes list albums, deeper nodes list songs
    let title = match &browser.directory {
        Some(dir) if dir.parent.is_some() => "song",
        _ => "album",
    };
    let block = panel(title, focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = browser.rows();
    let height = inner.height as usize;
    let width = inner.width as usize;
    let start = scroll_offset(browser.entry_selected, rows.len(), height);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, row)| {
            let selected = focused && i == browser.entry_selected;
            let color = match row {
                BrowserRow::Parent(_) => theme.overlay,
                BrowserRow::Entry(Entry::Directory { .. }) => theme.yellow,
                BrowserRow::Entry(Entry::Track(_)) => theme.text,
            };
            let text = row_text(row, browser, width);
            let style = if selected {
                Style::default()
                    .fg(theme.base)
                    .bg(theme.blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            Line::from(Span::styled(truncate(&text, width), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

const STAR: &str = "★ ";
const NO_STAR: &str = "  ";

/// One entry row, prefixed with a star column when it is starred.
fn row_text(row: &BrowserRow, browser: &BrowserState, width: usize) -> String {
    let mark = |id: &str| if browser.is_starred(id) { STAR } else { NO_STAR };
    match row {
        BrowserRow::Parent(_) => format!("{}[..]", NO_STAR),
        BrowserRow::Entry(Entry::Directory { id, title }) => format!("{}[{}]", mark(id), title),
        BrowserRow::Entry(Entry::Track(track)) => {
            let time = format_duration(track.duration_ms);
            let room = width.saturating_sub(time.len() + NO_STAR.len() + 1);
            format!(
                "{}{:room$} {}",
                mark(&track.id),
                truncate(&track.title, room),
                time,
                room = room
            )
        }
    }
}

fn render_search(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = match &app.browser.search {
        Some(query) => Line::from(vec![
            Span::styled(" search: ", Style::default().fg(theme.green)),
            Span::styled(query.as_str(), Style::default().fg(theme.text)),
            Span::styled("▌", Style::default().fg(theme.green)),
        ]),
        None if !app.browser.last_search.is_empty() => Line::from(Span::styled(
            format!(" search: {}  (n/N next/prev)", app.browser.last_search),
            Style::default().fg(theme.overlay),
        )),
        None => Line::from(Span::styled(
            " / to search",
            Style::default().fg(theme.surface),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Track;

    #[test]
    fn test_starred_rows_are_marked() {
        let mut browser = BrowserState::default();
        browser.starred.insert("s1".into());
        let starred = Entry::Track(Track {
            id: "s1".into(),
            title: "One".into(),
            artist: "A".into(),
            album: "B".into(),
            duration_ms: 61_000,
            locator: String::new(),
        });
        let plain = Entry::Directory {
            id: "al".into(),
            title: "Album".into(),
        };

        let text = row_text(&BrowserRow::Entry(&starred), &browser, 20);
        assert!(text.starts_with("★ One"));
        assert!(text.ends_with(" 01:01"));
        assert_eq!(row_text(&BrowserRow::Entry(&plain), &browser, 20), "  [Album]");
        assert_eq!(row_text(&BrowserRow::Parent("ar"), &browser, 20), "  [..]");
    }
}
