use crate::app::{App, Page};
use crate::player::PlayerState;
use crate::ui::utils::{format_duration, truncate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// `[vol%][mm:ss/mm:ss]`
pub fn player_status(app: &App) -> String {
    format!(
        "[{}%][{}/{}]",
        app.volume,
        format_duration(app.position_ms),
        format_duration(app.duration_ms)
    )
}

pub fn transport_symbol(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Playing => "▶",
        PlayerState::Paused => "⏸",
        PlayerState::Stopped => "■",
    }
}

pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let status = player_status(app);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(status.chars().count() as u16 + 1)])
        .split(area);

    let mut spans = vec![
        Span::styled(
            " quaver ",
            Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", transport_symbol(app.transport)),
            Style::default().fg(theme.green),
        ),
    ];
    if let Some(track) = &app.now_playing {
        let room = (chunks[0].width as usize).saturating_sub(12);
        spans.push(Span::styled(
            truncate(&format!("{} - {}", track.artist, track.title), room),
            Style::default().fg(theme.text),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    f.render_widget(
        Paragraph::new(Span::styled(
            status,
            Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
        chunks[1],
    );
}

pub fn render_page_title(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let active = app.pages.page();
    let mut spans = Vec::new();
    for (i, page) in Page::ALL.iter().enumerate() {
        let style = if *page == active {
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.overlay)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, page.title()), style));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::{PersistentState, UserConfig};
    use crate::ui::theme::Theme;

    #[test]
    fn test_player_status_text() {
        let mut app = App::new(&UserConfig::default(), &PersistentState::default(), Theme::default());
        app.volume = 100;
        app.position_ms = 61_000;
        app.duration_ms = 298_000;
        assert_eq!(player_status(&app), "[100%][01:01/04:58]");
    }
}
