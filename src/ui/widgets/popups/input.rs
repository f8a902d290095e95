use super::popup_block;
use crate::app::App;
use crate::ui::utils::centered_rect;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Name prompt for a new playlist.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 5, f.area());
    let block = popup_block(f, area, "New playlist", theme);

    let lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " > ",
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(app.input.as_str(), Style::default().fg(theme.text)),
            Span::styled(
                "▌",
                Style::default()
                    .fg(theme.green)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
