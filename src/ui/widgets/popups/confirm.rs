use super::popup_block;
use crate::app::App;
use crate::ui::utils::{centered_rect, truncate};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Delete-playlist confirmation.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(50, 6, f.area());
    let block = popup_block(f, area, "Delete playlist", theme);
    let name = app
        .selected_playlist()
        .map(|p| truncate(&p.name, area.width.saturating_sub(12) as usize))
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Delete ", Style::default().fg(theme.text)),
            Span::styled(
                name,
                Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(theme.text)),
        ]),
        Line::from(Span::styled(
            "y / n",
            Style::default().fg(theme.overlay),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}
