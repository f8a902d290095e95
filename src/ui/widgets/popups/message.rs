use super::popup_block;
use crate::app::App;
use crate::ui::utils::centered_rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(50, 7, f.area());
    let block = popup_block(f, area, "Note", theme);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(app.message.as_str(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(theme.overlay),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
