use super::library::panel;
use crate::app::{App, LogLevel};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Newest lines at the bottom; older ones scroll off the top.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = panel("log", true, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let height = inner.height as usize;
    let skip = app.log.len().saturating_sub(height);
    let lines: Vec<Line> = app
        .log
        .iter()
        .skip(skip)
        .map(|line| {
            let color = match line.level {
                LogLevel::Info => theme.text,
                LogLevel::Error => theme.red,
            };
            Line::from(Span::styled(line.message.as_str(), Style::default().fg(color)))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
