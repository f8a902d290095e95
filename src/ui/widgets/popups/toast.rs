use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const SLIDE_MS: u128 = 300;

/// Horizontal offset of the toast from its resting column.
fn slide_offset(width: u16, entrance_ms: u128, remaining_ms: u128) -> u16 {
    if entrance_ms < SLIDE_MS {
        let t = entrance_ms as f32 / SLIDE_MS as f32;
        let ease = 1.0 - (1.0 - t).powi(3);
        (width as f32 * (1.0 - ease)) as u16
    } else if remaining_ms < SLIDE_MS {
        let t = (SLIDE_MS - remaining_ms) as f32 / SLIDE_MS as f32;
        (width as f32 * t.powi(3)) as u16
    } else {
        0
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let Some(toast) = &app.toast else {
        return;
    };
    let theme = &app.theme;
    let now = Instant::now();
    let screen = f.area();

    let width = (toast.message.width() as u16 + 6).min(screen.width.saturating_sub(4));
    let entrance = now.duration_since(toast.start_time).as_millis();
    let remaining = toast.deadline.saturating_duration_since(now).as_millis();
    let x = screen.width.saturating_sub(width + 1) + slide_offset(width, entrance, remaining);
    if x >= screen.width {
        return;
    }

    let visible = Rect::new(x, 1, width, 3).intersection(screen);
    if visible.is_empty() {
        return;
    }
    f.render_widget(Clear, visible);

    let color = if toast.is_error { theme.red } else { theme.blue };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Reset));
    let text = Paragraph::new(Line::from(Span::styled(
        toast.message.as_str(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);

    f.render_widget(text, visible);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slides_in_holds_and_slides_out() {
        assert_eq!(slide_offset(20, 0, 2500), 20);
        assert_eq!(slide_offset(20, 1000, 1500), 0);
        assert_eq!(slide_offset(20, 2500, 0), 20);
        assert!(slide_offset(20, 150, 2350) < 20);
    }
}
