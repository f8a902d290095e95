use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub status_area: Rect,
    pub page_area: Rect,
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Transport + player status
            Constraint::Length(1), // Page name
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    MainLayout {
        status_area: chunks[0],
        page_area: chunks[1],
        body_area: chunks[2],
        footer_area: chunks[3],
    }
}

pub struct BrowserLayout {
    pub artists: Rect,
    pub entries: Rect,
    pub search: Rect,
}

pub fn get_browser_layout(area: Rect) -> BrowserLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    BrowserLayout {
        artists: columns[0],
        entries: columns[1],
        search: rows[1],
    }
}
