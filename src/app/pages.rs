use crate::error::StateError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Browser,
    Queue,
    Playlists,
    Log,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Browser, Page::Queue, Page::Playlists, Page::Log];

    pub fn title(self) -> &'static str {
        match self {
            Page::Browser => "Browser",
            Page::Queue => "Queue",
            Page::Playlists => "Playlists",
            Page::Log => "Log",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    DeletePlaylist,
    NewPlaylist,
    AddToPlaylist,
    MessageBox,
}

/// Where key input goes right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page(Page),
    Modal(Modal),
}

/// One active base page plus a LIFO of overlays. The top modal, when
/// present, owns focus.
#[derive(Debug, Clone, Default)]
pub struct PageController {
    page: Page,
    modals: Vec<Modal>,
}

impl PageController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn modals(&self) -> &[Modal] {
        &self.modals
    }

    pub fn top_modal(&self) -> Option<Modal> {
        self.modals.last().copied()
    }

    pub fn focus(&self) -> Focus {
        match self.top_modal() {
            Some(modal) => Focus::Modal(modal),
            None => Focus::Page(self.page),
        }
    }

    pub fn switch_page(&mut self, page: Page) -> Result<(), StateError> {
        if !self.modals.is_empty() {
            return Err(StateError::ModalOpen);
        }
        self.page = page;
        Ok(())
    }

    pub fn push_modal(&mut self, modal: Modal) {
        self.modals.push(modal);
    }

    pub fn pop_modal(&mut self) -> Result<Modal, StateError> {
        self.modals.pop().ok_or(StateError::EmptyModalStack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_returns_focus_to_page() {
        let mut pages = PageController::new();
        assert_eq!(pages.focus(), Focus::Page(Page::Browser));

        pages.push_modal(Modal::AddToPlaylist);
        pages.push_modal(Modal::MessageBox);
        assert_eq!(pages.focus(), Focus::Modal(Modal::MessageBox));

        assert_eq!(pages.pop_modal(), Ok(Modal::MessageBox));
        assert_eq!(pages.focus(), Focus::Modal(Modal::AddToPlaylist));
        assert_eq!(pages.pop_modal(), Ok(Modal::AddToPlaylist));
        assert_eq!(pages.focus(), Focus::Page(Page::Browser));
        assert!(pages.modals().is_empty());
    }

    #[test]
    fn test_pop_empty_is_an_error() {
        let mut pages = PageController::new();
        assert_eq!(pages.pop_modal(), Err(StateError::EmptyModalStack));
        assert_eq!(pages.focus(), Focus::Page(Page::Browser));
    }

    #[test]
    fn test_switch_blocked_by_modal() {
        let mut pages = PageController::new();
        pages.switch_page(Page::Queue).unwrap();
        pages.push_modal(Modal::NewPlaylist);
        assert_eq!(pages.switch_page(Page::Log), Err(StateError::ModalOpen));
        assert_eq!(pages.page(), Page::Queue);

        pages.pop_modal().unwrap();
        pages.switch_page(Page::Log).unwrap();
        assert_eq!(pages.focus(), Focus::Page(Page::Log));
    }
}
