use super::ui::{clamp_cursor, move_cursor};
use std::collections::HashSet;
use crate::library::{Artist, DirectoryNode, Entry};

/// Which of the two browser lists has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserFocus {
    #[default]
    Artists,
    Entries,
}

/// A visible row of the entry list. Nodes with a parent get a leading
/// `[..]` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserRow<'a> {
    Parent(&'a str),
    Entry(&'a Entry),
}

#[derive(Debug, Default)]
pub struct BrowserState {
    pub focus: BrowserFocus,
    pub artists: Vec<Artist>,
    pub artist_selected: usize,
    pub directory: Option<DirectoryNode>,
    pub entry_selected: usize,
    /// Text typed so far while the search field is open.
    pub search: Option<String>,
    pub last_search: String,
    /// Ids of starred songs, albums and artists.
    pub starred: HashSet<String>,
}

impl BrowserState {
    /// Replace the artist list, keeping the cursor near where it was.
    pub fn set_artists(&mut self, artists: Vec<Artist>) {
        self.artists = artists;
        self.artist_selected = clamp_cursor(self.artist_selected, self.artists.len());
    }

    pub fn selected_artist(&self) -> Option<&Artist> {
        self.artists.get(self.artist_selected)
    }

    pub fn move_artist(&mut self, delta: isize) {
        self.artist_selected = move_cursor(self.artist_selected, self.artists.len(), delta);
    }

    pub fn show_directory(&mut self, node: DirectoryNode) {
        self.directory = Some(node);
        self.entry_selected = 0;
        self.focus = BrowserFocus::Entries;
    }

    /// Show `node` without taking focus from the artist list.
    pub fn preview_directory(&mut self, node: DirectoryNode) {
        self.directory = Some(node);
        self.entry_selected = 0;
    }

    /// Like `show_directory` but for a reload of the same node.
    pub fn reload_directory(&mut self, node: DirectoryNode) {
        self.directory = Some(node);
        self.entry_selected = clamp_cursor(self.entry_selected, self.row_count());
    }

    pub fn rows(&self) -> Vec<BrowserRow<'_>> {
        let Some(dir) = &self.directory else {
            return Vec::new();
        };
        dir.parent
            .as_deref()
            .map(BrowserRow::Parent)
            .into_iter()
            .chain(dir.entries.iter().map(BrowserRow::Entry))
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.directory
            .as_ref()
            .map(|d| d.entries.len() + usize::from(d.parent.is_some()))
            .unwrap_or(0)
    }

    pub fn selected_row(&self) -> Option<BrowserRow<'_>> {
        self.rows().get(self.entry_selected).copied()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        match self.selected_row()? {
            BrowserRow::Entry(entry) => Some(entry),
            BrowserRow::Parent(_) => None,
        }
    }

    pub fn is_starred(&self, id: &str) -> bool {
        self.starred.contains(id)
    }

    pub fn move_entry(&mut self, delta: isize) {
        self.entry_selected = move_cursor(self.entry_selected, self.row_count(), delta);
    }

    /// Case-insensitive substring search over artist names, wrapping
    /// around. `from` itself is only considered when `inclusive`.
    pub fn find_artist(&self, query: &str, from: usize, forward: bool, inclusive: bool) -> Option<usize> {
        let len = self.artists.len();
        if query.is_empty() || len == 0 {
            return None;
        }
        let needle = query.to_lowercase();
        let start = if inclusive { 0 } else { 1 };
        (start..=len)
            .take(len)
            .map(|step| {
                if forward {
                    (from + step) % len
                } else {
                    (from + len * 2 - step) % len
                }
            })
            .find(|&i| self.artists[i].name.to_lowercase().contains(&needle))
    }
}
