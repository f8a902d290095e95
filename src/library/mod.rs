pub mod cache;
pub mod subsonic;

pub use cache::NavigationCache;
pub use subsonic::SubsonicLibrary;

use crate::error::LibraryError;
use serde::{Deserialize, Serialize};

/// A playable song as listed by the server. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_ms: u64,
    /// Streaming address handed to the player.
    pub locator: String,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Directory { id: String, title: String },
    Track(Track),
}

impl Entry {
    pub fn title(&self) -> &str {
        match self {
            Entry::Directory { title, .. } => title,
            Entry::Track(track) => &track.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub id: String,
    pub parent: Option<String>,
    pub name: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// Top-level browse bucket ("A", "B", "#", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup {
    pub name: String,
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub song_count: u32,
}

/// The remote media library as seen by the client.
pub trait RemoteLibrary: Send + Sync {
    fn get_indexes(&self) -> Result<Vec<IndexGroup>, LibraryError>;
    fn get_music_directory(&self, id: &str) -> Result<DirectoryNode, LibraryError>;
    fn play_url(&self, track_id: &str) -> String;

    fn get_playlists(&self) -> Result<Vec<Playlist>, LibraryError>;
    fn get_playlist(&self, id: &str) -> Result<Vec<Track>, LibraryError>;
    fn create_playlist(&self, name: &str) -> Result<(), LibraryError>;
    fn delete_playlist(&self, id: &str) -> Result<(), LibraryError>;
    fn add_to_playlist(&self, playlist_id: &str, track_ids: &[String]) -> Result<(), LibraryError>;

    /// Ids of every starred song, album and artist.
    fn get_starred(&self) -> Result<Vec<String>, LibraryError>;
    fn star(&self, id: &str) -> Result<(), LibraryError>;
    fn unstar(&self, id: &str) -> Result<(), LibraryError>;
}

/// Flatten index groups into the artist list shown by the browser.
pub fn flatten_indexes(groups: Vec<IndexGroup>) -> Vec<Artist> {
    groups.into_iter().flat_map(|g| g.artists).collect()
}
