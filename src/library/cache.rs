use super::{DirectoryNode, RemoteLibrary};
use crate::error::LibraryError;
use std::collections::HashMap;

/// Memoized directory listings keyed by node id.
///
/// Entries live until explicitly invalidated; a failed fetch leaves the
/// cache untouched.
#[derive(Debug, Default)]
pub struct NavigationCache {
    entries: HashMap<String, DirectoryNode>,
}

impl NavigationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        library: &dyn RemoteLibrary,
        id: &str,
    ) -> Result<&DirectoryNode, LibraryError> {
        if !self.entries.contains_key(id) {
            let node = library.get_music_directory(id)?;
            tracing::debug!(id, entries = node.entries.len(), "cached directory");
            self.entries.insert(id.to_string(), node);
        }
        self.entries
            .get(id)
            .ok_or_else(|| LibraryError::Decode(format!("directory {} vanished from cache", id)))
    }

    pub fn invalidate(&mut self, id: &str) {
        self.entries.remove(id);
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Entry, IndexGroup, Playlist, Track};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLibrary {
        fetches: AtomicUsize,
        fail: bool,
    }

    impl RemoteLibrary for CountingLibrary {
        fn get_indexes(&self) -> Result<Vec<IndexGroup>, LibraryError> {
            Ok(Vec::new())
        }
        fn get_music_directory(&self, id: &str) -> Result<DirectoryNode, LibraryError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LibraryError::Network("connection refused".into()));
            }
            Ok(DirectoryNode {
                id: id.to_string(),
                parent: None,
                name: format!("dir {}", id),
                entries: vec![Entry::Directory {
                    id: format!("{}-1", id),
                    title: "child".into(),
                }],
            })
        }
        fn play_url(&self, track_id: &str) -> String {
            format!("mem://{}", track_id)
        }
        fn get_playlists(&self) -> Result<Vec<Playlist>, LibraryError> {
            Ok(Vec::new())
        }
        fn get_playlist(&self, _id: &str) -> Result<Vec<Track>, LibraryError> {
            Ok(Vec::new())
        }
        fn create_playlist(&self, _name: &str) -> Result<(), LibraryError> {
            Ok(())
        }
        fn delete_playlist(&self, _id: &str) -> Result<(), LibraryError> {
            Ok(())
        }
        fn add_to_playlist(&self, _p: &str, _t: &[String]) -> Result<(), LibraryError> {
            Ok(())
        }
        fn get_starred(&self) -> Result<Vec<String>, LibraryError> {
            Ok(Vec::new())
        }
        fn star(&self, _id: &str) -> Result<(), LibraryError> {
            Ok(())
        }
        fn unstar(&self, _id: &str) -> Result<(), LibraryError> {
            Ok(())
        }
    }

    #[test]
    fn test_second_get_hits_cache() {
        let library = CountingLibrary::default();
        let mut cache = NavigationCache::new();

        let first = cache.get(&library, "ar-1").unwrap().name.clone();
        let second = cache.get(&library, "ar-1").unwrap().name.clone();

        assert_eq!(first, second);
        assert_eq!(library.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let library = CountingLibrary::default();
        let mut cache = NavigationCache::new();

        cache.get(&library, "a").unwrap();
        cache.get(&library, "b").unwrap();
        cache.invalidate("a");
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));

        cache.get(&library, "a").unwrap();
        assert_eq!(library.fetches.load(Ordering::SeqCst), 3);

        cache.invalidate_all();
        assert!(cache.is_empty());
        cache.get(&library, "b").unwrap();
        assert_eq!(library.fetches.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_failed_fetch_leaves_cache_unchanged() {
        let library = CountingLibrary {
            fail: true,
            ..Default::default()
        };
        let mut cache = NavigationCache::new();

        let err = cache.get(&library, "x").unwrap_err();
        assert!(matches!(err, LibraryError::Network(_)));
        assert!(cache.is_empty());
    }
}
