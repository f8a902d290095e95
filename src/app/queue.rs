use crate::error::StateError;
use crate::library::Track;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Ordering applied to a batch of tracks at the moment it is enqueued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnqueuePolicy {
    #[default]
    InOrder,
    Shuffle,
}

impl EnqueuePolicy {
    pub fn apply(self, tracks: &mut [Track]) {
        if self == EnqueuePolicy::Shuffle {
            tracks.shuffle(&mut rand::thread_rng());
        }
    }
}

/// Ordered tracks plus a cursor on the one that is (or was last) playing.
///
/// `current` is `None` or a valid index after every mutation.
#[derive(Debug, Clone, Default)]
pub struct PlaybackQueue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    /// Removing an entry before the cursor keeps the cursor on the same
    /// track; removing the current entry clears it.
    pub fn remove_at(&mut self, index: usize) -> Result<Track, StateError> {
        if index >= self.tracks.len() {
            return Err(StateError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }
        let removed = self.tracks.remove(index);
        self.current = match self.current {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    pub fn set_current(&mut self, index: Option<usize>) -> Result<(), StateError> {
        match index {
            Some(i) if i >= self.tracks.len() => Err(StateError::IndexOutOfRange {
                index: i,
                len: self.tracks.len(),
            }),
            _ => {
                self.current = index;
                Ok(())
            }
        }
    }

    /// Drop the cursor, keeping every entry.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Move the cursor by `delta`. Leaving the list in either direction
    /// clears the cursor; with no cursor, `delta > 0` starts at the top.
    pub fn advance(&mut self, delta: isize) -> Option<&Track> {
        let target = match self.current {
            Some(c) => c as isize + delta,
            None if delta > 0 => delta - 1,
            None => -1,
        };
        self.current = usize::try_from(target)
            .ok()
            .filter(|&i| i < self.tracks.len());
        self.current_track()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.into(),
            title: id.to_uppercase(),
            artist: "Artist".into(),
            album: "Album".into(),
            duration_ms: 1_000,
            locator: format!("mem://{}", id),
        }
    }

    fn queue_of(ids: &[&str]) -> PlaybackQueue {
        let mut queue = PlaybackQueue::new();
        queue.extend(ids.iter().map(|id| track(id)));
        queue
    }

    fn assert_valid(queue: &PlaybackQueue) {
        if let Some(c) = queue.current_index() {
            assert!(c < queue.len(), "cursor {} out of {}", c, queue.len());
        }
    }

    #[test]
    fn test_remove_before_current_keeps_track() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_current(Some(2)).unwrap();
        queue.remove_at(0).unwrap();
        assert_eq!(queue.current_index(), Some(1));
        assert_eq!(queue.current_track().unwrap().id, "c");
    }

    #[test]
    fn test_remove_current_clears_cursor() {
        let mut queue = queue_of(&["a", "b"]);
        queue.set_current(Some(1)).unwrap();
        assert_eq!(queue.remove_at(1).unwrap().id, "b");
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn test_remove_after_current_and_out_of_range() {
        let mut queue = queue_of(&["a", "b"]);
        queue.set_current(Some(0)).unwrap();
        queue.remove_at(1).unwrap();
        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(
            queue.remove_at(5),
            Err(StateError::IndexOutOfRange { index: 5, len: 1 })
        );
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_set_current_rejects_out_of_range() {
        let mut queue = queue_of(&["a"]);
        assert!(queue.set_current(Some(1)).is_err());
        assert_eq!(queue.current_index(), None);
        queue.set_current(Some(0)).unwrap();
        queue.set_current(None).unwrap();
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn test_clear_current_keeps_entries() {
        let mut queue = queue_of(&["a", "b"]);
        queue.set_current(Some(1)).unwrap();
        queue.clear_current();
        assert_eq!(queue.current_index(), None);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_advance_walks_and_falls_off() {
        let mut queue = queue_of(&["a", "b"]);
        assert_eq!(queue.advance(1).unwrap().id, "a");
        assert_eq!(queue.advance(1).unwrap().id, "b");
        assert!(queue.advance(1).is_none());
        assert_eq!(queue.current_index(), None);

        queue.set_current(Some(0)).unwrap();
        assert!(queue.advance(-1).is_none());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn test_random_mutations_keep_cursor_valid() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let mut queue = PlaybackQueue::new();
        for step in 0..2_000 {
            match rng.gen_range(0..6) {
                0 | 1 => queue.enqueue(track(&format!("t{}", step))),
                2 => {
                    let idx = rng.gen_range(0..queue.len() + 2);
                    let _ = queue.remove_at(idx);
                }
                3 if rng.gen_bool(0.1) => queue.clear(),
                4 => {
                    let idx = rng.gen_range(0..queue.len() + 2);
                    let _ = queue.set_current(Some(idx));
                }
                _ => {
                    queue.advance(rng.gen_range(-2..3));
                }
            }
            assert_valid(&queue);
        }
    }

    #[test]
    fn test_shuffle_policy_keeps_tracks() {
        let mut batch: Vec<Track> = (0..20).map(|i| track(&i.to_string())).collect();
        EnqueuePolicy::InOrder.apply(&mut batch);
        assert_eq!(batch[3].id, "3");

        EnqueuePolicy::Shuffle.apply(&mut batch);
        let mut ids: Vec<usize> = batch.iter().map(|t| t.id.parse().unwrap()).collect();
        ids.sort();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
    }
}
