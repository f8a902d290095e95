use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use quaver::app::config::{PersistentState, UserConfig};
use quaver::app::events::AppEvent;
use quaver::app::{
    Action, App, EnqueuePolicy, EventBridge, Focus, Modal, Page, PageController, PlaybackQueue,
};
use quaver::error::{LibraryError, StateError};
use quaver::library::{
    Artist, DirectoryNode, Entry, IndexGroup, NavigationCache, Playlist, RemoteLibrary, Track,
};
use quaver::player::{
    Command, PlayerCommand, PlayerEvent, PlayerEventKind, PlayerHandle, EVENT_CHANNEL_CAPACITY,
};
use quaver::ui::Theme;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// In-memory library; counts directory fetches.
#[derive(Default)]
struct MemoryLibrary {
    dirs: HashMap<String, DirectoryNode>,
    fetches: AtomicUsize,
}

impl MemoryLibrary {
    fn with_dirs(dirs: Vec<DirectoryNode>) -> Self {
        Self {
            dirs: dirs.into_iter().map(|d| (d.id.clone(), d)).collect(),
            fetches: AtomicUsize::new(0),
        }
    }
}

impl RemoteLibrary for MemoryLibrary {
    fn get_indexes(&self) -> Result<Vec<IndexGroup>, LibraryError> {
        Ok(vec![IndexGroup {
            name: "A".into(),
            artists: vec![Artist {
                id: "root".into(),
                name: "Air".into(),
            }],
        }])
    }

    fn get_music_directory(&self, id: &str) -> Result<DirectoryNode, LibraryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.dirs
            .get(id)
            .cloned()
            .ok_or_else(|| LibraryError::Api {
                code: 70,
                message: format!("directory {} not found", id),
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

    fn add_to_playlist(&self, _playlist_id: &str, _ids: &[String]) -> Result<(), LibraryError> {
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

fn track(id: &str) -> Track {
    Track {
        id: id.into(),
        title: id.to_uppercase(),
        artist: "Air".into(),
        album: "Moon Safari".into(),
        duration_ms: 200_000,
        locator: format!("mem://{}", id),
    }
}

fn node(id: &str, entries: Vec<Entry>) -> DirectoryNode {
    DirectoryNode {
        id: id.into(),
        parent: None,
        name: id.into(),
        entries,
    }
}

fn folder(id: &str) -> Entry {
    Entry::Directory {
        id: id.into(),
        title: id.into(),
    }
}

fn create_bridge(
    library: Arc<MemoryLibrary>,
) -> (EventBridge, mpsc::UnboundedReceiver<PlayerCommand>) {
    let (handle, commands) = PlayerHandle::channel();
    let app = App::new(&UserConfig::default(), &PersistentState::default(), Theme::default());
    (
        EventBridge::new(app, handle, library, EnqueuePolicy::InOrder),
        commands,
    )
}

fn drain(commands: &mut mpsc::UnboundedReceiver<PlayerCommand>) -> Vec<PlayerCommand> {
    let mut out = Vec::new();
    while let Ok(cmd) = commands.try_recv() {
        out.push(cmd);
    }
    out
}

fn queue_tracks(bridge: &mut EventBridge, ids: &[&str]) {
    for id in ids {
        bridge.dispatch(Action::Enqueue(track(id)));
    }
}

#[test]
fn test_queue_cursor_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut queue = PlaybackQueue::new();

    for step in 0..5000 {
        match rng.gen_range(0..6) {
            0 | 1 => queue.enqueue(track(&format!("t{}", step))),
            2 => {
                let index = rng.gen_range(0..queue.len() + 2);
                let _ = queue.remove_at(index);
            }
            3 => {
                let index = rng.gen_range(0..queue.len() + 2);
                let _ = queue.set_current(Some(index));
            }
            4 => {
                let _ = queue.advance(rng.gen_range(-2..=2));
            }
            _ => {
                if rng.gen_bool(0.1) {
                    queue.clear();
                }
            }
        }

        if let Some(current) = queue.current_index() {
            assert!(current < queue.len(), "cursor {} past len {}", current, queue.len());
        }
        if queue.is_empty() {
            assert_eq!(queue.current_index(), None);
        }
    }
}

#[test]
fn test_stop_makes_pending_end_stale() {
    let (mut bridge, mut commands) = create_bridge(Arc::new(MemoryLibrary::default()));
    queue_tracks(&mut bridge, &["a", "b"]);

    bridge.dispatch(Action::PlaySelected(0));
    bridge.apply_event(PlayerEvent::new(1, PlayerEventKind::Started(track("a"))));
    bridge.dispatch(Action::Stop);
    assert_eq!(bridge.generation(), 2);

    bridge.apply_event(PlayerEvent::new(1, PlayerEventKind::Ended(track("a"))));

    let sent = drain(&mut commands);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].command, Command::Stop);
    assert_eq!(sent[1].generation, 2);
    assert_eq!(bridge.app().queue.current_index(), Some(0));
}

#[test]
fn test_end_of_track_plays_next_under_new_generation() {
    let (mut bridge, mut commands) = create_bridge(Arc::new(MemoryLibrary::default()));
    queue_tracks(&mut bridge, &["a", "b", "c"]);

    bridge.dispatch(Action::PlaySelected(0));
    bridge.apply_event(PlayerEvent::new(1, PlayerEventKind::Started(track("a"))));
    bridge.apply_event(PlayerEvent::new(1, PlayerEventKind::Ended(track("a"))));

    let sent = drain(&mut commands);
    let last = sent.last().expect("a play command");
    assert_eq!(last.generation, 2);
    assert!(matches!(&last.command, Command::Play { track, .. } if track.id == "b"));
    assert_eq!(bridge.app().queue.current_index(), Some(1));

    // Late progress from the first track must not move the clock.
    bridge.apply_event(PlayerEvent::new(
        1,
        PlayerEventKind::Progress {
            position_ms: 150_000,
            duration_ms: 200_000,
        },
    ));
    assert_eq!(bridge.app().position_ms, 0);
}

#[test]
fn test_end_of_last_track_goes_idle() {
    let (mut bridge, mut commands) = create_bridge(Arc::new(MemoryLibrary::default()));
    queue_tracks(&mut bridge, &["a", "b"]);

    bridge.dispatch(Action::PlaySelected(1));
    bridge.apply_event(PlayerEvent::new(1, PlayerEventKind::Started(track("b"))));
    drain(&mut commands);

    bridge.apply_event(PlayerEvent::new(1, PlayerEventKind::Ended(track("b"))));

    assert!(drain(&mut commands).is_empty());
    assert_eq!(bridge.app().queue.current_index(), None);
    assert!(bridge.app().now_playing.is_none());
    assert_eq!(bridge.app().queue.len(), 2);
}

#[test]
fn test_modal_stack_restores_focus() {
    let mut pages = PageController::new();
    assert_eq!(pages.page(), Page::Browser);

    pages.push_modal(Modal::AddToPlaylist);
    pages.push_modal(Modal::MessageBox);
    assert_eq!(pages.top_modal(), Some(Modal::MessageBox));
    assert_eq!(pages.switch_page(Page::Queue), Err(StateError::ModalOpen));

    assert_eq!(pages.pop_modal(), Ok(Modal::MessageBox));
    assert_eq!(pages.top_modal(), Some(Modal::AddToPlaylist));
    assert_eq!(pages.pop_modal(), Ok(Modal::AddToPlaylist));

    assert_eq!(pages.focus(), Focus::Page(Page::Browser));
    assert!(pages.modals().is_empty());
    assert_eq!(pages.pop_modal(), Err(StateError::EmptyModalStack));
}

#[test]
fn test_directory_is_fetched_once() {
    let library = Arc::new(MemoryLibrary::with_dirs(vec![node(
        "root",
        vec![Entry::Track(track("a"))],
    )]));

    let mut cache = NavigationCache::new();
    cache.get(library.as_ref(), "root").unwrap();
    cache.get(library.as_ref(), "root").unwrap();
    assert_eq!(library.fetches.load(Ordering::SeqCst), 1);

    cache.invalidate("root");
    cache.get(library.as_ref(), "root").unwrap();
    assert_eq!(library.fetches.load(Ordering::SeqCst), 2);
}

#[test]
fn test_browsing_twice_hits_cache() {
    let library = Arc::new(MemoryLibrary::with_dirs(vec![node(
        "root",
        vec![Entry::Track(track("a"))],
    )]));
    let (mut bridge, _commands) = create_bridge(Arc::clone(&library));
    bridge.bootstrap();

    bridge.dispatch(Action::OpenArtist(0));
    bridge.dispatch(Action::OpenDirectory("root".into()));
    assert_eq!(library.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(bridge.app().browser.row_count(), 1);
}

#[test]
fn test_star_key_toggles_selected_track() {
    let library = Arc::new(MemoryLibrary::with_dirs(vec![node(
        "root",
        vec![Entry::Track(track("a")), Entry::Track(track("b"))],
    )]));
    let (mut bridge, _commands) = create_bridge(library);
    bridge.bootstrap();
    let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

    bridge.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    bridge.handle_key(key('j'));
    bridge.handle_key(key('y'));
    assert!(bridge.app().browser.is_starred("b"));
    assert!(!bridge.app().browser.is_starred("a"));

    bridge.handle_key(key('y'));
    assert!(bridge.app().browser.starred.is_empty());
}

#[test]
fn test_enqueue_directory_keeps_listing_order() {
    let library = Arc::new(MemoryLibrary::with_dirs(vec![
        node(
            "root",
            vec![
                Entry::Track(track("t1")),
                folder("disc1"),
                Entry::Track(track("t4")),
            ],
        ),
        node("disc1", vec![Entry::Track(track("t2")), folder("bonus")]),
        node("bonus", vec![Entry::Track(track("t3"))]),
    ]));
    let (mut bridge, _commands) = create_bridge(library);

    bridge.dispatch(Action::EnqueueDirectory("root".into()));

    let ids: Vec<&str> = bridge
        .app()
        .queue
        .tracks()
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, ["t1", "t2", "t3", "t4"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_progress_events_are_applied_in_order() {
    let (mut bridge, _commands) = create_bridge(Arc::new(MemoryLibrary::default()));
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (ui_tx, ui_rx) = mpsc::channel(8);

    let producer = tokio::spawn(async move {
        for i in 1..=100u64 {
            let event = PlayerEvent::new(
                0,
                PlayerEventKind::Progress {
                    position_ms: i * 1000,
                    duration_ms: 200_000,
                },
            );
            event_tx.send(event).await.unwrap();
        }
        while event_tx.capacity() < EVENT_CHANNEL_CAPACITY {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        ui_tx.send(AppEvent::Input(Event::Key(quit))).await.unwrap();
        // Hold both senders until the bridge has quit.
        (event_tx, ui_tx)
    });

    let mut seen = Vec::new();
    let result = tokio::time::timeout(
        Duration::from_secs(10),
        bridge.run(event_rx, ui_rx, |app| {
            seen.push(app.position_ms);
            Ok(())
        }),
    )
    .await
    .expect("bridge did not quit");
    result.unwrap();
    producer.await.unwrap();

    // One redraw before the first input, then one after every applied event.
    let expected: Vec<u64> = std::iter::once(0).chain((1..=100).map(|i| i * 1000)).collect();
    assert_eq!(seen, expected);
    assert_eq!(bridge.applied_events(), 100);
    assert_eq!(bridge.app().position_ms, 100_000);
    assert!(!bridge.app().is_running);
}
