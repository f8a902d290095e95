//! Subsonic REST client used as the remote library.

use super::{DirectoryNode, Entry, IndexGroup, Playlist, RemoteLibrary, Track, Artist};
use crate::error::LibraryError;
use rand::Rng;
use reqwest::{Client, Url};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};

const API_VERSION: &str = "1.16.1";
const CLIENT_ID: &str = "quaver";

pub struct SubsonicLibrary {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl SubsonicLibrary {
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self, LibraryError> {
        let http = Client::builder()
            .user_agent(concat!("quaver/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn auth_params(&self) -> Vec<(&'static str, String)> {
        let salt = format!("{:016x}", rand::thread_rng().gen::<u64>());
        let token = format!("{:x}", md5::compute(format!("{}{}", self.password, salt)));
        vec![
            ("u", self.username.clone()),
            ("t", token),
            ("s", salt),
            ("v", API_VERSION.to_string()),
            ("c", CLIENT_ID.to_string()),
            ("f", "json".to_string()),
        ]
    }

    fn api_url(&self, method: &str, params: &[(&str, &str)]) -> Result<Url, LibraryError> {
        let endpoint = format!("{}/rest/{}.view", self.base_url, method);
        let auth = self.auth_params();
        let pairs = auth
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .chain(params.iter().copied());
        Url::parse_with_params(&endpoint, pairs)
            .map_err(|e| LibraryError::Network(format!("invalid server url {}: {}", endpoint, e)))
    }

    fn request(&self, method: &str, params: &[(&str, &str)]) -> Result<Value, LibraryError> {
        let url = self.api_url(method, params)?;
        tracing::debug!(method, "subsonic request");
        let http = self.http.clone();
        let parsed = wait(async move {
            let value: Value = http.get(url).send().await?.error_for_status()?.json().await?;
            Ok::<Value, LibraryError>(value)
        })?;
        unwrap_response(parsed)
    }
}

/// Drive an async request to completion from synchronous library code.
/// Inside the multi-threaded runtime the worker is handed over to
/// `block_in_place`; anywhere else the request gets a scratch runtime on
/// its own thread.
fn wait<T, F>(fut: F) -> Result<T, LibraryError>
where
    T: Send,
    F: Future<Output = Result<T, LibraryError>> + Send,
{
    if let Ok(handle) = Handle::try_current() {
        if handle.runtime_flavor() == RuntimeFlavor::MultiThread {
            return tokio::task::block_in_place(|| handle.block_on(fut));
        }
    }

    std::thread::scope(|scope| {
        scope
            .spawn(|| -> Result<T, LibraryError> {
                Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| LibraryError::Network(format!("no runtime for request: {}", e)))?
                    .block_on(fut)
            })
            .join()
            .unwrap_or_else(|_| Err(LibraryError::Network("request thread panicked".into())))
    })
}

impl RemoteLibrary for SubsonicLibrary {
    fn get_indexes(&self) -> Result<Vec<IndexGroup>, LibraryError> {
        let body = self.request("getIndexes", &[])?;
        parse_indexes(&body)
    }

    fn get_music_directory(&self, id: &str) -> Result<DirectoryNode, LibraryError> {
        let body = self.request("getMusicDirectory", &[("id", id)])?;
        parse_directory(&body, |track_id| self.play_url(track_id))
    }

    fn play_url(&self, track_id: &str) -> String {
        match self.api_url("stream", &[("id", track_id)]) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!("no stream url for {}: {}", track_id, e);
                String::new()
            }
        }
    }

    fn get_playlists(&self) -> Result<Vec<Playlist>, LibraryError> {
        let body = self.request("getPlaylists", &[])?;
        Ok(parse_playlists(&body))
    }

    fn get_playlist(&self, id: &str) -> Result<Vec<Track>, LibraryError> {
        let body = self.request("getPlaylist", &[("id", id)])?;
        let playlist = body
            .get("playlist")
            .ok_or_else(|| LibraryError::Decode("missing playlist".into()))?;
        let fallback = str_field(playlist, "name");
        Ok(array_or_single(playlist.get("entry"))
            .into_iter()
            .filter_map(|song| parse_track(song, &fallback, |track_id| self.play_url(track_id)))
            .collect())
    }

    fn create_playlist(&self, name: &str) -> Result<(), LibraryError> {
        self.request("createPlaylist", &[("name", name)]).map(|_| ())
    }

    fn delete_playlist(&self, id: &str) -> Result<(), LibraryError> {
        self.request("deletePlaylist", &[("id", id)]).map(|_| ())
    }

    fn add_to_playlist(&self, playlist_id: &str, track_ids: &[String]) -> Result<(), LibraryError> {
        let mut params = vec![("playlistId", playlist_id)];
        params.extend(track_ids.iter().map(|id| ("songIdToAdd", id.as_str())));
        self.request("updatePlaylist", &params).map(|_| ())
    }

    fn get_starred(&self) -> Result<Vec<String>, LibraryError> {
        let body = self.request("getStarred", &[])?;
        Ok(parse_starred(&body))
    }

    fn star(&self, id: &str) -> Result<(), LibraryError> {
        self.request("star", &[("id", id)]).map(|_| ())
    }

    fn unstar(&self, id: &str) -> Result<(), LibraryError> {
        self.request("unstar", &[("id", id)]).map(|_| ())
    }
}

/// Strip the `subsonic-response` envelope, turning `status: failed` into an error.
fn unwrap_response(parsed: Value) -> Result<Value, LibraryError> {
    let body = match parsed {
        Value::Object(mut map) => map
            .remove("subsonic-response")
            .ok_or_else(|| LibraryError::Decode("missing subsonic-response".into()))?,
        _ => return Err(LibraryError::Decode("response is not an object".into())),
    };

    if body.get("status").and_then(Value::as_str) != Some("ok") {
        let error = body.get("error");
        return Err(LibraryError::Api {
            code: error
                .and_then(|e| e.get("code"))
                .and_then(Value::as_i64)
                .unwrap_or(0),
            message: error
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Subsonic returned an error")
                .to_string(),
        });
    }
    Ok(body)
}

fn array_or_single(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item @ Value::Object(_)) => vec![item],
        _ => Vec::new(),
    }
}

// Ids are strings on most servers but plain numbers on some.
fn str_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn u64_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn parse_track<F>(song: &Value, fallback_artist: &str, locator: F) -> Option<Track>
where
    F: Fn(&str) -> String,
{
    let id = str_field(song, "id");
    if id.is_empty() {
        return None;
    }
    let artist = str_field(song, "artist");
    Some(Track {
        locator: locator(&id),
        title: str_field(song, "title"),
        artist: if artist.is_empty() {
            fallback_artist.to_string()
        } else {
            artist
        },
        album: str_field(song, "album"),
        duration_ms: u64_field(song, "duration") * 1000,
        id,
    })
}

pub(crate) fn parse_indexes(body: &Value) -> Result<Vec<IndexGroup>, LibraryError> {
    let indexes = body
        .get("indexes")
        .ok_or_else(|| LibraryError::Decode("missing indexes".into()))?;
    Ok(array_or_single(indexes.get("index"))
        .into_iter()
        .map(|index| IndexGroup {
            name: str_field(index, "name"),
            artists: array_or_single(index.get("artist"))
                .into_iter()
                .map(|artist| Artist {
                    id: str_field(artist, "id"),
                    name: str_field(artist, "name"),
                })
                .filter(|artist| !artist.id.is_empty())
                .collect(),
        })
        .collect())
}

/// Children are ordered by track number; the sort is stable so
/// sub-directories (no track number) keep the server's order ahead of songs.
pub(crate) fn parse_directory<F>(body: &Value, locator: F) -> Result<DirectoryNode, LibraryError>
where
    F: Fn(&str) -> String,
{
    let dir = body
        .get("directory")
        .ok_or_else(|| LibraryError::Decode("missing directory".into()))?;
    let name = str_field(dir, "name");
    let parent = Some(str_field(dir, "parent")).filter(|p| !p.is_empty());

    let mut children: Vec<(u64, Entry)> = array_or_single(dir.get("child"))
        .into_iter()
        .filter_map(|child| {
            let number = u64_field(child, "track");
            if child.get("isDir").and_then(Value::as_bool).unwrap_or(false) {
                let id = str_field(child, "id");
                (!id.is_empty()).then(|| {
                    (
                        number,
                        Entry::Directory {
                            id,
                            title: str_field(child, "title"),
                        },
                    )
                })
            } else {
                parse_track(child, &name, &locator).map(|t| (number, Entry::Track(t)))
            }
        })
        .collect();
    children.sort_by_key(|(number, _)| *number);

    Ok(DirectoryNode {
        id: str_field(dir, "id"),
        parent,
        name,
        entries: children.into_iter().map(|(_, e)| e).collect(),
    })
}

pub(crate) fn parse_playlists(body: &Value) -> Vec<Playlist> {
    let Some(playlists) = body.get("playlists") else {
        return Vec::new();
    };
    array_or_single(playlists.get("playlist"))
        .into_iter()
        .map(|p| Playlist {
            id: str_field(p, "id"),
            name: str_field(p, "name"),
            song_count: u64_field(p, "songCount") as u32,
        })
        .collect()
}

pub(crate) fn parse_starred(body: &Value) -> Vec<String> {
    let Some(starred) = body.get("starred") else {
        return Vec::new();
    };
    ["artist", "album", "song"]
        .iter()
        .flat_map(|kind| array_or_single(starred.get(*kind)))
        .map(|item| str_field(item, "id"))
        .filter(|id| !id.is_empty())
        .collect()
}
