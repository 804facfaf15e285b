// Track and playlist models - the canonical shapes everything else consumes
// Catalog payloads come in several slightly different envelopes, so the
// normalizer here is deliberately permissive: bad fields become defaults,
// never errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Popularity substituted when a track carries none (or a bogus value).
pub const DEFAULT_POPULARITY: u8 = 50;

/// Duration substituted for timing-dependent consumers when a track has none.
pub const DEFAULT_DURATION_MS: u64 = 180_000;

/// Display name for tracks that arrive without one.
pub const UNKNOWN_NAME: &str = "(Unknown)";

/// One artist entry as the catalog reports it. Both fields can be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl ArtistRef {
    pub fn new(id: Option<&str>, name: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_owned),
            name: name.map(str::to_owned),
        }
    }
}

/// Minimal representation of a playable track.
///
/// The engine never mutates these fields, only the position of the track
/// inside a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub uri: Option<String>,
    pub name: String,
    /// Ordered artist credits; the first entry is the primary artist.
    pub artists: Vec<ArtistRef>,
    /// 0-100 when present. Out-of-range payload values are dropped at the
    /// normalization boundary.
    pub popularity: Option<u8>,
    pub duration_ms: Option<u64>,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            uri: None,
            name: name.into(),
            artists: Vec::new(),
            popularity: None,
            duration_ms: None,
        }
    }

    /// Identity used for ordering purposes: id, else uri, else display name.
    /// Stable for the lifetime of the track; the pipeline never rewrites it.
    pub fn identity(&self) -> &str {
        self.id
            .as_deref()
            .or(self.uri.as_deref())
            .unwrap_or(&self.name)
    }

    /// Grouping key for artist spacing: the primary artist's id when present
    /// and non-empty, else its name, else `None`. Tracks without a key are
    /// exempt from spacing - they never collide with anything.
    pub fn artist_key(&self) -> Option<&str> {
        let primary = self.artists.first()?;
        primary
            .id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| primary.name.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn main_artist_name(&self) -> &str {
        self.artists
            .first()
            .and_then(|a| a.name.as_deref())
            .unwrap_or("Unknown")
    }

    /// Popularity with the documented default applied.
    pub fn effective_popularity(&self) -> u8 {
        self.popularity.unwrap_or(DEFAULT_POPULARITY)
    }

    /// Duration with the documented default applied.
    pub fn effective_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms.unwrap_or(DEFAULT_DURATION_MS))
    }

    /// Normalize one catalog payload into a `Track`.
    ///
    /// Accepts either the playlist-item envelope `{"track": {...}}` or a bare
    /// track object. Missing or malformed fields fall back to defaults; this
    /// never fails.
    pub fn from_payload(item: &Value) -> Self {
        // unwrap the playlist-item envelope if there is one
        let obj = match item.get("track") {
            Some(inner) if !inner.is_null() => inner,
            Some(_) => {
                warn!("playlist item carried a null track object");
                return Self::new(UNKNOWN_NAME);
            }
            None => item,
        };

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| obj.get("title").and_then(Value::as_str))
            .unwrap_or(UNKNOWN_NAME)
            .to_string();

        let artists = obj
            .get("artists")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(artist_from_payload).collect())
            .unwrap_or_default();

        // only keep popularity if it is an integer inside the expected range
        let popularity = obj
            .get("popularity")
            .and_then(Value::as_i64)
            .filter(|p| (0..=100).contains(p))
            .map(|p| p as u8);

        let duration_ms = obj
            .get("duration_ms")
            .and_then(Value::as_i64)
            .filter(|d| *d >= 0)
            .map(|d| d as u64);

        Self {
            id: obj.get("id").and_then(Value::as_str).map(str::to_owned),
            uri: obj.get("uri").and_then(Value::as_str).map(str::to_owned),
            name,
            artists,
            popularity,
            duration_ms,
        }
    }
}

fn artist_from_payload(entry: &Value) -> ArtistRef {
    ArtistRef {
        id: entry.get("id").and_then(Value::as_str).map(str::to_owned),
        name: entry.get("name").and_then(Value::as_str).map(str::to_owned),
    }
}

/// An ordered collection of tracks, as fetched from the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Option<String>,
    pub name: String,
    pub owner_id: Option<String>,
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            owner_id: None,
            tracks: Vec::new(),
        }
    }

    pub fn append(&mut self, track: Track) {
        self.tracks.push(track);
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

    /// Playable references in order, skipping tracks that have none.
    /// This is the shape a persistence collaborator pushes back to the
    /// catalog in batches.
    pub fn track_uris(&self) -> Vec<&str> {
        self.tracks.iter().filter_map(|t| t.uri.as_deref()).collect()
    }

    /// Build a playlist from a catalog playlist payload. Handles both the
    /// paginated `{"tracks": {"items": [...]}}` shape and a plain array
    /// under `tracks`. Permissive like the track normalizer.
    pub fn from_payload(payload: &Value) -> Self {
        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("(Unnamed)")
            .to_string();

        let raw_tracks = match payload.get("tracks") {
            Some(field) if field.get("items").is_some() => {
                field.get("items").and_then(Value::as_array).cloned()
            }
            Some(field) => field.as_array().cloned(),
            None => None,
        }
        .unwrap_or_default();

        let mut playlist = Self {
            id: payload.get("id").and_then(Value::as_str).map(str::to_owned),
            name,
            owner_id: payload
                .get("owner")
                .and_then(|o| o.get("id"))
                .and_then(Value::as_str)
                .map(str::to_owned),
            tracks: Vec::new(),
        };
        for track in normalize_tracks(&raw_tracks) {
            playlist.append(track);
        }
        playlist
    }
}

/// Input boundary for the engine: either already-canonical tracks or raw
/// payloads that still need normalizing. The engine itself only ever sees
/// canonical tracks.
#[derive(Debug, Clone)]
pub enum TrackSource {
    Canonical(Vec<Track>),
    Raw(Vec<Value>),
}

impl TrackSource {
    pub fn into_tracks(self) -> Vec<Track> {
        match self {
            Self::Canonical(tracks) => tracks,
            Self::Raw(items) => normalize_tracks(&items),
        }
    }
}

/// Normalize a batch of raw catalog payloads.
pub fn normalize_tracks(items: &[Value]) -> Vec<Track> {
    let tracks: Vec<Track> = items.iter().map(Track::from_payload).collect();
    debug!(count = tracks.len(), "normalized catalog payloads");
    tracks
}
