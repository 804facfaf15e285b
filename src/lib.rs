// Kerfuffle - playlist shuffle engine
// Takes a playlist, gives back a random (or popularity-leaning) order where
// the same artist rarely plays twice in a row. Auth, catalog fetching and
// playback live elsewhere; this crate is just the ordering brain.

pub mod config; // settings, file-backed with defaults
pub mod engine; // base orderings + artist spacing
pub mod model; // canonical track/playlist shapes and payload normalization

// Export the stuff other modules actually use
pub use config::{Config, ShuffleSettings};
pub use engine::{ShuffleEngine, ShuffleOutcome, SpacingReport, SpacingViolation};
pub use model::{normalize_tracks, ArtistRef, Playlist, Track, TrackSource};
