// Artist-gap enforcement - the post-pass that keeps one artist from
// clumping together in the final order. Greedy, single pass, best effort:
// when the window genuinely cannot be honored the track is appended anyway
// and the miss is recorded instead of raised.

use crate::model::Track;
use std::collections::HashMap;
use tracing::debug;

/// One placement that could not honor the requested gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpacingViolation {
    /// Position of the track in the output sequence.
    pub index: usize,
    /// Grouping key the collision happened on.
    pub artist_key: String,
    /// Distance actually achieved to the previous occurrence (< gap).
    pub distance: usize,
}

/// Outcome bookkeeping for one enforcement pass. Collisions that fell back
/// to an append land here so callers can count and inspect them.
#[derive(Debug, Clone, Default)]
pub struct SpacingReport {
    pub requested_gap: usize,
    pub violations: Vec<SpacingViolation>,
}

impl SpacingReport {
    fn new(requested_gap: usize) -> Self {
        Self {
            requested_gap,
            violations: Vec::new(),
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Re-space a sequence so consecutive tracks sharing an artist key sit at
/// least `gap` positions apart, where possible.
///
/// `gap == 0` is the identity transform. Tracks without an artist key are
/// exempt: they are placed unconditionally and never counted as colliding.
///
/// Strategy per track, in input order:
/// - no recent same-key occurrence within the window: append, remember the
///   index
/// - otherwise scan candidate insertion slots from the front; the first slot
///   far enough past the previous occurrence takes the track (shifting the
///   tail right and rebuilding the index bookkeeping)
/// - no such slot: append at the end anyway and record the violation
///
/// Spacing is best effort, not guaranteed: the slot scan only checks the
/// moved track's own distance to its previous occurrence, not the spacing of
/// whatever ends up next to it. Worst case is O(n^3) with heavy collisions;
/// fine for playlists up to the low thousands (the engine facade warns past
/// that).
pub fn enforce_gap(tracks: Vec<Track>, gap: usize) -> (Vec<Track>, SpacingReport) {
    let mut report = SpacingReport::new(gap);
    if gap == 0 {
        return (tracks, report);
    }

    let mut placed: Vec<Track> = Vec::with_capacity(tracks.len());
    let mut last_seen: HashMap<String, usize> = HashMap::new();

    for track in tracks {
        let Some(key) = track.artist_key().map(str::to_owned) else {
            // unknown artist: treat as unique, never constrain
            placed.push(track);
            continue;
        };

        match last_seen.get(&key).copied() {
            None => {
                last_seen.insert(key, placed.len());
                placed.push(track);
            }
            Some(last) if placed.len() - last >= gap => {
                last_seen.insert(key, placed.len());
                placed.push(track);
            }
            Some(last) => match find_open_slot(placed.len(), last, gap) {
                Some(slot) if slot < placed.len() => {
                    placed.insert(slot, track);
                    // shifted indices invalidate every entry, rebuild
                    rebuild_last_seen(&placed, &mut last_seen);
                }
                _ => {
                    let distance = placed.len() - last;
                    debug!(
                        artist = %key,
                        distance,
                        gap,
                        "no slot satisfies the gap, appending as best effort"
                    );
                    report.violations.push(SpacingViolation {
                        index: placed.len(),
                        artist_key: key.clone(),
                        distance,
                    });
                    last_seen.insert(key, placed.len());
                    placed.push(track);
                }
            },
        }
    }

    (placed, report)
}

/// First insertion index in `0..=result_len` sitting at least `gap` past the
/// previous occurrence of the colliding key, scanning front to back.
fn find_open_slot(result_len: usize, last_index: usize, gap: usize) -> Option<usize> {
    (0..=result_len).find(|&candidate| candidate >= last_index + gap)
}

/// Full rescan of the placed sequence, refreshing every key's most recent
/// index. O(n), paid only after an interior insertion.
fn rebuild_last_seen(placed: &[Track], last_seen: &mut HashMap<String, usize>) {
    last_seen.clear();
    for (idx, track) in placed.iter().enumerate() {
        if let Some(key) = track.artist_key() {
            last_seen.insert(key.to_owned(), idx);
        }
    }
}
