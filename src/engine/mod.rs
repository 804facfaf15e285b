// Shuffle engine - composes a base ordering with the artist-gap pass.
// The engine owns its RNG (seeded from settings or entropy) so runs are
// isolated from each other and from anything global.

pub mod order;
pub mod spacing;

pub use spacing::{SpacingReport, SpacingViolation};

use crate::config::ShuffleSettings;
use crate::model::Track;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

/// Past this many tracks the O(n^3) worst case of the spacing pass starts to
/// hurt; the engine logs a warning instead of imposing a timeout.
pub const LARGE_INPUT_GUIDELINE: usize = 5_000;

/// Result of one engine run: the reordered tracks plus the spacing
/// bookkeeping for diagnostics.
#[derive(Debug, Clone)]
pub struct ShuffleOutcome {
    pub tracks: Vec<Track>,
    pub spacing: SpacingReport,
}

/// Reorders a playlist: uniform or popularity-weighted base ordering, then
/// artist spacing on top. Pure apart from consuming its own RNG stream;
/// nothing persists between calls and the input is never mutated.
pub struct ShuffleEngine {
    min_artist_gap: usize,
    weighted: bool,
    rng: StdRng,
}

impl ShuffleEngine {
    /// Build an engine from settings. A configured seed makes runs
    /// reproducible; without one the RNG comes from entropy. Negative gap
    /// values are clamped to zero here, never rejected.
    pub fn new(settings: &ShuffleSettings) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            min_artist_gap: settings.effective_gap(),
            weighted: settings.weighted,
            rng,
        }
    }

    pub fn min_artist_gap(&self) -> usize {
        self.min_artist_gap
    }

    /// Reorder `tracks`. The outcome holds the same multiset of tracks in
    /// the new order plus the spacing report.
    ///
    /// Consecutive calls continue the engine's RNG stream, so two runs on
    /// the same input differ; build a fresh engine with the same seed to
    /// reproduce a run exactly.
    pub fn run(&mut self, tracks: &[Track]) -> ShuffleOutcome {
        if tracks.is_empty() {
            return ShuffleOutcome {
                tracks: Vec::new(),
                spacing: SpacingReport::default(),
            };
        }
        if tracks.len() > LARGE_INPUT_GUIDELINE {
            warn!(
                count = tracks.len(),
                guideline = LARGE_INPUT_GUIDELINE,
                "large playlist, spacing repair may be slow"
            );
        }

        let base = if self.weighted {
            order::weighted_order(tracks, &mut self.rng)
        } else {
            order::fisher_yates(tracks, &mut self.rng)
        };

        let (ordered, spacing) = spacing::enforce_gap(base, self.min_artist_gap);
        debug!(
            count = ordered.len(),
            weighted = self.weighted,
            gap = self.min_artist_gap,
            fallbacks = spacing.violation_count(),
            "shuffle complete"
        );

        ShuffleOutcome {
            tracks: ordered,
            spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArtistRef;
    use std::collections::HashMap;

    fn track(id: &str, artist: &str) -> Track {
        let mut t = Track::new(format!("song {id}"));
        t.id = Some(id.to_string());
        t.artists = vec![ArtistRef::new(Some(artist), Some(artist))];
        t
    }

    fn settings(gap: i64, weighted: bool, seed: u64) -> ShuffleSettings {
        ShuffleSettings {
            min_artist_gap: gap,
            weighted,
            rng_seed: Some(seed),
        }
    }

    fn identity_counts(tracks: &[Track]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for t in tracks {
            *counts.entry(t.identity().to_string()).or_insert(0) += 1;
        }
        counts
    }

    fn fixture() -> Vec<Track> {
        // 5 tracks, artists [A, B, A, C, B]
        vec![
            track("t1", "A"),
            track("t2", "B"),
            track("t3", "A"),
            track("t4", "C"),
            track("t5", "B"),
        ]
    }

    #[test]
    fn test_run_preserves_track_multiset() {
        let input = fixture();
        let mut engine = ShuffleEngine::new(&settings(3, false, 1));
        let out = engine.run(&input);
        assert_eq!(out.tracks.len(), input.len());
        assert_eq!(identity_counts(&out.tracks), identity_counts(&input));
    }

    #[test]
    fn test_same_seed_same_order() {
        // pinned fixture: two fresh engines with the same seed and settings
        // must produce bit-identical sequences
        let input = fixture();
        let out_a = ShuffleEngine::new(&settings(3, false, 1234)).run(&input);
        let out_b = ShuffleEngine::new(&settings(3, false, 1234)).run(&input);
        assert_eq!(out_a.tracks, out_b.tracks);
        assert_eq!(
            out_a.spacing.violation_count(),
            out_b.spacing.violation_count()
        );

        // holds for the weighted path too
        let w_a = ShuffleEngine::new(&settings(3, true, 99)).run(&input);
        let w_b = ShuffleEngine::new(&settings(3, true, 99)).run(&input);
        assert_eq!(w_a.tracks, w_b.tracks);
    }

    #[test]
    fn test_consecutive_runs_advance_the_stream() {
        // one engine, two runs: the stream moves on, but a fresh engine
        // still reproduces the first run
        let input: Vec<Track> = (0..20).map(|i| track(&format!("t{i}"), "X")).collect();
        let mut engine = ShuffleEngine::new(&settings(0, false, 7));
        let first = engine.run(&input);
        let _second = engine.run(&input);

        let fresh_first = ShuffleEngine::new(&settings(0, false, 7)).run(&input);
        assert_eq!(first.tracks, fresh_first.tracks);
    }

    #[test]
    fn test_empty_input() {
        let mut engine = ShuffleEngine::new(&settings(3, false, 1));
        let out = engine.run(&[]);
        assert!(out.tracks.is_empty());
        assert!(out.spacing.is_clean());
    }

    #[test]
    fn test_negative_gap_clamped() {
        let engine = ShuffleEngine::new(&settings(-5, false, 1));
        assert_eq!(engine.min_artist_gap(), 0);
    }

    #[test]
    fn test_gap_zero_keeps_base_ordering_spacing_free() {
        let input = fixture();
        let mut engine = ShuffleEngine::new(&settings(0, false, 11));
        let out = engine.run(&input);
        assert!(out.spacing.is_clean());
        assert_eq!(out.spacing.requested_gap, 0);
    }

    #[test]
    fn test_end_to_end_spacing_accounted() {
        // 10 tracks alternating a hot artist with unique artists, gap 3,
        // seed 42: every consecutive hot-artist pair in the output is either
        // far enough apart or enumerated in the report
        let mut input = Vec::new();
        for i in 0..10 {
            if i % 2 == 0 {
                input.push(track(&format!("t{i}"), "A"));
            } else {
                input.push(track(&format!("t{i}"), &format!("B{i}")));
            }
        }

        let mut engine = ShuffleEngine::new(&settings(3, false, 42));
        let out = engine.run(&input);

        let positions: Vec<usize> = out
            .tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.artist_key() == Some("A"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions.len(), 5);

        let mut short_pairs = 0;
        for pair in positions.windows(2) {
            let distance = pair[1] - pair[0];
            if distance < 3 {
                short_pairs += 1;
                assert!(
                    out.spacing
                        .violations
                        .iter()
                        .any(|v| v.index == pair[1] && v.artist_key == "A"),
                    "short pair at {} not reported",
                    pair[1]
                );
            }
        }
        assert_eq!(out.spacing.violation_count(), short_pairs);
    }

    #[test]
    fn test_input_left_untouched() {
        let input = fixture();
        let before = input.clone();
        let mut engine = ShuffleEngine::new(&settings(3, true, 5));
        let _ = engine.run(&input);
        assert_eq!(input, before);
    }
}
