// Base orderings - uniform Fisher-Yates and the popularity-biased sort.
// Both take the RNG from the caller so runs are reproducible under a
// seeded generator and never touch global state.

use crate::model::Track;
use rand::Rng;
use std::cmp::Ordering;

/// Uniform random permutation via the swap-variant Fisher-Yates.
///
/// Walks `i` from the back, draws `j` uniformly in `[0, i]` and swaps.
/// Works on a copy; the caller's slice is left alone.
pub fn fisher_yates<R: Rng>(tracks: &[Track], rng: &mut R) -> Vec<Track> {
    let mut arr = tracks.to_vec();
    for i in (1..arr.len()).rev() {
        let j = rng.gen_range(0..=i);
        arr.swap(i, j);
    }
    arr
}

/// Popularity-biased ordering.
///
/// Each track gets `score = u * (120 - popularity)` with `u` uniform in
/// `[0, 1)`, then the list is sorted ascending by score. A popular track's
/// achievable score range is narrower and closer to zero, so it tends to
/// land earlier.
///
/// This is a deliberate approximation: it is *not* weighted sampling
/// without replacement, just a cheap, explainable bias. Kept as-is on
/// purpose.
pub fn weighted_order<R: Rng>(tracks: &[Track], rng: &mut R) -> Vec<Track> {
    let mut scored: Vec<(f64, Track)> = tracks
        .iter()
        .map(|t| {
            let pop = f64::from(t.effective_popularity());
            (rng.gen::<f64>() * (120.0 - pop), t.clone())
        })
        .collect();

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(_, t)| t).collect()
}
