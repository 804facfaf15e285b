use kerfuffle::model::ArtistRef;
use kerfuffle::{ShuffleEngine, ShuffleSettings, Track};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("🔀 Kerfuffle Shuffle Smoke Test");
    println!("===============================");

    // Synthetic playlist: one hot artist sprinkled through a long tail of
    // one-off artists, popularity spread across the whole range
    let mut tracks = Vec::new();
    for i in 0..40 {
        let mut t = Track::new(format!("Song {i}"));
        t.id = Some(format!("track{i}"));
        t.uri = Some(format!("spotify:track:track{i}"));
        t.popularity = Some(((i * 7) % 101) as u8);
        let artist = if i % 4 == 0 {
            "The Repeat Offenders".to_string()
        } else {
            format!("One Hit Wonder {i}")
        };
        t.artists = vec![ArtistRef::new(Some(&artist), Some(&artist))];
        tracks.push(t);
    }
    println!("📋 Built {} synthetic tracks", tracks.len());

    for weighted in [false, true] {
        let settings = ShuffleSettings {
            min_artist_gap: 3,
            weighted,
            rng_seed: Some(42),
        };
        let mut engine = ShuffleEngine::new(&settings);
        let outcome = engine.run(&tracks);

        let label = if weighted { "weighted" } else { "uniform" };
        println!();
        println!("▶ {} ordering, gap {}", label, engine.min_artist_gap());
        for (i, track) in outcome.tracks.iter().take(8).enumerate() {
            println!(
                "{}. {} - {} (pop {})",
                i + 1,
                track.name,
                track.main_artist_name(),
                track.effective_popularity()
            );
        }
        println!("... and {} more", outcome.tracks.len() - 8);
        println!(
            "📊 spacing fallbacks: {} of {} placements",
            outcome.spacing.violation_count(),
            outcome.tracks.len()
        );
        for v in outcome.spacing.violations.iter().take(5) {
            println!(
                "   {} at index {} (distance {}, wanted {})",
                v.artist_key, v.index, v.distance, outcome.spacing.requested_gap
            );
        }
    }

    Ok(())
}
