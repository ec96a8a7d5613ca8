//! Normalization pass — lower-cased genre sets and coerced numeric fields.

use std::collections::BTreeSet;

use tracing::trace;

use super::song::CandidateSong;
use crate::coerce::{self, Coerced};
use crate::vibe::VibeProfile;

/// A vibe profile ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVibe {
    pub target_genres: Vec<String>,
    pub hard_no_genres: BTreeSet<String>,
    pub energy: Coerced<f64>,
    pub new_vs_familiar: Coerced<f64>,
}

impl NormalizedVibe {
    /// Lower-case genres and clamp energy and novelty into `[0, 1]`.
    pub fn from_profile(vibe: &VibeProfile) -> Self {
        Self {
            target_genres: vibe.target_genres.iter().map(|g| g.to_lowercase()).collect(),
            hard_no_genres: vibe.hard_no_genres.iter().map(|g| g.to_lowercase()).collect(),
            energy: coerce::unit(Some(vibe.energy)),
            new_vs_familiar: coerce::unit(Some(vibe.new_vs_familiar)),
        }
    }

    /// Novelty above the neutral point rewards less popular songs.
    pub fn prefers_novelty(&self) -> bool {
        self.new_vs_familiar.value() > coerce::NEUTRAL_UNIT
    }

    /// Whether a song carries any vetoed genre.
    pub fn vetoes(&self, song: &NormalizedSong<'_>) -> bool {
        song.genres.iter().any(|g| self.hard_no_genres.contains(g))
    }
}

/// A candidate song ready for scoring, borrowing the caller's record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSong<'a> {
    pub song: &'a CandidateSong,
    pub id: &'a str,
    pub genres: BTreeSet<String>,
    pub energy: Coerced<f64>,
    pub popularity: Coerced<f64>,
}

impl<'a> NormalizedSong<'a> {
    /// Normalize one song. `None` when it has no usable identifier.
    pub fn from_song(song: &'a CandidateSong) -> Option<Self> {
        let id = song.song_id()?;
        Some(Self {
            song,
            id,
            genres: song.genres.iter().map(str::to_lowercase).collect(),
            energy: coerce::unit(song.energy),
            popularity: coerce::popularity(song.popularity),
        })
    }

    /// Popularity on a unit scale.
    pub fn familiarity(&self) -> f64 {
        (self.popularity.value() / coerce::MAX_POPULARITY).clamp(0.0, 1.0)
    }
}

/// Normalize a pool, silently dropping songs without an identifier.
pub fn normalize_songs(songs: &[CandidateSong]) -> Vec<NormalizedSong<'_>> {
    songs
        .iter()
        .filter_map(|song| {
            let normalized = NormalizedSong::from_song(song);
            match &normalized {
                None => trace!(name = ?song.name, "dropping song without identifier"),
                Some(n) if n.energy.was_corrected() || n.popularity.was_corrected() => {
                    trace!(id = n.id, energy = ?n.energy, popularity = ?n.popularity, "coerced song fields");
                }
                Some(_) => {}
            }
            normalized
        })
        .collect()
}
