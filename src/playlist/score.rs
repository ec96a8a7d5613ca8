//! Song scoring — genre overlap, energy closeness and familiarity, weighted.

use serde::{Deserialize, Serialize};

use super::normalize::{NormalizedSong, NormalizedVibe};

/// Relative weight of each scoring term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub genre: f64,
    pub energy: f64,
    pub familiarity: f64,
}

impl ScoreWeights {
    /// Weights for the genre, energy and familiarity terms.
    pub fn new(genre: f64, energy: f64, familiarity: f64) -> Self {
        Self {
            genre,
            energy,
            familiarity,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::new(0.6, 0.25, 0.15)
    }
}

/// The terms behind a song's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub genre_overlap: f64,
    pub energy_closeness: f64,
    pub familiarity: f64,
    pub total: f64,
}

/// Fraction of the target genres the song carries. An empty target list
/// yields 0 for every song.
pub fn genre_overlap(vibe: &NormalizedVibe, song: &NormalizedSong<'_>) -> f64 {
    let matches = song
        .genres
        .iter()
        .filter(|g| vibe.target_genres.contains(g))
        .count();
    matches as f64 / vibe.target_genres.len().max(1) as f64
}

/// `1 - |song energy - vibe energy|`.
pub fn energy_closeness(vibe: &NormalizedVibe, song: &NormalizedSong<'_>) -> f64 {
    1.0 - (song.energy.value() - vibe.energy.value()).abs()
}

/// Popularity for familiar-leaning sessions, its complement for novelty-leaning ones.
pub fn familiarity_term(vibe: &NormalizedVibe, song: &NormalizedSong<'_>) -> f64 {
    let p = song.familiarity();
    if vibe.prefers_novelty() {
        1.0 - p
    } else {
        p
    }
}

/// Score one normalized song against a normalized vibe.
pub fn score_song(
    weights: &ScoreWeights,
    vibe: &NormalizedVibe,
    song: &NormalizedSong<'_>,
) -> ScoreBreakdown {
    let genre_overlap = genre_overlap(vibe, song);
    let energy_closeness = energy_closeness(vibe, song);
    let familiarity = familiarity_term(vibe, song);
    ScoreBreakdown {
        genre_overlap,
        energy_closeness,
        familiarity,
        total: weights.genre * genre_overlap
            + weights.energy * energy_closeness
            + weights.familiarity * familiarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::song::CandidateSong;
    use crate::vibe::VibeProfile;
    use assert_approx_eq::assert_approx_eq;

    fn normalized(vibe: VibeProfile) -> NormalizedVibe {
        NormalizedVibe::from_profile(&vibe)
    }

    #[test]
    fn overlap_counts_song_genres_in_targets() {
        let vibe = normalized(VibeProfile::new().with_target_genres(["rock"]));
        let song = CandidateSong::new("a").with_genres(["rock", "pop"]);
        let n = NormalizedSong::from_song(&song).unwrap();
        assert_eq!(genre_overlap(&vibe, &n), 1.0);

        let vibe = normalized(VibeProfile::new().with_target_genres(["rock", "jazz", "soul", "funk"]));
        assert_eq!(genre_overlap(&vibe, &n), 0.25);
    }

    #[test]
    fn overlap_is_zero_without_targets() {
        let vibe = normalized(VibeProfile::new());
        let song = CandidateSong::new("a").with_genres(["rock"]);
        let n = NormalizedSong::from_song(&song).unwrap();
        assert_eq!(genre_overlap(&vibe, &n), 0.0);
    }

    #[test]
    fn energy_closer_is_better() {
        let vibe = normalized(VibeProfile::new().with_energy(0.8));
        let near = CandidateSong::new("a").with_energy(0.7);
        let far = CandidateSong::new("b").with_energy(0.1);
        let near = energy_closeness(&vibe, &NormalizedSong::from_song(&near).unwrap());
        let far = energy_closeness(&vibe, &NormalizedSong::from_song(&far).unwrap());
        assert_approx_eq!(near, 0.9);
        assert_approx_eq!(far, 0.3);
    }

    #[test]
    fn novelty_rewards_obscure_songs() {
        let vibe = normalized(VibeProfile::new().with_novelty(0.9));
        let song = CandidateSong::new("a").with_popularity(20);
        let n = NormalizedSong::from_song(&song).unwrap();
        assert_approx_eq!(familiarity_term(&vibe, &n), 0.8);
    }

    #[test]
    fn neutral_novelty_rewards_popular_songs() {
        let vibe = normalized(VibeProfile::new().with_novelty(0.5));
        let hit = CandidateSong::new("a").with_popularity(90);
        let deep_cut = CandidateSong::new("b").with_popularity(10);
        let hit = familiarity_term(&vibe, &NormalizedSong::from_song(&hit).unwrap());
        let deep_cut = familiarity_term(&vibe, &NormalizedSong::from_song(&deep_cut).unwrap());
        assert!(hit > deep_cut);
        assert_approx_eq!(hit, 0.9);
    }

    #[test]
    fn total_is_weighted_sum() {
        let vibe = normalized(
            VibeProfile::new()
                .with_target_genres(["rock", "pop"])
                .with_energy(0.6)
                .with_novelty(0.2),
        );
        let song = CandidateSong::new("a")
            .with_genres(["rock"])
            .with_energy(0.4)
            .with_popularity(70);
        let score = score_song(&ScoreWeights::default(), &vibe, &NormalizedSong::from_song(&song).unwrap());
        assert_approx_eq!(score.genre_overlap, 0.5);
        assert_approx_eq!(score.energy_closeness, 0.8);
        assert_approx_eq!(score.familiarity, 0.7);
        assert_approx_eq!(score.total, 0.6 * 0.5 + 0.25 * 0.8 + 0.15 * 0.7);
    }

    #[test]
    fn weights_yaml_partial() {
        let weights: ScoreWeights = serde_yaml::from_str("genre: 1.0\n").unwrap();
        assert_eq!(weights, ScoreWeights::new(1.0, 0.25, 0.15));
    }
}
