//! Playlist engine — vibe + candidate pool → ranked, capped playlist.
//!
//! Stages: normalize → hard-no filter → score → stable rank → constraints.
//! Every stage is total: malformed data is coerced, never rejected, and the
//! worst case is an empty playlist.

pub mod constraints;
pub mod normalize;
pub mod score;
pub mod song;

use serde::Serialize;
use tracing::debug;

pub use constraints::{
    apply_constraints, PlaylistLimits, PlaylistSettings, DEFAULT_MAX_LENGTH,
    DEFAULT_MAX_PER_ARTIST,
};
pub use normalize::{normalize_songs, NormalizedSong, NormalizedVibe};
pub use score::{score_song, ScoreBreakdown, ScoreWeights};
pub use song::{CandidateSong, GenreTags};

use crate::vibe::VibeProfile;

/// A scored song, in rank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSong<'a> {
    #[serde(flatten)]
    pub song: &'a CandidateSong,
    #[serde(skip)]
    pub id: &'a str,
    pub score: ScoreBreakdown,
}

impl<'a> RankedSong<'a> {
    fn constraint_key(&self) -> (&str, Option<&str>) {
        (self.id, self.song.capped_artist())
    }
}

/// Ranks and constrains candidate pools against a vibe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaylistEngine {
    weights: ScoreWeights,
    limits: PlaylistLimits,
}

impl PlaylistEngine {
    /// Engine with the standard weights and limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scoring weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Limits used when the caller passes no settings, or non-positive ones.
    pub fn with_limits(mut self, limits: PlaylistLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Limits applied when a request carries no usable settings.
    pub fn limits(&self) -> &PlaylistLimits {
        &self.limits
    }

    /// Score every usable, non-vetoed song and sort by descending score.
    /// Equal scores keep pool order.
    pub fn rank<'a>(
        &self,
        vibe: Option<&VibeProfile>,
        songs: &'a [CandidateSong],
    ) -> Vec<RankedSong<'a>> {
        let vibe = match vibe {
            Some(v) if !songs.is_empty() => NormalizedVibe::from_profile(v),
            _ => return Vec::new(),
        };

        let normalized = normalize_songs(songs);
        let usable = normalized.len();
        let allowed: Vec<NormalizedSong<'a>> =
            normalized.into_iter().filter(|s| !vibe.vetoes(s)).collect();
        debug!(
            pool = songs.len(),
            dropped = songs.len() - usable,
            vetoed = usable - allowed.len(),
            "normalized candidates"
        );
        if allowed.is_empty() {
            return Vec::new();
        }

        let mut ranked = self.score_all(&vibe, &allowed);
        ranked.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
        ranked
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all<'a>(&self, vibe: &NormalizedVibe, songs: &[NormalizedSong<'a>]) -> Vec<RankedSong<'a>> {
        songs.iter().map(|s| self.ranked(vibe, s)).collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all<'a>(&self, vibe: &NormalizedVibe, songs: &[NormalizedSong<'a>]) -> Vec<RankedSong<'a>> {
        use rayon::prelude::*;
        songs.par_iter().map(|s| self.ranked(vibe, s)).collect()
    }

    fn ranked<'a>(&self, vibe: &NormalizedVibe, song: &NormalizedSong<'a>) -> RankedSong<'a> {
        RankedSong {
            song: song.song,
            id: song.id,
            score: score_song(&self.weights, vibe, song),
        }
    }

    /// Apply length, artist and duplicate constraints to a ranked list.
    pub fn select<'a>(
        &self,
        ranked: Vec<RankedSong<'a>>,
        settings: Option<&PlaylistSettings>,
    ) -> Vec<RankedSong<'a>> {
        let limits = self.limits.apply(settings);
        let considered = ranked.len();
        let accepted = apply_constraints(ranked, &limits, RankedSong::constraint_key);
        debug!(
            considered,
            accepted = accepted.len(),
            max_length = limits.max_length,
            max_per_artist = limits.max_per_artist,
            "applied playlist constraints"
        );
        accepted
    }

    /// Rank and constrain, keeping the score breakdown.
    pub fn playlist<'a>(
        &self,
        vibe: Option<&VibeProfile>,
        songs: &'a [CandidateSong],
        settings: Option<&PlaylistSettings>,
    ) -> Vec<RankedSong<'a>> {
        self.select(self.rank(vibe, songs), settings)
    }

    /// The final playlist: references to the caller's songs, best first.
    pub fn generate<'a>(
        &self,
        vibe: Option<&VibeProfile>,
        songs: &'a [CandidateSong],
        settings: Option<&PlaylistSettings>,
    ) -> Vec<&'a CandidateSong> {
        self.playlist(vibe, songs, settings)
            .into_iter()
            .map(|r| r.song)
            .collect()
    }
}

/// Generate a playlist with the default engine.
pub fn generate_playlist<'a>(
    vibe: Option<&VibeProfile>,
    songs: &'a [CandidateSong],
    settings: Option<&PlaylistSettings>,
) -> Vec<&'a CandidateSong> {
    PlaylistEngine::new().generate(vibe, songs, settings)
}

/// What a caller needs to publish a playlist to an external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistSummary {
    pub track_ids: Vec<String>,
    pub track_count: usize,
}

impl PlaylistSummary {
    /// Summarize a constrained playlist in rank order.
    pub fn from_ranked(playlist: &[RankedSong<'_>]) -> Self {
        let track_ids: Vec<String> = playlist.iter().map(|r| r.id.to_string()).collect();
        Self {
            track_count: track_ids.len(),
            track_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<CandidateSong> {
        vec![
            CandidateSong::new("a").with_genres(["rock"]).with_energy(0.8).with_artist("x"),
            CandidateSong::new("b").with_genres(["pop"]).with_energy(0.8).with_artist("y"),
            CandidateSong::new("c").with_genres(["rock", "metal"]).with_energy(0.8),
            CandidateSong::default().with_genres(["rock"]),
        ]
    }

    #[test]
    fn absent_vibe_gives_empty_playlist() {
        let songs = pool();
        assert!(generate_playlist(None, &songs, None).is_empty());
    }

    #[test]
    fn empty_pool_gives_empty_playlist() {
        let vibe = VibeProfile::new();
        assert!(generate_playlist(Some(&vibe), &[], None).is_empty());
    }

    #[test]
    fn fully_vetoed_pool_gives_empty_playlist() {
        let vibe = VibeProfile::new().with_hard_nos(["rock", "pop"]);
        let songs = pool();
        assert!(generate_playlist(Some(&vibe), &songs, None).is_empty());
    }

    #[test]
    fn ranks_genre_matches_first_and_drops_vetoed() {
        let vibe = VibeProfile::new()
            .with_target_genres(["rock"])
            .with_hard_nos(["metal"])
            .with_energy(0.8);
        let songs = pool();
        let playlist = generate_playlist(Some(&vibe), &songs, None);
        let ids: Vec<_> = playlist.iter().filter_map(|s| s.song_id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(std::ptr::eq(playlist[0], &songs[0]));
    }

    #[test]
    fn equal_scores_keep_pool_order() {
        let vibe = VibeProfile::new();
        let songs: Vec<_> = ["s1", "s2", "s3"].iter().map(|id| CandidateSong::new(*id)).collect();
        let ranked = PlaylistEngine::new().rank(Some(&vibe), &songs);
        let ids: Vec<_> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn engine_limits_apply_without_settings() {
        let vibe = VibeProfile::new();
        let songs: Vec<_> = (0..10).map(|i| CandidateSong::new(format!("s{i}"))).collect();
        let engine = PlaylistEngine::new().with_limits(PlaylistLimits {
            max_length: 3,
            max_per_artist: 2,
        });
        assert_eq!(engine.generate(Some(&vibe), &songs, None).len(), 3);
        let settings = PlaylistSettings::new(5, 2);
        assert_eq!(engine.generate(Some(&vibe), &songs, Some(&settings)).len(), 5);
    }

    #[test]
    fn summary_lists_track_ids() {
        let vibe = VibeProfile::new().with_target_genres(["pop"]);
        let songs = vec![
            CandidateSong::new("a").with_genres(["rock"]),
            CandidateSong::default().with_uri("spotify:track:b").with_genres(["pop"]),
        ];
        let playlist = PlaylistEngine::new().playlist(Some(&vibe), &songs, None);
        let summary = PlaylistSummary::from_ranked(&playlist);
        assert_eq!(summary.track_count, 2);
        assert_eq!(summary.track_ids, vec!["spotify:track:b", "a"]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_scoring_matches_sequential() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        const GENRES: [&str; 5] = ["rock", "jazz", "pop", "metal", "soul"];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let songs: Vec<CandidateSong> = (0..500)
            .map(|i| {
                CandidateSong::new(format!("s{}", rng.gen_range(0..400)))
                    .with_genres([GENRES[rng.gen_range(0..GENRES.len())], GENRES[i % GENRES.len()]])
                    .with_energy(rng.gen_range(0.0..1.0))
                    .with_popularity(rng.gen_range(0.0..100.0))
            })
            .collect();
        let vibe = VibeProfile::new()
            .with_target_genres(["rock", "jazz"])
            .with_hard_nos(["metal"])
            .with_energy(0.6)
            .with_novelty(0.7);
        let engine = PlaylistEngine::new();

        let normalized = NormalizedVibe::from_profile(&vibe);
        let mut sequential: Vec<RankedSong<'_>> = normalize_songs(&songs)
            .iter()
            .filter(|s| !normalized.vetoes(s))
            .map(|s| engine.ranked(&normalized, s))
            .collect();
        sequential.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));

        assert_eq!(engine.rank(Some(&vibe), &songs), sequential);
    }

    #[test]
    fn ranked_song_serializes_flat() {
        let vibe = VibeProfile::new();
        let songs = vec![CandidateSong::new("a").with_name("Song A")];
        let playlist = PlaylistEngine::new().playlist(Some(&vibe), &songs, None);
        let json = serde_json::to_value(&playlist[0]).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["name"], "Song A");
        assert!(json["score"]["total"].is_number());
    }
}
