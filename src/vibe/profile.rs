//! Vibe profile — the consensus a session's playlist is ranked against.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::coerce::NEUTRAL_UNIT;

/// Shared profile for one session.
///
/// Aggregated profiles keep `target_genres` and `hard_no_genres` disjoint and
/// both numeric fields in `[0, 1]`; profiles built by other means are
/// normalized by the playlist engine before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeProfile {
    #[serde(default)]
    pub target_genres: Vec<String>,
    #[serde(default = "neutral")]
    pub energy: f64,
    #[serde(default = "neutral")]
    pub new_vs_familiar: f64,
    #[serde(default)]
    pub hard_no_genres: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

fn neutral() -> f64 {
    NEUTRAL_UNIT
}

impl VibeProfile {
    /// A neutral profile: no genre targets, no vetoes, mid energy and novelty.
    pub fn new() -> Self {
        Self {
            target_genres: Vec::new(),
            energy: NEUTRAL_UNIT,
            new_vs_familiar: NEUTRAL_UNIT,
            hard_no_genres: BTreeSet::new(),
            event_type: None,
        }
    }

    /// Replace the target genres, keeping the given order.
    pub fn with_target_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the vetoed genres.
    pub fn with_hard_nos<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hard_no_genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Set consensus energy, nominally in `[0, 1]`.
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    /// Set the novelty lean; above 0.5 favours less popular songs.
    pub fn with_novelty(mut self, new_vs_familiar: f64) -> Self {
        self.new_vs_familiar = new_vs_familiar;
        self
    }
}

impl Default for VibeProfile {
    fn default() -> Self {
        Self::new()
    }
}
