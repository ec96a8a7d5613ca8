//! Playlist constraints — length limit, per-artist cap and duplicate removal.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::coerce::{self, Coerced};

pub const DEFAULT_MAX_LENGTH: usize = 50;
pub const DEFAULT_MAX_PER_ARTIST: usize = 2;

/// Caller-supplied limits for one playlist. Unset or non-positive values
/// fall back to the engine's [`PlaylistLimits`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_per_artist: Option<i64>,
}

impl PlaylistSettings {
    /// Settings with both limits given.
    pub fn new(max_length: i64, max_per_artist: i64) -> Self {
        Self {
            max_length: Some(max_length),
            max_per_artist: Some(max_per_artist),
        }
    }

    /// Settings from `other` take precedence where present.
    pub fn overridden_by(self, other: PlaylistSettings) -> Self {
        Self {
            max_length: other.max_length.or(self.max_length),
            max_per_artist: other.max_per_artist.or(self.max_per_artist),
        }
    }
}

/// Resolved, always-positive playlist limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistLimits {
    pub max_length: usize,
    pub max_per_artist: usize,
}

impl PlaylistLimits {
    /// Resolve caller settings against these defaults.
    pub fn resolve(&self, settings: Option<&PlaylistSettings>) -> (Coerced<usize>, Coerced<usize>) {
        let settings = settings.copied().unwrap_or_default();
        (
            coerce::positive_limit(settings.max_length, self.max_length),
            coerce::positive_limit(settings.max_per_artist, self.max_per_artist),
        )
    }

    /// Resolved limits, dropping the coercion detail.
    pub fn apply(&self, settings: Option<&PlaylistSettings>) -> Self {
        let (max_length, max_per_artist) = self.resolve(settings);
        Self {
            max_length: max_length.value(),
            max_per_artist: max_per_artist.value(),
        }
    }
}

impl Default for PlaylistLimits {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            max_per_artist: DEFAULT_MAX_PER_ARTIST,
        }
    }
}

/// Walk `ranked` once, in order, keeping songs that satisfy the limits.
///
/// `key` yields each entry's identifier and optional artist. Repeated
/// identifiers are skipped, artists past `max_per_artist` are skipped, and
/// the walk stops after `max_length` acceptances.
pub fn apply_constraints<T, F>(ranked: Vec<T>, limits: &PlaylistLimits, key: F) -> Vec<T>
where
    F: Fn(&T) -> (&str, Option<&str>),
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut per_artist: HashMap<String, usize> = HashMap::new();
    let mut accepted = Vec::new();

    for entry in ranked {
        if accepted.len() >= limits.max_length {
            break;
        }
        let (id, artist) = key(&entry);
        if seen.contains(id) {
            trace!(id, "skipping duplicate");
            continue;
        }
        if let Some(artist) = artist {
            let count = per_artist.entry(artist.to_string()).or_insert(0);
            if *count >= limits.max_per_artist {
                trace!(id, artist, "skipping song over artist cap");
                continue;
            }
            *count += 1;
        }
        seen.insert(id.to_string());
        accepted.push(entry);
    }

    accepted
}
