//! Session files — one group session's preferences and candidate pool on disk,
//! and the report produced from them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::playlist::{CandidateSong, PlaylistEngine, PlaylistSettings, PlaylistSummary, RankedSong};
use crate::vibe::{PreferenceProfile, VibeAggregator, VibeProfile};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse session {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Everything needed to build one session's playlist. YAML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInput {
    #[serde(default)]
    pub preferences: Vec<PreferenceProfile>,
    /// Ready-made vibe; when present, preferences are not aggregated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<VibeProfile>,
    #[serde(default)]
    pub candidates: Vec<CandidateSong>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PlaylistSettings>,
}

impl SessionInput {
    /// Read a session file. YAML parsing also accepts JSON.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| SessionError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The vibe this session ranks against: the supplied one, else the
    /// aggregate of its preferences.
    pub fn resolve_vibe(&self, aggregator: &VibeAggregator) -> Option<VibeProfile> {
        self.vibe
            .clone()
            .or_else(|| aggregator.aggregate(&self.preferences))
    }

    /// Resolve the vibe and build the constrained playlist.
    pub fn plan(&self, aggregator: &VibeAggregator, engine: &PlaylistEngine) -> SessionReport<'_> {
        let vibe = self.resolve_vibe(aggregator);
        let tracks = engine.playlist(vibe.as_ref(), &self.candidates, self.settings.as_ref());
        let summary = PlaylistSummary::from_ranked(&tracks);
        debug!(
            listeners = self.preferences.len(),
            candidates = self.candidates.len(),
            tracks = summary.track_count,
            "planned session playlist"
        );
        SessionReport {
            vibe,
            track_count: summary.track_count,
            track_ids: summary.track_ids,
            tracks,
        }
    }
}

/// The outcome of planning a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport<'a> {
    pub vibe: Option<VibeProfile>,
    pub track_count: usize,
    pub track_ids: Vec<String>,
    pub tracks: Vec<RankedSong<'a>>,
}
