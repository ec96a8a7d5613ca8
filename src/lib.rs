//! groupvibe — shared-session vibe aggregation and playlist ranking.
//!
//! Listener preferences are reduced to one [`VibeProfile`], which then ranks
//! and constrains a candidate pool into an ordered playlist. Both stages are
//! pure functions over in-memory data.

pub mod coerce;
pub mod config;
pub mod playlist;
pub mod session;
pub mod vibe;

pub use coerce::Coerced;
pub use config::{ConfigError, EngineConfig};
pub use playlist::{
    generate_playlist, CandidateSong, PlaylistEngine, PlaylistSettings, PlaylistSummary, RankedSong,
};
pub use session::{SessionError, SessionInput, SessionReport};
pub use vibe::{aggregate, PreferenceProfile, SessionPreferences, VibeAggregator, VibeProfile};
