//! Vibe aggregation — listener preferences → one shared session profile.
//!
//! Genres are ranked by how often listeners asked for them, minus anything a
//! single listener vetoed. Energy and novelty are averaged and rounded to two
//! decimals with an explicit [`RoundingMode`].

pub mod aggregate;
pub mod book;
pub mod preference;
pub mod profile;
pub mod rounding;
pub mod tally;

pub use aggregate::{aggregate, VibeAggregator, DEFAULT_MAX_TARGET_GENRES};
pub use book::SessionPreferences;
pub use preference::{decode_tag_list, NoveltyPreference, PreferenceProfile};
pub use profile::VibeProfile;
pub use rounding::RoundingMode;
