//! Vibe aggregation — many preference profiles in, one consensus profile out.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::preference::PreferenceProfile;
use super::profile::VibeProfile;
use super::rounding::RoundingMode;
use super::tally::Tally;

/// Default number of genres a vibe targets.
pub const DEFAULT_MAX_TARGET_GENRES: usize = 5;

/// Reduces a session's preference profiles to a [`VibeProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibeAggregator {
    max_target_genres: usize,
    rounding: RoundingMode,
}

impl VibeAggregator {
    /// Aggregator with the default genre limit and half-even rounding.
    pub fn new() -> Self {
        Self {
            max_target_genres: DEFAULT_MAX_TARGET_GENRES,
            rounding: RoundingMode::default(),
        }
    }

    /// Tie rule for the two-decimal energy and novelty values.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// How many of the most requested genres the vibe targets.
    pub fn with_max_target_genres(mut self, max: usize) -> Self {
        self.max_target_genres = max;
        self
    }

    /// Aggregate profiles into one vibe. Returns `None` for an empty input.
    pub fn aggregate<'a, I>(&self, profiles: I) -> Option<VibeProfile>
    where
        I: IntoIterator<Item = &'a PreferenceProfile>,
    {
        let profiles: Vec<&PreferenceProfile> = profiles.into_iter().collect();
        if profiles.is_empty() {
            return None;
        }

        let mut genres = Tally::new();
        let mut event_types = Tally::new();
        let mut hard_nos = BTreeSet::new();
        let mut energy_sum = 0u64;
        let mut half_steps_sum = 0u64;

        for profile in profiles.iter().copied() {
            for genre in &profile.genres {
                genres.add(genre);
            }
            hard_nos.extend(profile.hard_nos.iter().cloned());
            event_types.add(&profile.event_type);

            let level = profile.energy_level();
            if level.was_corrected() {
                trace!(raw = profile.energy_level, ?level, "energy level coerced");
            }
            energy_sum += u64::from(level.value());

            let novelty = profile.novelty_half_steps();
            if novelty.was_corrected() {
                trace!(raw = ?profile.new_vs_familiar, "novelty stance treated as neutral");
            }
            half_steps_sum += u64::from(novelty.value());
        }

        genres.remove_where(|g| hard_nos.contains(g));
        let target_genres: Vec<String> = genres
            .most_common(self.max_target_genres)
            .into_iter()
            .map(str::to_string)
            .collect();

        let n = profiles.len() as u64;
        // mean level / 10, in hundredths
        let energy = self.rounding.hundredths(energy_sum * 10, n);
        // mean half steps / 2, in hundredths
        let new_vs_familiar = self.rounding.hundredths(half_steps_sum * 50, n);
        let event_type = event_types.mode().map(str::to_string);

        debug!(
            profiles = profiles.len(),
            ?target_genres,
            energy,
            new_vs_familiar,
            hard_nos = hard_nos.len(),
            "aggregated vibe"
        );

        Some(VibeProfile {
            target_genres,
            energy,
            new_vs_familiar,
            hard_no_genres: hard_nos,
            event_type,
        })
    }
}

impl Default for VibeAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate with the default aggregator.
pub fn aggregate<'a, I>(profiles: I) -> Option<VibeProfile>
where
    I: IntoIterator<Item = &'a PreferenceProfile>,
{
    VibeAggregator::new().aggregate(profiles)
}
