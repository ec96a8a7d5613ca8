//! Session preference book — one preference profile per listener.

use super::aggregate::VibeAggregator;
use super::preference::PreferenceProfile;
use super::profile::VibeProfile;

/// Preferences submitted for one session, keyed by listener.
///
/// Resubmitting replaces the listener's earlier profile in place, so the
/// aggregation order stays the order of first submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPreferences {
    entries: Vec<(String, PreferenceProfile)>,
}

impl SessionPreferences {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a listener's profile. Returns the replaced profile, if any.
    pub fn submit(
        &mut self,
        listener: impl Into<String>,
        profile: PreferenceProfile,
    ) -> Option<PreferenceProfile> {
        let listener = listener.into();
        match self.entries.iter_mut().find(|(id, _)| *id == listener) {
            Some((_, existing)) => Some(std::mem::replace(existing, profile)),
            None => {
                self.entries.push((listener, profile));
                None
            }
        }
    }

    /// Remove a listener's profile.
    pub fn withdraw(&mut self, listener: &str) -> Option<PreferenceProfile> {
        let pos = self.entries.iter().position(|(id, _)| id == listener)?;
        Some(self.entries.remove(pos).1)
    }

    /// A listener's current profile.
    pub fn get(&self, listener: &str) -> Option<&PreferenceProfile> {
        self.entries
            .iter()
            .find(|(id, _)| id == listener)
            .map(|(_, profile)| profile)
    }

    /// Profiles in submission order.
    pub fn profiles(&self) -> impl Iterator<Item = &PreferenceProfile> {
        self.entries.iter().map(|(_, profile)| profile)
    }

    /// Listener ids in submission order.
    pub fn listeners(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Number of listeners with a profile.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate the current profiles. `None` when nobody has submitted.
    pub fn aggregate(&self, aggregator: &VibeAggregator) -> Option<VibeProfile> {
        aggregator.aggregate(self.profiles())
    }
}
