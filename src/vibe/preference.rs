//! Preference profile — what one listener asked for in one session.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::coerce::Coerced;

/// Highest energy level a listener can report.
pub const MAX_ENERGY_LEVEL: i32 = 10;

/// A listener's stance on new versus familiar music.
///
/// Unknown labels are kept verbatim and count as neutral.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NoveltyPreference {
    Familiar,
    Mix,
    New,
    Unrecognized(String),
}

impl NoveltyPreference {
    /// Position on the familiar→new axis in half steps (familiar = 0, new = 2).
    pub fn half_steps(&self) -> Coerced<u32> {
        match self {
            Self::Familiar => Coerced::Given(0),
            Self::Mix => Coerced::Given(1),
            Self::New => Coerced::Given(2),
            Self::Unrecognized(_) => Coerced::Defaulted(1),
        }
    }

    /// Position on the familiar→new axis in `[0, 1]`.
    pub fn weight(&self) -> Coerced<f64> {
        self.half_steps().map(|steps| f64::from(steps) / 2.0)
    }

    /// The label as submitted.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Familiar => "familiar",
            Self::Mix => "mix",
            Self::New => "new",
            Self::Unrecognized(label) => label,
        }
    }
}

impl From<String> for NoveltyPreference {
    fn from(label: String) -> Self {
        match label.as_str() {
            "familiar" => Self::Familiar,
            "mix" => Self::Mix,
            "new" => Self::New,
            _ => Self::Unrecognized(label),
        }
    }
}

impl From<&str> for NoveltyPreference {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<NoveltyPreference> for String {
    fn from(pref: NoveltyPreference) -> Self {
        pref.as_str().to_string()
    }
}

impl fmt::Display for NoveltyPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One listener's preferences for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    #[serde(default)]
    pub event_type: String,
    #[serde(default, deserialize_with = "tag_list")]
    pub genres: Vec<String>,
    pub energy_level: i32,
    #[serde(default)]
    pub new_vs_familiar: Option<NoveltyPreference>,
    #[serde(default, deserialize_with = "tag_set")]
    pub hard_nos: BTreeSet<String>,
}

impl PreferenceProfile {
    /// A profile with no genres, no hard nos and no novelty stance.
    pub fn new(event_type: impl Into<String>, energy_level: i32) -> Self {
        Self {
            event_type: event_type.into(),
            genres: Vec::new(),
            energy_level,
            new_vs_familiar: None,
            hard_nos: BTreeSet::new(),
        }
    }

    /// Set the requested genres, in preference order.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Set the new-vs-familiar stance.
    pub fn with_novelty(mut self, pref: impl Into<NoveltyPreference>) -> Self {
        self.new_vs_familiar = Some(pref.into());
        self
    }

    /// Set the genres this listener vetoes.
    pub fn with_hard_nos<I, S>(mut self, hard_nos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hard_nos = hard_nos.into_iter().map(Into::into).collect();
        self
    }

    /// Reported energy level forced into `0..=10`.
    pub fn energy_level(&self) -> Coerced<u32> {
        match self.energy_level {
            l if l < 0 => Coerced::Clamped(0),
            l if l > MAX_ENERGY_LEVEL => Coerced::Clamped(MAX_ENERGY_LEVEL as u32),
            l => Coerced::Given(l as u32),
        }
    }

    /// Novelty stance in half steps; a missing stance counts as neutral.
    pub fn novelty_half_steps(&self) -> Coerced<u32> {
        match &self.new_vs_familiar {
            Some(pref) => pref.half_steps(),
            None => Coerced::Defaulted(1),
        }
    }
}

/// Decode a tag list stored as text: a JSON array of strings, or a
/// comma-separated list. Entries are trimmed and blanks dropped.
pub fn decode_tag_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(tags) = serde_json::from_str::<Vec<String>>(trimmed) {
            return clean_tags(tags);
        }
    }
    clean_tags(trimmed.split(',').map(str::to_string))
}

fn clean_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

struct TagListVisitor;

impl<'de> Visitor<'de> for TagListVisitor {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of tags or an encoded tag string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(decode_tag_list(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut tags = Vec::new();
        while let Some(tag) = seq.next_element::<String>()? {
            tags.push(tag);
        }
        Ok(clean_tags(tags))
    }
}

fn tag_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    deserializer.deserialize_any(TagListVisitor)
}

fn tag_set<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<String>, D::Error> {
    tag_list(deserializer).map(|tags| tags.into_iter().collect())
}
