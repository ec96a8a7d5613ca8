//! Candidate songs as supplied by the caller's catalog.

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

/// Genre tags on a song: a list, or a single tag given as a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreTags {
    Many(Vec<String>),
    One(String),
}

impl GenreTags {
    /// Tags as string slices, in the order given.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let tags: &[String] = match self {
            Self::Many(tags) => tags,
            Self::One(tag) => std::slice::from_ref(tag),
        };
        tags.iter().map(String::as_str)
    }

}

impl Default for GenreTags {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// A song in the candidate pool.
///
/// Fields are read leniently so one bad record never sinks a pool: numeric
/// fields accept numbers and numeric strings, text fields accept numbers,
/// and anything else reads as missing and is defaulted later.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateSong {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Catalog URI; identifies the song when `id` is missing.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_genres")]
    pub genres: GenreTags,
    /// Energy in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient_number")]
    pub energy: Option<f64>,
    /// Popularity on a 0-100 scale.
    #[serde(default, deserialize_with = "lenient_number")]
    pub popularity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl CandidateSong {
    /// A song identified by `id`, with every other field missing.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Set the catalog URI.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the genre tags with a list.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = GenreTags::Many(genres.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the genre tags with a single tag.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres = GenreTags::One(genre.into());
        self
    }

    /// Set energy; values outside `[0, 1]` are clamped at scoring time.
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Set popularity on the 0-100 scale.
    pub fn with_popularity(mut self, popularity: impl Into<f64>) -> Self {
        self.popularity = Some(popularity.into());
        self
    }

    /// Set the artist used by the per-artist cap.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Identifier used for deduplication: `id`, falling back to `uri`.
    /// Empty strings count as missing.
    pub fn song_id(&self) -> Option<&str> {
        [self.id.as_deref(), self.uri.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }

    /// Artist subject to the per-artist cap; `None` for missing or empty names.
    pub fn capped_artist(&self) -> Option<&str> {
        self.artist.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Other(IgnoredAny),
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match LooseText::deserialize(deserializer)? {
        LooseText::Text(s) => Some(s),
        LooseText::Signed(n) => Some(n.to_string()),
        LooseText::Unsigned(n) => Some(n.to_string()),
        LooseText::Float(n) => Some(n.to_string()),
        LooseText::Other(_) => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseTags {
    Tags(GenreTags),
    Other(IgnoredAny),
}

fn lenient_genres<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GenreTags, D::Error> {
    Ok(match LooseTags::deserialize(deserializer)? {
        LooseTags::Tags(tags) => tags,
        LooseTags::Other(_) => GenreTags::default(),
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Number(n) => Some(n),
        LooseNumber::Text(s) => s.trim().parse().ok(),
        LooseNumber::Other(_) => None,
    })
}
