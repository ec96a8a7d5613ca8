//! Frequency tally that remembers first-seen order for tie-breaking.

use std::collections::HashMap;

/// Counts occurrences of string keys. Ranking is by descending count; equal
/// counts keep the order in which keys were first seen.
#[derive(Debug, Clone, Default)]
pub struct Tally<'a> {
    counts: Vec<(&'a str, usize)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> Tally<'a> {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: &'a str) {
        match self.index.get(key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key, self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Drop every key for which `exclude` returns true.
    pub fn remove_where(&mut self, mut exclude: impl FnMut(&str) -> bool) {
        self.counts.retain(|(key, _)| !exclude(*key));
        self.index = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (*key, i))
            .collect();
    }

    /// Occurrences of `key`, zero if never seen.
    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&i| self.counts[i].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent keys.
    pub fn most_common(&self, n: usize) -> Vec<&'a str> {
        let mut ranked = self.counts.clone();
        // stable: equal counts keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).map(|(key, _)| key).collect()
    }

    /// The single most frequent key, if any.
    pub fn mode(&self) -> Option<&'a str> {
        self.most_common(1).into_iter().next()
    }
}
