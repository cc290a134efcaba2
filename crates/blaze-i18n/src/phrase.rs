//! Phrase values and per-locale phrasebooks.
//!
//! The resolver never looks inside a phrase value; it only asks whether a
//! key is present. [`Phrase`] is the value type most callers want (plain
//! text or markdown source), but every core type is generic over `V`.

use std::collections::hash_map;

use rustc_hash::FxHashMap;

/// A single translatable phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Phrase {
    /// Plain text, displayed as-is.
    Text(String),
    /// Markdown source. Rendering is left to the caller.
    Markdown {
        /// Markdown source text.
        md: String,
    },
}

impl Phrase {
    /// Build a markdown phrase.
    #[must_use]
    pub fn markdown(md: impl Into<String>) -> Self {
        Self::Markdown { md: md.into() }
    }

    /// The source text, whether plain or markdown.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Markdown { md } => md,
        }
    }

    /// Whether this phrase carries markdown.
    #[must_use]
    pub fn is_markdown(&self) -> bool {
        matches!(self, Self::Markdown { .. })
    }
}

impl From<&str> for Phrase {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Phrase {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl std::fmt::Display for Phrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.source())
    }
}

/// Phrases for a single locale, keyed by phrase key.
///
/// # Example
///
/// ```
/// use blaze_i18n::{Phrase, Phrasebook};
///
/// let book: Phrasebook = [("hello", "Hello world!"), ("goodbye", "Goodbye friends!")]
///     .into_iter()
///     .collect();
///
/// assert_eq!(book.get("hello"), Some(&Phrase::from("Hello world!")));
/// assert!(!book.contains_key("changeColor"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Phrasebook<V = Phrase> {
    phrases: FxHashMap<String, V>,
}

impl<V> Default for Phrasebook<V> {
    fn default() -> Self {
        Self {
            phrases: FxHashMap::default(),
        }
    }
}

impl<V> Phrasebook<V> {
    /// Create an empty phrasebook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a phrase, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<V>) -> Option<V> {
        self.phrases.insert(key.into(), value.into())
    }

    /// Look up a phrase by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.phrases.get(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.phrases.contains_key(key)
    }

    /// Number of phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the phrasebook has no phrases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Iterate over all keys (unordered).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.phrases.keys().map(String::as_str)
    }

    /// Iterate over `(key, phrase)` pairs (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.phrases.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in sorted order, for deterministic reports.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        keys
    }

    /// Copy every phrase of `other` whose key is absent here.
    ///
    /// Returns the keys that were added. Existing phrases are never
    /// overwritten.
    pub(crate) fn backfill_from(&mut self, other: &Self) -> Vec<String>
    where
        V: Clone,
    {
        let mut added = Vec::new();
        for (key, value) in &other.phrases {
            if let hash_map::Entry::Vacant(slot) = self.phrases.entry(key.clone()) {
                slot.insert(value.clone());
                added.push(key.clone());
            }
        }
        added.sort_unstable();
        added
    }
}

impl<K, T, V> FromIterator<(K, T)> for Phrasebook<V>
where
    K: Into<String>,
    T: Into<V>,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            phrases: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, T, V> Extend<(K, T)> for Phrasebook<V>
where
    K: Into<String>,
    T: Into<V>,
{
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        self.phrases
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<V> std::ops::Index<&str> for Phrasebook<V> {
    type Output = V;

    /// Panics if `key` is absent; use [`Phrasebook::get`] for fallible lookup.
    fn index(&self, key: &str) -> &V {
        match self.phrases.get(key) {
            Some(v) => v,
            None => panic!("no phrase for key '{key}'"),
        }
    }
}

impl<'a, V> IntoIterator for &'a Phrasebook<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = hash_map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.phrases.iter()
    }
}
