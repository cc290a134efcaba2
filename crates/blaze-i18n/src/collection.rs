//! Ordered collection of per-locale phrasebooks.
//!
//! # Invariants
//!
//! 1. **Insertion order is preserved**: iteration yields locales in the
//!    order they were first inserted. Family generalization depends on it.
//!
//! 2. **Locales are unique**: re-inserting a locale replaces its entry in
//!    place without moving it.
//!
//! 3. **Fallback tables are structured**: an intermediate fallback table
//!    belongs to exactly one locale entry. It is never a locale of its own.

use rustc_hash::FxHashSet;

use crate::error::ConfigurationError;
use crate::phrase::{Phrase, Phrasebook};

/// Key suffix marking an intermediate fallback table in flat tables.
///
/// Only [`PhrasebookCollection::from_suffixed`] interprets it.
pub const FALLBACK_SUFFIX: &str = "-fallback";

/// A locale's own phrasebook plus an optional intermediate fallback table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleEntry<V = Phrase> {
    /// Phrases supplied for this locale. Always win.
    pub primary: Phrasebook<V>,
    /// Consulted for keys missing from `primary`, before the default locale.
    pub fallback: Option<Phrasebook<V>>,
}

impl<V> LocaleEntry<V> {
    /// An entry without a fallback table.
    #[must_use]
    pub fn new(primary: Phrasebook<V>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Attach an intermediate fallback table.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Phrasebook<V>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl<V> From<Phrasebook<V>> for LocaleEntry<V> {
    fn from(primary: Phrasebook<V>) -> Self {
        Self::new(primary)
    }
}

/// Phrasebooks keyed by locale code, in insertion order.
///
/// # Example
///
/// ```
/// use blaze_i18n::{Phrasebook, PhrasebookCollection};
///
/// let en_us: Phrasebook = [("hello", "Hello world!")].into_iter().collect();
/// let en_gb: Phrasebook = [("changeColor", "Change colour")].into_iter().collect();
///
/// let collection: PhrasebookCollection = PhrasebookCollection::new()
///     .with_locale("en-US", en_us)
///     .with_locale("en-GB", en_gb);
///
/// let order: Vec<&str> = collection.locales().collect();
/// assert_eq!(order, ["en-US", "en-GB"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasebookCollection<V = Phrase> {
    entries: Vec<(String, LocaleEntry<V>)>,
}

impl<V> Default for PhrasebookCollection<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> PhrasebookCollection<V> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a locale entry.
    ///
    /// A replaced entry keeps its original position and is returned.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        entry: impl Into<LocaleEntry<V>>,
    ) -> Option<LocaleEntry<V>> {
        let locale = locale.into();
        let entry = entry.into();
        match self.position(&locale) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, entry)),
            None => {
                self.entries.push((locale, entry));
                None
            }
        }
    }

    /// Insert a locale entry, failing if the locale is already present.
    pub fn try_insert(
        &mut self,
        locale: impl Into<String>,
        entry: impl Into<LocaleEntry<V>>,
    ) -> Result<(), ConfigurationError> {
        let locale = locale.into();
        if self.contains(&locale) {
            return Err(ConfigurationError::DuplicateLocale { locale });
        }
        self.entries.push((locale, entry.into()));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_locale(
        mut self,
        locale: impl Into<String>,
        entry: impl Into<LocaleEntry<V>>,
    ) -> Self {
        self.insert(locale, entry);
        self
    }

    /// Attach an intermediate fallback table to an existing locale.
    ///
    /// Returns `false` (and drops `fallback`) if `locale` is not present.
    pub fn set_fallback(&mut self, locale: &str, fallback: Phrasebook<V>) -> bool {
        match self.position(locale) {
            Some(idx) => {
                self.entries[idx].1.fallback = Some(fallback);
                true
            }
            None => false,
        }
    }

    /// Look up a locale entry.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&LocaleEntry<V>> {
        self.position(locale).map(|idx| &self.entries[idx].1)
    }

    /// Whether `locale` is present.
    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.position(locale).is_some()
    }

    /// Number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no locales.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Locale codes in insertion order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(locale, _)| locale.as_str())
    }

    /// `(locale, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleEntry<V>)> {
        self.entries
            .iter()
            .map(|(locale, entry)| (locale.as_str(), entry))
    }

    fn position(&self, locale: &str) -> Option<usize> {
        self.entries.iter().position(|(l, _)| l == locale)
    }
}

impl<V> PhrasebookCollection<V> {
    /// Build a collection from a flat table where intermediate fallback
    /// tables are stored under `"<locale>-fallback"` keys.
    ///
    /// A suffixed key is folded into its base locale's entry when that base
    /// is in the table and stays a locale itself. Otherwise it is kept as an
    /// ordinary locale, so `"es-fallback-fallback"` becomes the fallback
    /// table of an unattached `"es-fallback"`. Order follows the first
    /// appearance of each locale.
    ///
    /// ```
    /// use blaze_i18n::{Phrasebook, PhrasebookCollection};
    ///
    /// let es: Phrasebook = [("hello", "¡Hola!")].into_iter().collect();
    /// let es_fb: Phrasebook = [("bye", "Adiós")].into_iter().collect();
    ///
    /// let collection = PhrasebookCollection::from_suffixed([("es", es), ("es-fallback", es_fb)]);
    /// assert_eq!(collection.len(), 1);
    /// assert!(collection.get("es").unwrap().fallback.is_some());
    /// ```
    pub fn from_suffixed<K, I>(table: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Phrasebook<V>)>,
    {
        let table: Vec<(String, Phrasebook<V>)> =
            table.into_iter().map(|(k, b)| (k.into(), b)).collect();

        let attach_to: Vec<Option<String>> = {
            let keys: FxHashSet<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
            table
                .iter()
                .map(|(key, _)| fallback_base(key, &keys).map(str::to_owned))
                .collect()
        };

        let mut collection = Self::new();
        let mut pending = Vec::new();
        for ((key, book), base) in table.into_iter().zip(attach_to) {
            match base {
                Some(base) => pending.push((base, book)),
                None => {
                    collection.insert(key, book);
                }
            }
        }
        for (base, book) in pending {
            let attached = collection.set_fallback(&base, book);
            debug_assert!(attached, "fallback base '{base}' is not a locale");
        }
        collection
    }
}

/// The locale a suffixed key folds into, if any.
///
/// A base only counts while it stays a locale, i.e. is not folded itself.
fn fallback_base<'a>(key: &'a str, keys: &FxHashSet<&str>) -> Option<&'a str> {
    key.strip_suffix(FALLBACK_SUFFIX)
        .filter(|base| !base.is_empty() && keys.contains(base))
        .filter(|base| fallback_base(base, keys).is_none())
}

impl<K, E, V> FromIterator<(K, E)> for PhrasebookCollection<V>
where
    K: Into<String>,
    E: Into<LocaleEntry<V>>,
{
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (locale, entry) in iter {
            collection.insert(locale, entry);
        }
        collection
    }
}

impl<V> IntoIterator for PhrasebookCollection<V> {
    type Item = (String, LocaleEntry<V>);
    type IntoIter = std::vec::IntoIter<(String, LocaleEntry<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(pairs: &[(&str, &str)]) -> Phrasebook<String> {
        pairs.iter().map(|&(k, v)| (k, v.to_owned())).collect()
    }

    #[test]
    fn preserves_insertion_order() {
        let collection: PhrasebookCollection<String> = [
            ("es-BO", book(&[])),
            ("es", book(&[])),
            ("es-AR", book(&[])),
        ]
        .into_iter()
        .collect();
        let order: Vec<&str> = collection.locales().collect();
        assert_eq!(order, ["es-BO", "es", "es-AR"]);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut collection = PhrasebookCollection::new()
            .with_locale("en-US", book(&[("hello", "Hello")]))
            .with_locale("ru-RU", book(&[]));

        let previous = collection.insert("en-US", book(&[("hello", "Hi")]));

        assert_eq!(previous.map(|e| e.primary), Some(book(&[("hello", "Hello")])));
        let order: Vec<&str> = collection.locales().collect();
        assert_eq!(order, ["en-US", "ru-RU"]);
        assert_eq!(
            collection.get("en-US").and_then(|e| e.primary.get("hello")),
            Some(&"Hi".to_owned())
        );
    }

    #[test]
    fn try_insert_rejects_duplicates() {
        let mut collection = PhrasebookCollection::new();
        assert!(collection.try_insert("es", book(&[])).is_ok());
        assert_eq!(
            collection.try_insert("es", book(&[])),
            Err(ConfigurationError::DuplicateLocale {
                locale: "es".into()
            })
        );
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn set_fallback_requires_existing_locale() {
        let mut collection = PhrasebookCollection::new().with_locale("es-AR", book(&[]));
        assert!(collection.set_fallback("es-AR", book(&[("bye", "Chau")])));
        assert!(!collection.set_fallback("es-BO", book(&[])));
        assert!(collection.get("es-AR").unwrap().fallback.is_some());
    }

    #[test]
    fn from_suffixed_folds_fallback_tables() {
        let collection = PhrasebookCollection::from_suffixed([
            ("es-AR-fallback", book(&[("bye", "Chau")])),
            ("en-US", book(&[("hello", "Hello")])),
            ("es-AR", book(&[("hello", "Hola")])),
        ]);

        let order: Vec<&str> = collection.locales().collect();
        assert_eq!(order, ["en-US", "es-AR"]);
        assert_eq!(
            collection.get("es-AR").unwrap().fallback,
            Some(book(&[("bye", "Chau")]))
        );
    }

    #[test]
    fn from_suffixed_keeps_orphan_tables() {
        let collection =
            PhrasebookCollection::from_suffixed([("pt-fallback", book(&[])), ("-fallback", book(&[]))]);
        let order: Vec<&str> = collection.locales().collect();
        assert_eq!(order, ["pt-fallback", "-fallback"]);
        assert!(collection.iter().all(|(_, e)| e.fallback.is_none()));
    }

    #[test]
    fn from_suffixed_chained_suffixes_keep_every_table() {
        let collection = PhrasebookCollection::from_suffixed([
            ("es", book(&[("hello", "Hola")])),
            ("es-fallback", book(&[("bye", "Adiós")])),
            ("es-fallback-fallback", book(&[("bye", "Chau")])),
        ]);

        let order: Vec<&str> = collection.locales().collect();
        assert_eq!(order, ["es", "es-fallback-fallback"]);
        assert_eq!(
            collection.get("es").unwrap().fallback,
            Some(book(&[("bye", "Adiós")]))
        );
        let tables = collection.len()
            + collection.iter().filter(|(_, e)| e.fallback.is_some()).count();
        assert_eq!(tables, 3);
    }

    #[test]
    fn from_suffixed_chain_folds_into_unattached_base() {
        let collection = PhrasebookCollection::from_suffixed([
            ("es-fallback", book(&[("bye", "Adiós")])),
            ("es-fallback-fallback", book(&[("bye", "Chau")])),
        ]);

        let order: Vec<&str> = collection.locales().collect();
        assert_eq!(order, ["es-fallback"]);
        assert_eq!(
            collection.get("es-fallback").unwrap().fallback,
            Some(book(&[("bye", "Chau")]))
        );
    }

    #[test]
    fn empty_collection() {
        let collection: PhrasebookCollection = PhrasebookCollection::new();
        assert!(collection.is_empty());
        assert!(collection.get("en").is_none());
        assert_eq!(collection.locales().count(), 0);
    }
}
