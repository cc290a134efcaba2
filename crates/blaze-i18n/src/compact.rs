//! Compaction: backfill every locale up to the default locale's key set.
//!
//! # Invariants
//!
//! 1. **Completeness**: every compacted phrasebook contains every key of the
//!    default phrasebook.
//!
//! 2. **Precedence**: a locale's own phrase beats its intermediate fallback
//!    table, which beats the default locale. Backfill never overwrites.
//!
//! 3. **Default is untouched**: the default locale's compacted phrasebook is
//!    its own phrasebook, shared rather than merged.
//!
//! 4. **Order is kept**: output follows collection order.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing default | Default locale not in collection | `ConfigurationError::MissingDefault` |
//! | Fallback disabled | `ResolverConfig::intermediate_fallback(false)` | Fallback tables ignored |

use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::collection::{LocaleEntry, PhrasebookCollection};
use crate::config::ResolverConfig;
use crate::coverage::{CoverageReport, LocaleCoverage};
use crate::error::ConfigurationError;
use crate::phrase::Phrasebook;

/// Output of [`compact`].
#[derive(Debug, Clone)]
pub struct Compacted<V> {
    /// `(locale, compacted phrasebook)` pairs in collection order.
    pub phrasebooks: Vec<(String, Arc<Phrasebook<V>>)>,
    /// The default locale's phrasebook, shared with its entry in
    /// `phrasebooks`.
    pub default_book: Arc<Phrasebook<V>>,
    /// What was backfilled where.
    pub coverage: CoverageReport,
}

/// Compact every locale of `collection` against `default_locale`.
///
/// The collection is consumed; merged phrasebooks are built from its
/// entries, so nothing the caller still holds is modified.
pub fn compact<V: Clone>(
    collection: PhrasebookCollection<V>,
    default_locale: &str,
    config: &ResolverConfig,
) -> Result<Compacted<V>, ConfigurationError> {
    let mut entries: Vec<(String, LocaleEntry<V>)> = collection.into_iter().collect();
    let Some(default_idx) = entries.iter().position(|(l, _)| l == default_locale) else {
        #[cfg(feature = "tracing")]
        warn!(
            default_locale,
            locales = entries.len(),
            "default locale missing from phrasebook collection"
        );
        return Err(ConfigurationError::MissingDefault {
            locale: default_locale.to_owned(),
        });
    };

    let default_book = Arc::new(std::mem::take(&mut entries[default_idx].1.primary));
    let total_keys = default_book.len();

    let mut phrasebooks = Vec::with_capacity(entries.len());
    let mut coverage = Vec::with_capacity(entries.len());

    for (idx, (locale, entry)) in entries.into_iter().enumerate() {
        if idx == default_idx {
            coverage.push(LocaleCoverage::new(&locale, total_keys, total_keys));
            phrasebooks.push((locale, Arc::clone(&default_book)));
            continue;
        }

        let (book, locale_coverage) = compact_one(&locale, entry, &default_book, config);

        #[cfg(feature = "tracing")]
        debug!(
            locale = locale.as_str(),
            translated = locale_coverage.translated,
            from_fallback = locale_coverage.from_fallback.len(),
            from_default = locale_coverage.from_default.len(),
            "phrasebook compacted"
        );

        coverage.push(locale_coverage);
        phrasebooks.push((locale, Arc::new(book)));
    }

    Ok(Compacted {
        phrasebooks,
        default_book,
        coverage: CoverageReport {
            default_locale: default_locale.to_owned(),
            total_keys,
            locales: coverage,
        },
    })
}

fn compact_one<V: Clone>(
    locale: &str,
    entry: LocaleEntry<V>,
    default_book: &Phrasebook<V>,
    config: &ResolverConfig,
) -> (Phrasebook<V>, LocaleCoverage) {
    let LocaleEntry {
        primary: mut book,
        fallback,
    } = entry;

    let translated = default_book
        .keys()
        .filter(|key| book.contains_key(key))
        .count();
    let mut coverage = LocaleCoverage::new(locale, translated, default_book.len());
    coverage.extra = book
        .sorted_keys()
        .into_iter()
        .filter(|key| !default_book.contains_key(key))
        .map(str::to_owned)
        .collect();

    if let Some(fallback) = fallback.filter(|_| config.uses_intermediate_fallback()) {
        coverage.from_fallback = book.backfill_from(&fallback);
    }
    coverage.from_default = book.backfill_from(default_book);

    (book, coverage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(pairs: &[(&str, &str)]) -> Phrasebook<String> {
        pairs.iter().map(|&(k, v)| (k, v.to_owned())).collect()
    }

    fn en_us() -> Phrasebook<String> {
        book(&[
            ("hello", "Hello world!"),
            ("goodbye", "Goodbye friends!"),
            ("changeColor", "Change color"),
        ])
    }

    fn find<'a, V>(compacted: &'a Compacted<V>, locale: &str) -> &'a Phrasebook<V> {
        compacted
            .phrasebooks
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, b)| b.as_ref())
            .unwrap()
    }

    #[test]
    fn missing_default_is_an_error() {
        let collection = PhrasebookCollection::new().with_locale("en-GB", book(&[]));
        let err = compact(collection, "en-US", &ResolverConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingDefault {
                locale: "en-US".into()
            }
        );
    }

    #[test]
    fn default_passes_through_unchanged() {
        let collection = PhrasebookCollection::new()
            .with_locale("en-GB", book(&[("changeColor", "Change colour")]))
            .with_locale("en-US", en_us());

        let compacted = compact(collection, "en-US", &ResolverConfig::default()).unwrap();

        assert_eq!(find(&compacted, "en-US"), &en_us());
        assert_eq!(compacted.default_book.as_ref(), &en_us());
        assert!(Arc::ptr_eq(&compacted.default_book, &compacted.phrasebooks[1].1));
    }

    #[test]
    fn backfills_from_default() {
        let collection = PhrasebookCollection::new()
            .with_locale("en-US", en_us())
            .with_locale("en-GB", book(&[("changeColor", "Change colour")]));

        let compacted = compact(collection, "en-US", &ResolverConfig::default()).unwrap();
        let en_gb = find(&compacted, "en-GB");

        assert_eq!(en_gb.get("changeColor").unwrap(), "Change colour");
        assert_eq!(en_gb.get("hello").unwrap(), "Hello world!");
        assert_eq!(en_gb.get("goodbye").unwrap(), "Goodbye friends!");
    }

    #[test]
    fn fallback_table_beats_default() {
        let es_ar = LocaleEntry::new(book(&[("hello", "¡Hola!")]))
            .with_fallback(book(&[("hello", "Hola"), ("goodbye", "Chau")]));
        let collection = PhrasebookCollection::new()
            .with_locale("en-US", en_us())
            .with_locale("es-AR", es_ar);

        let compacted = compact(collection, "en-US", &ResolverConfig::default()).unwrap();
        let es_ar = find(&compacted, "es-AR");

        assert_eq!(es_ar.get("hello").unwrap(), "¡Hola!");
        assert_eq!(es_ar.get("goodbye").unwrap(), "Chau");
        assert_eq!(es_ar.get("changeColor").unwrap(), "Change color");
    }

    #[test]
    fn fallback_table_ignored_when_disabled() {
        let es_ar = LocaleEntry::new(book(&[])).with_fallback(book(&[("goodbye", "Chau")]));
        let collection = PhrasebookCollection::new()
            .with_locale("en-US", en_us())
            .with_locale("es-AR", es_ar);
        let config = ResolverConfig::new().intermediate_fallback(false);

        let compacted = compact(collection, "en-US", &config).unwrap();

        assert_eq!(
            find(&compacted, "es-AR").get("goodbye").unwrap(),
            "Goodbye friends!"
        );
    }

    #[test]
    fn default_fallback_table_is_not_applied() {
        let en = LocaleEntry::new(en_us()).with_fallback(book(&[("extra", "Extra")]));
        let collection = PhrasebookCollection::new().with_locale("en-US", en);

        let compacted = compact(collection, "en-US", &ResolverConfig::default()).unwrap();

        assert_eq!(find(&compacted, "en-US"), &en_us());
    }

    #[test]
    fn keeps_collection_order() {
        let collection = PhrasebookCollection::new()
            .with_locale("ru-RU", book(&[]))
            .with_locale("en-US", en_us())
            .with_locale("es", book(&[]));

        let compacted = compact(collection, "en-US", &ResolverConfig::default()).unwrap();
        let order: Vec<&str> = compacted.phrasebooks.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(order, ["ru-RU", "en-US", "es"]);
    }

    #[test]
    fn coverage_records_sources() {
        let es_ar = LocaleEntry::new(book(&[("hello", "¡Hola!"), ("stale", "Viejo")]))
            .with_fallback(book(&[("goodbye", "Chau")]));
        let collection = PhrasebookCollection::new()
            .with_locale("en-US", en_us())
            .with_locale("es-AR", es_ar);

        let compacted = compact(collection, "en-US", &ResolverConfig::default()).unwrap();
        let report = &compacted.coverage;

        assert_eq!(report.default_locale, "en-US");
        assert_eq!(report.total_keys, 3);

        let default = report.locale("en-US").unwrap();
        assert_eq!(default.translated, 3);
        assert!(default.is_complete());

        let es_ar = report.locale("es-AR").unwrap();
        assert_eq!(es_ar.translated, 1);
        assert_eq!(es_ar.from_fallback, vec!["goodbye"]);
        assert_eq!(es_ar.from_default, vec!["changeColor"]);
        assert_eq!(es_ar.extra, vec!["stale"]);
        assert!(!es_ar.is_complete());
    }
}
