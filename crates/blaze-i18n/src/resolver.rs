//! Locale resolution over compacted and generalized phrasebooks.
//!
//! # Invariants
//!
//! 1. **Lookup is total**: once a [`Resolver`] exists, every locale string
//!    resolves to some phrasebook. All failure happens in construction.
//!
//! 2. **Exact beats family beats default**: a locale present in the
//!    collection always gets its own compacted phrasebook, even when its
//!    family was claimed by a sibling.
//!
//! 3. **Immutable after construction**: `Resolver` is `Send + Sync` whenever
//!    the phrase type is.

use std::sync::Arc;

use rustc_hash::FxHashMap;

#[cfg(feature = "tracing")]
use tracing::{debug, debug_span, trace};

use crate::PhrasebookMap;
use crate::collection::PhrasebookCollection;
use crate::compact::{Compacted, compact};
use crate::config::ResolverConfig;
use crate::coverage::CoverageReport;
use crate::error::ConfigurationError;
use crate::generalize::generalize;
use crate::locale::{LocaleCode, family_key};
use crate::phrase::{Phrase, Phrasebook};

/// Which resolution step answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// The requested locale is in the collection.
    Exact,
    /// The requested locale's family key matched a generalized phrasebook.
    Family,
    /// Nothing matched; the default locale answered.
    Default,
}

/// A phrasebook together with how it was found.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a, V = Phrase> {
    /// The compacted phrasebook.
    pub phrasebook: &'a Phrasebook<V>,
    /// The step that produced it.
    pub matched: MatchKind,
}

/// Resolves arbitrary locale strings to complete phrasebooks.
///
/// # Example
///
/// ```
/// use blaze_i18n::{Phrase, Phrasebook, PhrasebookCollection, Resolver};
///
/// let en_us: Phrasebook = [
///     ("hello", "Hello world!"),
///     ("goodbye", "Goodbye friends!"),
///     ("changeColor", "Change color"),
/// ]
/// .into_iter()
/// .collect();
/// let en_gb: Phrasebook = [("changeColor", "Change colour")].into_iter().collect();
///
/// let collection: PhrasebookCollection = PhrasebookCollection::new()
///     .with_locale("en-US", en_us)
///     .with_locale("en-GB", en_gb);
/// let resolver = Resolver::new(collection, "en-US").unwrap();
///
/// assert_eq!(resolver.phrasebook("en-GB")["changeColor"], Phrase::from("Change colour"));
/// assert_eq!(resolver.phrasebook("en-GB")["hello"], Phrase::from("Hello world!"));
/// assert_eq!(resolver.phrasebook("de")["changeColor"], Phrase::from("Change color"));
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<V = Phrase> {
    default_locale: String,
    default_book: Arc<Phrasebook<V>>,
    locales: Vec<String>,
    compacted: PhrasebookMap<V>,
    generalized: PhrasebookMap<V>,
    coverage: CoverageReport,
    config: ResolverConfig,
}

impl<V: Clone> Resolver<V> {
    /// Build a resolver with the default [`ResolverConfig`].
    ///
    /// Fails with [`ConfigurationError::MissingDefault`] when
    /// `default_locale` is not in `collection`.
    pub fn new(
        collection: PhrasebookCollection<V>,
        default_locale: &str,
    ) -> Result<Self, ConfigurationError> {
        Self::with_config(collection, default_locale, ResolverConfig::default())
    }

    /// Build a resolver with an explicit configuration.
    pub fn with_config(
        collection: PhrasebookCollection<V>,
        default_locale: &str,
        config: ResolverConfig,
    ) -> Result<Self, ConfigurationError> {
        #[cfg(feature = "tracing")]
        let _span = debug_span!(
            "resolver_build",
            default_locale,
            locales = collection.len(),
            intermediate_fallback = config.uses_intermediate_fallback()
        )
        .entered();

        let Compacted {
            phrasebooks,
            default_book,
            coverage,
        } = compact(collection, default_locale, &config)?;
        let generalized = generalize(&phrasebooks);

        let mut locales = Vec::with_capacity(phrasebooks.len());
        let mut compacted = FxHashMap::default();
        for (locale, book) in phrasebooks {
            locales.push(locale.clone());
            compacted.insert(locale, book);
        }

        #[cfg(feature = "tracing")]
        debug!(
            locales = locales.len(),
            families = generalized.len(),
            default_keys = default_book.len(),
            "resolver built"
        );

        Ok(Self {
            default_locale: default_locale.to_owned(),
            default_book,
            locales,
            compacted,
            generalized,
            coverage,
            config,
        })
    }
}

impl<V> Resolver<V> {
    /// The best phrasebook for `locale`. Never fails.
    ///
    /// Tries an exact match, then the family of the first
    /// [`family_key_len`](ResolverConfig::family_key_len) characters, then
    /// the default locale.
    #[must_use]
    pub fn phrasebook(&self, locale: &str) -> &Phrasebook<V> {
        self.resolve(locale).phrasebook
    }

    /// Like [`phrasebook`](Self::phrasebook), also reporting which step
    /// matched.
    #[must_use]
    pub fn resolve(&self, locale: &str) -> Resolved<'_, V> {
        if let Some(book) = self.compacted.get(locale) {
            return Resolved {
                phrasebook: book,
                matched: MatchKind::Exact,
            };
        }

        let family = family_key(locale, self.config.family_key_length());
        if let Some(book) = self.generalized.get(family) {
            return Resolved {
                phrasebook: book,
                matched: MatchKind::Family,
            };
        }

        #[cfg(feature = "tracing")]
        trace!(requested = locale, "no locale match, using default phrasebook");

        Resolved {
            phrasebook: &self.default_book,
            matched: MatchKind::Default,
        }
    }

    /// Phrasebook for a statically known locale code.
    #[must_use]
    pub fn phrasebook_for<L: LocaleCode>(&self, locale: &L) -> &Phrasebook<V> {
        self.phrasebook(locale.code())
    }

    /// A single phrase for `locale`.
    ///
    /// `None` when neither the matched locale nor the default defines `key`.
    #[must_use]
    pub fn phrase(&self, locale: &str, key: &str) -> Option<&V> {
        self.phrasebook(locale).get(key)
    }

    /// Compacted phrasebooks keyed by exact locale code.
    #[must_use]
    pub fn compacted_phrasebooks(&self) -> &PhrasebookMap<V> {
        &self.compacted
    }

    /// Phrasebooks keyed by locale family prefix.
    #[must_use]
    pub fn generalized_phrasebooks(&self) -> &PhrasebookMap<V> {
        &self.generalized
    }

    /// The fallback-of-last-resort locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// The default locale's phrasebook.
    #[must_use]
    pub fn default_phrasebook(&self) -> &Phrasebook<V> {
        &self.default_book
    }

    /// Locale codes in collection order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }

    /// Per-locale backfill statistics collected during construction.
    #[must_use]
    pub fn coverage_report(&self) -> &CoverageReport {
        &self.coverage
    }

    /// The configuration this resolver was built with.
    #[must_use]
    pub fn config(&self) -> ResolverConfig {
        self.config
    }
}
