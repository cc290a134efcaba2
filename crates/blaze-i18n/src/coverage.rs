//! Translation coverage gathered during compaction.
//!
//! Shows, per locale, how much of the default locale's key set the locale
//! translates itself and which keys were backfilled.

/// Coverage report for a compacted collection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageReport {
    /// The default locale the report is measured against.
    pub default_locale: String,
    /// Number of keys in the default phrasebook.
    pub total_keys: usize,
    /// Per-locale coverage, in collection order.
    pub locales: Vec<LocaleCoverage>,
}

impl CoverageReport {
    /// Coverage for one locale.
    #[must_use]
    pub fn locale(&self, locale: &str) -> Option<&LocaleCoverage> {
        self.locales.iter().find(|l| l.locale == locale)
    }

    /// Locales that needed no backfill from the default locale.
    pub fn complete_locales(&self) -> impl Iterator<Item = &str> {
        self.locales
            .iter()
            .filter(|l| l.is_complete())
            .map(|l| l.locale.as_str())
    }
}

/// Per-locale coverage statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocaleCoverage {
    /// Locale tag (e.g. `"en-GB"`).
    pub locale: String,
    /// Default-locale keys the locale translates itself.
    pub translated: usize,
    /// Keys taken from the locale's intermediate fallback table.
    pub from_fallback: Vec<String>,
    /// Keys backfilled from the default locale.
    pub from_default: Vec<String>,
    /// Keys the locale defines that the default locale does not.
    pub extra: Vec<String>,
    /// `translated` as a percentage of the default key set (0.0–100.0).
    pub coverage_percent: f32,
}

impl LocaleCoverage {
    pub(crate) fn new(locale: &str, translated: usize, total_keys: usize) -> Self {
        let coverage_percent = if total_keys == 0 {
            100.0
        } else {
            (translated as f32 / total_keys as f32) * 100.0
        };
        Self {
            locale: locale.to_owned(),
            translated,
            from_fallback: Vec::new(),
            from_default: Vec::new(),
            extra: Vec::new(),
            coverage_percent,
        }
    }

    /// Whether no key had to come from the default locale.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.from_default.is_empty()
    }
}
