//! Resolver configuration.

/// Default number of leading characters used as the family key.
pub const DEFAULT_FAMILY_KEY_LEN: usize = 2;

/// Knobs for building a [`Resolver`](crate::Resolver).
///
/// ```
/// use blaze_i18n::ResolverConfig;
///
/// let config = ResolverConfig::new()
///     .intermediate_fallback(false)
///     .family_key_len(3);
/// assert!(!config.uses_intermediate_fallback());
/// assert_eq!(config.family_key_length(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverConfig {
    intermediate_fallback: bool,
    family_key_len: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            intermediate_fallback: true,
            family_key_len: DEFAULT_FAMILY_KEY_LEN,
        }
    }
}

impl ResolverConfig {
    /// Default configuration: intermediate fallback on, two-character
    /// family keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult each locale's intermediate fallback table during compaction.
    ///
    /// When disabled, fallback tables are ignored and missing keys come
    /// straight from the default locale.
    #[must_use]
    pub fn intermediate_fallback(mut self, enabled: bool) -> Self {
        self.intermediate_fallback = enabled;
        self
    }

    /// Number of leading characters of a requested locale used to find its
    /// family when no exact match exists. Clamped to at least 1.
    #[must_use]
    pub fn family_key_len(mut self, len: usize) -> Self {
        self.family_key_len = len.max(1);
        self
    }

    /// Whether intermediate fallback tables are consulted.
    #[must_use]
    pub fn uses_intermediate_fallback(&self) -> bool {
        self.intermediate_fallback
    }

    /// The family key length in characters.
    #[must_use]
    pub fn family_key_length(&self) -> usize {
        self.family_key_len.max(1)
    }
}
