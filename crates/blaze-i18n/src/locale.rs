//! Locale codes and prefix generalization.
//!
//! Locale codes are opaque strings. The only structure the resolver relies
//! on is the dash: `"zh-Hant-TW"` generalizes to `"zh-Hant"` and then to
//! `"zh"`.

/// A closed set of locale codes known at compile time.
///
/// Implement this for an application's locale enum to look phrasebooks up
/// without stringly-typed codes.
///
/// ```
/// use blaze_i18n::LocaleCode;
///
/// #[derive(Clone, Copy)]
/// enum Lang {
///     EnUs,
///     EnGb,
/// }
///
/// impl LocaleCode for Lang {
///     fn code(&self) -> &'static str {
///         match self {
///             Lang::EnUs => "en-US",
///             Lang::EnGb => "en-GB",
///         }
///     }
/// }
///
/// assert_eq!(Lang::EnGb.code(), "en-GB");
/// ```
pub trait LocaleCode {
    /// The locale code as it appears in the phrasebook collection.
    fn code(&self) -> &'static str;
}

impl LocaleCode for &'static str {
    fn code(&self) -> &'static str {
        *self
    }
}

/// Strip the trailing `-subtag` from a locale code.
///
/// Returns `None` when there is nothing left to strip, or when stripping
/// would leave an empty prefix (`"-x"`).
#[must_use]
pub fn parent(locale: &str) -> Option<&str> {
    match locale.rfind('-') {
        Some(idx) if idx > 0 => Some(&locale[..idx]),
        _ => None,
    }
}

/// Iterate over a locale code and each of its shorter prefixes.
///
/// ```
/// use blaze_i18n::locale::prefix_chain;
///
/// let chain: Vec<&str> = prefix_chain("zh-Hant-TW").collect();
/// assert_eq!(chain, ["zh-Hant-TW", "zh-Hant", "zh"]);
/// ```
pub fn prefix_chain(locale: &str) -> impl Iterator<Item = &str> {
    let first = (!locale.is_empty()).then_some(locale);
    std::iter::successors(first, |current| parent(*current))
}

/// The coarse family key used when an exact locale match fails: the first
/// `len` characters of `locale`.
///
/// Counts characters, not bytes, so arbitrary input never splits a code
/// point. Inputs shorter than `len` are returned whole.
#[must_use]
pub fn family_key(locale: &str, len: usize) -> &str {
    match locale.char_indices().nth(len) {
        Some((idx, _)) => &locale[..idx],
        None => locale,
    }
}
