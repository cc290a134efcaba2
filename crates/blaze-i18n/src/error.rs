//! Construction-time errors.
//!
//! Lookups never fail; everything that can go wrong is reported while the
//! collection is assembled or the resolver is built.

/// Errors from assembling a collection or building a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The designated default locale is not in the collection.
    MissingDefault {
        /// The requested default locale.
        locale: String,
    },
    /// A locale was added to a collection twice.
    DuplicateLocale {
        /// The repeated locale code.
        locale: String,
    },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDefault { locale } => {
                write!(f, "no default phrasebook selected: '{locale}' is not in the collection")
            }
            Self::DuplicateLocale { locale } => {
                write!(f, "duplicate phrasebook for locale '{locale}'")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
