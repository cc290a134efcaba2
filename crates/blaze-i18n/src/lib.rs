#![forbid(unsafe_code)]

//! Static phrasebooks with locale fallback.
//!
//! Build a [`PhrasebookCollection`] of per-locale [`Phrasebook`]s, pick a
//! default locale, and hand both to a [`Resolver`]. Construction does all
//! the work up front:
//!
//! - **Compaction**: every locale is backfilled with the keys it is missing,
//!   first from its optional intermediate fallback table, then from the
//!   default locale.
//! - **Generalization**: every locale family (`"es"` for `"es-AR"`) is
//!   mapped to the first compacted phrasebook that belongs to it.
//!
//! Lookups afterwards never fail: an exact locale match wins, then the
//! family of the first two characters, then the default locale.

pub mod collection;
pub mod compact;
pub mod config;
pub mod coverage;
pub mod error;
pub mod generalize;
pub mod locale;
pub mod phrase;
pub mod resolver;

use std::sync::Arc;

use rustc_hash::FxHashMap;

pub use collection::{FALLBACK_SUFFIX, LocaleEntry, PhrasebookCollection};
pub use config::ResolverConfig;
pub use coverage::{CoverageReport, LocaleCoverage};
pub use error::ConfigurationError;
pub use locale::LocaleCode;
pub use phrase::{Phrase, Phrasebook};
pub use resolver::{MatchKind, Resolved, Resolver};

/// Compacted phrasebooks keyed by locale code or family prefix.
pub type PhrasebookMap<V = Phrase> = FxHashMap<String, Arc<Phrasebook<V>>>;
