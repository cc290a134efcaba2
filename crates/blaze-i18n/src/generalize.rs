//! Generalization: pick one compacted phrasebook per locale family.
//!
//! Each locale claims its own code and every shorter dash-prefix of it.
//! The first locale (in collection order) to reach a prefix keeps it.

use std::sync::Arc;

use rustc_hash::FxHashMap;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::locale::prefix_chain;
use crate::phrase::Phrasebook;
use crate::PhrasebookMap;

/// Map every locale prefix to the first compacted phrasebook that reaches it.
pub fn generalize<V>(compacted: &[(String, Arc<Phrasebook<V>>)]) -> PhrasebookMap<V> {
    let mut families = FxHashMap::default();
    for (locale, book) in compacted {
        for prefix in prefix_chain(locale) {
            if families.contains_key(prefix) {
                continue;
            }
            #[cfg(feature = "tracing")]
            trace!(prefix, locale = locale.as_str(), "locale family claimed");
            families.insert(prefix.to_owned(), Arc::clone(book));
        }
    }
    families
}
