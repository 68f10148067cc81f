//! Natural-key bookkeeping for idempotent batch loads.
//!
//! Every copier builds a `KeySet` from the pre-load snapshot of its table,
//! then claims each candidate row's natural key before adding it to the
//! insert batch. A claim fails both for keys already in the database and
//! for keys seen earlier in the same input file, which is how the loader
//! stays idempotent across runs and deduplicates within one scrape.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Set of natural keys known to exist, before and during a batch.
#[derive(Default, Debug)]
pub struct KeySet<K: Eq + Hash> {
    present: FxHashSet<K>,
}

impl<K: Eq + Hash> KeySet<K> {
    pub fn new() -> Self {
        Self {
            present: FxHashSet::default(),
        }
    }

    /// Seed with the keys that exist in the database.
    pub fn from_existing(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            present: keys.into_iter().collect(),
        }
    }

    /// Mark a key as present without claiming it (pre-load seeding).
    pub fn mark(&mut self, key: K) {
        self.present.insert(key);
    }

    /// Claim a key for insertion. Returns `true` if the key was new; the
    /// key is now considered present for the rest of the batch.
    pub fn claim(&mut self, key: K) -> bool {
        self.present.insert(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.present.contains(key)
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }
}
