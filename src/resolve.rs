//! Identity resolution for scraped records.
//!
//! A scraped record carries a numeric source ID assigned by the stats site
//! (possibly absent or malformed) and a display name. Resolution maps the
//! record to an internal database id using a read-only snapshot of existing
//! rows taken once at the start of a load pass: source ID first, canonical
//! name second, unresolved otherwise. The snapshot is never mutated here;
//! creating missing entities is the loader's job.

use rustc_hash::FxHashMap;

/// Parse a scraped source-ID field. Empty or non-numeric strings mean the
/// site did not assign one; that is an absent ID, not an error.
pub fn parse_source_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Read-only snapshot of one entity table, keyed both ways.
///
/// Names stored here are canonical: the caller applies the alias table
/// before inserting or looking up.
#[derive(Default, Debug)]
pub struct EntitySnapshot {
    by_source_id: FxHashMap<i64, i64>,
    by_name: FxHashMap<String, i64>,
}

impl EntitySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source_id: Option<i64>, name: &str, internal_id: i64) {
        if let Some(sid) = source_id {
            self.by_source_id.insert(sid, internal_id);
        }
        self.by_name.insert(name.to_string(), internal_id);
    }

    /// Resolve by source ID, then by canonical name.
    ///
    /// The source ID wins even when the name maps to a different row: the
    /// site renames schools but never reassigns their numeric ids.
    pub fn resolve(&self, source_id: Option<i64>, name: &str) -> Option<i64> {
        if let Some(sid) = source_id {
            if let Some(&id) = self.by_source_id.get(&sid) {
                return Some(id);
            }
        }
        self.by_name.get(name).copied()
    }

    pub fn resolve_source_id(&self, source_id: i64) -> Option<i64> {
        self.by_source_id.get(&source_id).copied()
    }

    pub fn resolve_name(&self, name: &str) -> Option<i64> {
        self.by_name.get(name).copied()
    }

    pub fn contains_source_id(&self, source_id: i64) -> bool {
        self.by_source_id.contains_key(&source_id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len().max(self.by_source_id.len())
    }

    pub fn is_empty(&self) -> bool {
        self.by_source_id.is_empty() && self.by_name.is_empty()
    }
}
