//! Deduplication ledger
//!
//! Set of object ids already attributed to some year. Owned by one scan
//! session; the first year to observe an id keeps it.

use rustc_hash::FxHashSet;

#[derive(Debug, Default)]
pub struct DeduplicationLedger {
    seen: FxHashSet<String>,
}

impl DeduplicationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn add(&mut self, id: &str) {
        if !self.seen.contains(id) {
            self.seen.insert(id.to_string());
        }
    }

    /// Add `id` and report whether this call was the first to see it
    pub fn claim(&mut self, id: &str) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
