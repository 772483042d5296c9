//! In-memory cache backend.

use crate::{CacheEntry, Result, RuleCache, RuleMap};
use std::collections::HashMap;

/// HashMap-backed cache for tests and single-process use.
///
/// Entries are never evicted; staleness is the caller's check, as with every
/// backend.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, rules: &RuleMap, _ttl: u64) -> Result<()> {
        self.entries
            .insert(key.to_string(), CacheEntry::new(rules.clone()));
        Ok(())
    }
}
