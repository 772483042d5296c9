//! Cached rule set types and the backend trait.

use crate::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A generated rule set: rule name to dispatch target (`"set.method"`).
///
/// Only named targets are cacheable, so the map is string-to-string and
/// serializes cleanly.
pub type RuleMap = BTreeMap<String, String>;

/// A cached rule set together with the time it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub rules: RuleMap,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Wrap a rule set with the current timestamp.
    pub fn new(rules: RuleMap) -> Self {
        Self {
            rules,
            stored_at: Utc::now(),
        }
    }

    /// Whether the entry is still valid for a TTL in seconds.
    pub fn is_fresh(&self, ttl: u64) -> bool {
        self.stored_at + Duration::seconds(ttl as i64) > Utc::now()
    }
}

/// Backend for memoizing generated rule sets.
///
/// `get` returns whatever is stored regardless of staleness; callers check
/// freshness against the entry's `stored_at`. The TTL handed to `put` is
/// advisory to the backend.
pub trait RuleCache: Send {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    fn put(&mut self, key: &str, rules: &RuleMap, ttl: u64) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rules() -> RuleMap {
        RuleMap::from([
            ("watch".to_string(), "videos.watch".to_string()),
            ("upload".to_string(), "videos.upload".to_string()),
        ])
    }

    #[test]
    fn fresh_within_ttl() {
        let entry = CacheEntry::new(sample_rules());
        assert!(entry.is_fresh(60));
    }

    #[test]
    fn stale_after_ttl() {
        let entry = CacheEntry {
            rules: sample_rules(),
            stored_at: Utc::now() - Duration::seconds(120),
        };
        assert!(!entry.is_fresh(60));
        assert!(entry.is_fresh(300));
    }

    #[test]
    fn zero_ttl_is_never_fresh() {
        let entry = CacheEntry::new(sample_rules());
        assert!(!entry.is_fresh(0));
    }
}
