//! SQLite cache backend.

use crate::{CacheEntry, Result, RuleCache, RuleMap};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed rule cache.
///
/// Entries survive process restarts. Expiry is still decided by the caller
/// against `stored_at`; the stored TTL column is advisory.
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    /// Open or create a cache at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.init_schema()?;
        Ok(cache)
    }

    /// Create an in-memory cache (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let cache = Self { conn };
        cache.init_schema()?;
        Ok(cache)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS rule_sets (
                key TEXT PRIMARY KEY,
                stored_at TEXT NOT NULL,
                ttl INTEGER NOT NULL,
                rules TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl RuleCache for SqliteCache {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let row = self
            .conn
            .query_row(
                "SELECT stored_at, rules FROM rule_sets WHERE key = ?1",
                [key],
                |row| {
                    let stored_at: String = row.get(0)?;
                    let rules: String = row.get(1)?;
                    Ok((stored_at, rules))
                },
            )
            .optional()?;

        let Some((stored_at, rules)) = row else {
            return Ok(None);
        };

        // A corrupt timestamp reads as a miss, which just costs a re-scan.
        let Ok(stored_at) = stored_at.parse::<DateTime<Utc>>() else {
            return Ok(None);
        };
        let rules: RuleMap = serde_json::from_str(&rules)?;

        Ok(Some(CacheEntry { rules, stored_at }))
    }

    fn put(&mut self, key: &str, rules: &RuleMap, ttl: u64) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO rule_sets (key, stored_at, ttl, rules) VALUES (?1, ?2, ?3, ?4)",
            params![
                key,
                Utc::now().to_rfc3339(),
                ttl as i64,
                serde_json::to_string(rules)?,
            ],
        )?;
        Ok(())
    }
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
    fn put_then_get_round_trips() {
        let mut cache = SqliteCache::in_memory().unwrap();
        cache.put("videos", &sample_rules(), 60).unwrap();

        let entry = cache.get("videos").unwrap().unwrap();
        assert_eq!(entry.rules, sample_rules());
        assert!(entry.is_fresh(60));
    }

    #[test]
    fn missing_key_is_none() {
        let cache = SqliteCache::in_memory().unwrap();
        assert!(cache.get("videos").unwrap().is_none());
    }

    #[test]
    fn put_replaces_existing_key() {
        let mut cache = SqliteCache::in_memory().unwrap();
        cache.put("videos", &sample_rules(), 60).unwrap();

        let updated = RuleMap::from([("watch".to_string(), "videos.watch".to_string())]);
        cache.put("videos", &updated, 120).unwrap();

        let entry = cache.get("videos").unwrap().unwrap();
        assert_eq!(entry.rules, updated);
    }

    #[test]
    fn corrupt_timestamp_reads_as_miss() {
        let mut cache = SqliteCache::in_memory().unwrap();
        cache.put("videos", &sample_rules(), 60).unwrap();
        cache
            .conn
            .execute("UPDATE rule_sets SET stored_at = 'not-a-time'", [])
            .unwrap();

        assert!(cache.get("videos").unwrap().is_none());
    }
}
