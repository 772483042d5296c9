//! TTL-gated memoization for generated rule sets.
//!
//! Reflective rule generation enumerates every exposed capability method of a
//! registered set, which is assumed costly. This crate stores the generated
//! rule sets keyed by set identifier so repeated generation within a TTL
//! window can skip the scan.
//!
//! Backends implement [`RuleCache`]. `get` deliberately returns stale entries;
//! the generator compares the entry's `stored_at` against its own TTL, so the
//! same entry can be fresh for one caller and expired for another.
//!
//! # Example
//!
//! ```
//! use cache::{MemoryCache, RuleCache, RuleMap};
//!
//! let mut cache = MemoryCache::new();
//!
//! let rules = RuleMap::from([
//!     ("watch".to_string(), "videos.watch".to_string()),
//!     ("upload".to_string(), "videos.upload".to_string()),
//! ]);
//! cache.put("videos", &rules, 60)?;
//!
//! let entry = cache.get("videos")?.unwrap();
//! assert_eq!(entry.rules, rules);
//! assert!(entry.is_fresh(60));
//! # Ok::<(), cache::Error>(())
//! ```
//!
//! [`SqliteCache`] provides the same interface backed by a SQLite file for
//! rule sets that should outlive the process.

mod entry;
mod error;
mod memory;
mod store;

pub use entry::{CacheEntry, RuleCache, RuleMap};
pub use error::{Error, Result};
pub use memory::MemoryCache;
pub use store::SqliteCache;
