//! Versioned key/value store with in-memory entries and lazy TTL expiry

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::types::CacheEntry;

/// An in-memory cache keyed by string, where every write carries the
/// record's version token and a TTL.
///
/// `put` compares the incoming token byte-wise against the live entry under
/// the same key and reports whether the stored token changed. Payload
/// contents are never compared. Entries past their expiry are treated as
/// absent by both `get` and `put`; nothing sweeps them proactively.
///
/// The whole map sits behind a single `RwLock`, so a `put` is atomic with
/// respect to concurrent `get`s and `put`s: a reader never observes a
/// payload from one write paired with a token from another.
pub struct VersionedCache<T> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
}

impl<T> Default for VersionedCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VersionedCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Clone> VersionedCache<T> {
    /// Look up a live entry's payload. Expired entries count as absent,
    /// indistinguishable from keys that were never written.
    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some(entry) if entry.is_expired(Utc::now()) => {
                debug!(key = %key, "Cache entry expired");
                None
            }
            Some(entry) => {
                debug!(key = %key, "Cache hit");
                Some(entry.payload.clone())
            }
            None => {
                debug!(key = %key, "Cache miss");
                None
            }
        }
    }

    /// Store `payload` under `key` with expiry `now + ttl`, returning
    /// whether the stored version token changed.
    ///
    /// If no live entry exists under `key` (none, or only an expired one),
    /// or the live entry's token differs from `version`, the entry is
    /// replaced entirely and `true` is returned. If the live entry carries
    /// an equal token, only its expiry is renewed and `false` is returned.
    ///
    /// A non-positive `ttl` produces an entry that is already expired, so
    /// the write is observable by nothing but the very next `put`'s
    /// replace path.
    pub async fn put(&self, key: &str, payload: T, version: &[u8], ttl: Duration) -> bool {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get_mut(key) {
            if !entry.is_expired(now) && entry.version == version {
                // Unchanged: sliding renewal only.
                entry.expires_at = now + ttl;
                debug!(key = %key, "Cache entry unchanged, expiry renewed");
                return false;
            }
        }

        entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                version: version.to_vec(),
                expires_at: now + ttl,
            },
        );
        debug!(key = %key, "Cache entry stored");
        true
    }
}

impl<T> Clone for VersionedCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(n: i64) -> Duration {
        Duration::minutes(n)
    }

    #[tokio::test]
    async fn test_first_put_reports_changed_and_get_returns_payload() {
        let cache = VersionedCache::new();

        let changed = cache.put("task-2548", "Dragon Ball Z", &[4, 2], minutes(3)).await;

        assert!(changed);
        assert_eq!(cache.get("task-2548").await, Some("Dragon Ball Z"));
    }

    #[tokio::test]
    async fn test_put_with_equal_token_reports_unchanged() {
        let cache = VersionedCache::new();

        assert!(cache.put("task-1", "a", &[4, 2], minutes(3)).await);
        assert!(!cache.put("task-1", "a", &[4, 2], minutes(3)).await);
    }

    #[tokio::test]
    async fn test_put_with_differing_token_replaces_entry() {
        let cache = VersionedCache::new();

        assert!(cache.put("task-1", "old", &[0, 1], minutes(3)).await);
        assert!(cache.put("task-1", "new", &[0, 2], minutes(3)).await);
        assert_eq!(cache.get("task-1").await, Some("new"));
    }

    #[tokio::test]
    async fn test_get_misses_on_unknown_key() {
        let cache: VersionedCache<&str> = VersionedCache::new();
        assert_eq!(cache.get("task-99999").await, None);
    }

    #[tokio::test]
    async fn test_zero_ttl_entry_is_absent_immediately() {
        let cache = VersionedCache::new();

        assert!(cache.put("task-1", "a", &[4, 2], Duration::zero()).await);
        assert_eq!(cache.get("task-1").await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_does_not_participate_in_comparison() {
        let cache = VersionedCache::new();

        assert!(cache.put("task-1", "a", &[4, 2], Duration::zero()).await);
        // Same token, but the prior entry is expired, so this is a fresh store.
        assert!(cache.put("task-1", "a", &[4, 2], minutes(3)).await);
        assert_eq!(cache.get("task-1").await, Some("a"));
    }

    #[tokio::test]
    async fn test_unchanged_put_renews_expiry() {
        let cache = VersionedCache::new();

        assert!(cache.put("task-1", "a", &[4, 2], minutes(3)).await);
        assert!(!cache.put("task-1", "a", &[4, 2], minutes(10)).await);
        assert_eq!(cache.get("task-1").await, Some("a"));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = VersionedCache::new();

        assert!(cache.put("task-1", "a", &[1], minutes(3)).await);
        assert!(cache.put("task-2", "b", &[1], minutes(3)).await);
        assert_eq!(cache.get("task-1").await, Some("a"));
        assert_eq!(cache.get("task-2").await, Some("b"));
    }
}
