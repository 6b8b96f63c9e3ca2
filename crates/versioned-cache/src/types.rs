//! Cache entry types

use chrono::{DateTime, Utc};

/// A cached payload together with its version token and expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub payload: T,
    /// Opaque storage-level version stamp. Compared byte-wise, never ordered.
    pub version: Vec<u8>,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// An entry past its expiry is treated as absent everywhere.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_entry_not_expired_before_deadline() {
        let now = Utc::now();
        let entry = CacheEntry {
            payload: "hello",
            version: vec![4, 2],
            expires_at: now + Duration::minutes(3),
        };
        assert!(!entry.is_expired(now));
    }

    #[test]
    fn test_entry_expired_at_deadline() {
        let now = Utc::now();
        let entry = CacheEntry {
            payload: "hello",
            version: vec![4, 2],
            expires_at: now,
        };
        assert!(entry.is_expired(now));
        assert!(entry.is_expired(now + Duration::seconds(1)));
    }
}
