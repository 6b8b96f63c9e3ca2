//! In-memory cache with version-token write semantics and TTL expiration
//!
//! Stores opaque payloads keyed by string, each tagged with a version token
//! taken from the underlying record's storage-level concurrency stamp.
//! `put` reports whether the stored token changed, which is what drives
//! conditional (200 vs 304) read responses upstream.

mod cache;
mod types;

pub use cache::VersionedCache;
pub use types::CacheEntry;
