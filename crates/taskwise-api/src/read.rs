//! Conditional read path
//!
//! One coordinator drives both read endpoints. A read either short-circuits
//! on a live cache entry (304 upstream), fetches and caches a fresh payload
//! (200), or reports that nothing exists (404). The cache's version-token
//! comparison decides between the first two after a fetch.

use chrono::Duration;
use taskwise_db::{TaskRow, TaskStore};
use versioned_cache::VersionedCache;

/// Outcome of one conditional read. Store failures are not an outcome;
/// they propagate as the `Err` arm and the boundary maps them to 500.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    /// Malformed identifiers, detected before any I/O.
    InvalidRequest,
    /// Payload fetched and the stored version token changed (or was new).
    Fresh(T),
    /// Either a live cache entry existed, or the fetched token matched the
    /// cached one. Carries no payload.
    NotModified,
    /// The store has no such record (or the page came back empty).
    NotFound,
}

/// Orchestrates conditional reads against the store and the caches.
///
/// A cache hit answers `NotModified` without re-validating against the
/// store: between a mutation and TTL expiry, reads may serve stale
/// not-modified answers. That window is an accepted property of the
/// design, as is keying a page's freshness off its first row's token.
pub struct ReadCoordinator<S> {
    store: S,
    tasks: VersionedCache<TaskRow>,
    pages: VersionedCache<Vec<TaskRow>>,
    ttl: Duration,
}

fn cache_key(resource_id: i32) -> String {
    format!("task-{resource_id}")
}

impl<S: TaskStore> ReadCoordinator<S> {
    pub fn new(store: S, ttl: Duration) -> Self {
        Self {
            store,
            tasks: VersionedCache::new(),
            pages: VersionedCache::new(),
            ttl,
        }
    }

    /// Conditionally read a single task.
    pub async fn read_one(
        &self,
        user_id: i32,
        task_id: i32,
    ) -> Result<ReadOutcome<TaskRow>, sqlx::Error> {
        if user_id <= 0 || task_id <= 0 {
            return Ok(ReadOutcome::InvalidRequest);
        }

        let key = cache_key(task_id);
        if self.tasks.get(&key).await.is_some() {
            return Ok(ReadOutcome::NotModified);
        }

        let Some(task) = self.store.get_by_id(task_id, user_id).await? else {
            return Ok(ReadOutcome::NotFound);
        };

        let version = task.row_version.clone();
        let changed = self.tasks.put(&key, task.clone(), &version, self.ttl).await;
        if changed {
            Ok(ReadOutcome::Fresh(task))
        } else {
            Ok(ReadOutcome::NotModified)
        }
    }

    /// Conditionally read one page of a to-do list's tasks.
    ///
    /// `skip` is a 1-based page number; `limit` is capped at 50. The page
    /// is cached under the list's key and versioned by the first row's
    /// token. An empty page is `NotFound`, cached or not.
    pub async fn read_page(
        &self,
        user_id: i32,
        todo_id: i32,
        skip: i32,
        limit: i32,
    ) -> Result<ReadOutcome<Vec<TaskRow>>, sqlx::Error> {
        if user_id <= 0 || todo_id <= 0 || skip < 1 || limit < 1 || limit > 50 {
            return Ok(ReadOutcome::InvalidRequest);
        }

        let key = cache_key(todo_id);
        if self.pages.get(&key).await.is_some() {
            return Ok(ReadOutcome::NotModified);
        }

        let rows = self.store.get_page(user_id, todo_id, skip, limit).await?;
        let Some(first) = rows.first() else {
            return Ok(ReadOutcome::NotFound);
        };

        let version = first.row_version.clone();
        let changed = self.pages.put(&key, rows.clone(), &version, self.ttl).await;
        if changed {
            Ok(ReadOutcome::Fresh(rows))
        } else {
            Ok(ReadOutcome::NotModified)
        }
    }
}
