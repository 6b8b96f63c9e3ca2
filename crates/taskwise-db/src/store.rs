//! Store seam for the conditional read path
//!
//! The read coordinator in the API crate talks to the database through this
//! trait so tests can substitute an in-memory store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::tasks;
use crate::types::TaskRow;

/// Read operations the conditional read path needs from storage.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get_by_id(&self, task_id: i32, user_id: i32)
        -> Result<Option<TaskRow>, sqlx::Error>;

    async fn get_page(
        &self,
        user_id: i32,
        todo_id: i32,
        skip: i32,
        limit: i32,
    ) -> Result<Vec<TaskRow>, sqlx::Error>;
}

/// PostgreSQL-backed store used in production.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn get_by_id(
        &self,
        task_id: i32,
        user_id: i32,
    ) -> Result<Option<TaskRow>, sqlx::Error> {
        tasks::get_by_id(&self.pool, task_id, user_id).await
    }

    async fn get_page(
        &self,
        user_id: i32,
        todo_id: i32,
        skip: i32,
        limit: i32,
    ) -> Result<Vec<TaskRow>, sqlx::Error> {
        tasks::get_page(&self.pool, user_id, todo_id, skip, limit).await
    }
}
