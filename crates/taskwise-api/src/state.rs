use std::sync::Arc;

use sqlx::postgres::PgPool;
use taskwise_db::PgTaskStore;

use crate::read::ReadCoordinator;

/// Shared application state passed to all route handlers
///
/// The read coordinator (and the caches inside it) is built once here and
/// injected; it lives for the whole process and dies with it.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub reads: Arc<ReadCoordinator<PgTaskStore>>,
}
