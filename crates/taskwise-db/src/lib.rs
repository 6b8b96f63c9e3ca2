pub mod store;
pub mod tasks;
pub mod types;

pub use sqlx::postgres::PgPool;
pub use store::{PgTaskStore, TaskStore};
pub use types::*;
