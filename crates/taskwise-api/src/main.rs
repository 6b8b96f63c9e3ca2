mod config;
mod error;
mod read;
mod routes;
mod state;
mod validation;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post, put};
use axum::Router;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use taskwise_db::PgTaskStore;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use config::Config;
use read::ReadCoordinator;
use state::AppState;

/// Create the HTTP router
fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(routes::health::health))
        // Conditional reads - the literal "users" segment wins over {task_id}
        .route(
            "/api/v1/task/users/{user_id}/tasks",
            get(routes::tasks::get_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/v1/task/{task_id}/users/{user_id}/tasks",
            get(routes::tasks::get_task),
        )
        // Writes
        .route(
            "/api/v1/task/users/{user_id}/tasks/{todo_id}",
            post(routes::tasks::create_task_list),
        )
        .route(
            "/api/v1/task/update/name/{task_id}",
            put(routes::tasks::update_name),
        )
        .route(
            "/api/v1/task/update/completed/{task_id}",
            put(routes::tasks::update_is_completed),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskwise_api=info".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    info!(port = config.port, "Starting taskwise-api");

    // Connect to database
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let reads = ReadCoordinator::new(
        PgTaskStore::new(pool.clone()),
        Duration::minutes(config.cache_ttl_minutes),
    );

    let state = AppState {
        pool,
        reads: Arc::new(reads),
    };

    // CORS
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    };

    let app = create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind");

    info!(port = config.port, "Listening");

    axum::serve(listener, app).await.expect("Server failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// State over a lazy pool: routes that fail validation never touch it.
    fn test_state() -> AppState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/taskwise-test")
            .expect("lazy pool");
        let reads = ReadCoordinator::new(PgTaskStore::new(pool.clone()), Duration::minutes(3));
        AppState {
            pool,
            reads: Arc::new(reads),
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_task_rejects_negative_user_id() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/task/5/users/-1/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_tasks_rejects_oversized_limit() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/task/users/13241/tasks?toDoId=193827&skip=1&limit=51")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_task_rejects_empty_name() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/task/users/13241/tasks")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"toDoId": 193827, "name": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_name_rejects_non_positive_user_id() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/task/update/name/5")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"userId": 0, "name": "renamed"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
