use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use ts_rs::TS;

use taskwise_db::{tasks, CreateTaskParams};

use crate::error::AppError;
use crate::read::ReadOutcome;
use crate::state::AppState;
use crate::validation::{validate_id, validate_string_length};

const MAX_NAME_LEN: usize = 255;

fn read_response<T: serde::Serialize>(outcome: ReadOutcome<T>) -> Result<Response, AppError> {
    match outcome {
        ReadOutcome::InvalidRequest => {
            Err(AppError::BadRequest("identifiers must be positive".into()))
        }
        ReadOutcome::Fresh(payload) => Ok(Json(payload).into_response()),
        ReadOutcome::NotModified => Ok(StatusCode::NOT_MODIFIED.into_response()),
        ReadOutcome::NotFound => Err(AppError::NotFound("no tasks found".into())),
    }
}

/// GET /api/v1/task/{task_id}/users/{user_id}/tasks
///
/// Conditional read of a single task: 200 with the task, 304 when the
/// cached version token still matches, 404 when the user has no such task.
pub async fn get_task(
    State(state): State<AppState>,
    Path((task_id, user_id)): Path<(i32, i32)>,
) -> Result<Response, AppError> {
    read_response(state.reads.read_one(user_id, task_id).await?)
}

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GetTasksParams {
    to_do_id: i32,
    /// 1-based page number
    skip: Option<i32>,
    /// page size, capped at 50
    limit: Option<i32>,
}

/// GET /api/v1/task/users/{user_id}/tasks?toDoId&skip&limit
///
/// Conditional read of one page of a to-do list. Same 200/304/404 contract
/// as the single-task read; an empty page is a 404.
pub async fn get_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(params): Query<GetTasksParams>,
) -> Result<Response, AppError> {
    let skip = params.skip.unwrap_or(1);
    let limit = params.limit.unwrap_or(50);

    read_response(
        state
            .reads
            .read_page(user_id, params.to_do_id, skip, limit)
            .await?,
    )
}

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CreateTaskRequest {
    to_do_id: i32,
    name: String,
}

/// POST /api/v1/task/users/{user_id}/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<Response, AppError> {
    validate_id(user_id, "userId")?;
    validate_id(body.to_do_id, "toDoId")?;
    validate_string_length(&body.name, 1, MAX_NAME_LEN, "name")?;

    let params = CreateTaskParams {
        todo_id: body.to_do_id,
        name: body.name,
    };
    let Some(id) = tasks::insert(&state.pool, user_id, &params).await? else {
        return Err(AppError::Conflict("task already exists".into()));
    };

    info!(user_id, task_id = id, "Created task");
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CreateTaskItem {
    name: String,
}

/// POST /api/v1/task/users/{user_id}/tasks/{todo_id}
pub async fn create_task_list(
    State(state): State<AppState>,
    Path((user_id, todo_id)): Path<(i32, i32)>,
    Json(body): Json<Vec<CreateTaskItem>>,
) -> Result<Response, AppError> {
    validate_id(user_id, "userId")?;
    validate_id(todo_id, "toDoId")?;
    if body.is_empty() {
        return Err(AppError::BadRequest("tasks must not be empty".into()));
    }
    for item in &body {
        validate_string_length(&item.name, 1, MAX_NAME_LEN, "name")?;
    }

    let names: Vec<String> = body.into_iter().map(|t| t.name).collect();
    let inserted = tasks::insert_many(&state.pool, user_id, todo_id, &names).await?;
    if inserted == 0 {
        return Err(AppError::Conflict("tasks already exist".into()));
    }

    info!(user_id, todo_id, inserted, "Created task list");
    Ok((StatusCode::CREATED, Json(json!({ "inserted": inserted }))).into_response())
}

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UpdateNameRequest {
    user_id: i32,
    name: String,
}

/// PUT /api/v1/task/update/name/{task_id}
pub async fn update_name(
    State(state): State<AppState>,
    Path(task_id): Path<i32>,
    Json(body): Json<UpdateNameRequest>,
) -> Result<StatusCode, AppError> {
    validate_id(task_id, "taskId")?;
    validate_id(body.user_id, "userId")?;
    validate_string_length(&body.name, 1, MAX_NAME_LEN, "name")?;

    let updated = tasks::update_name(&state.pool, task_id, body.user_id, &body.name).await?;
    if !updated {
        return Err(AppError::NotFound("task not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UpdateIsCompletedRequest {
    user_id: i32,
    is_completed: bool,
}

/// PUT /api/v1/task/update/completed/{task_id}
pub async fn update_is_completed(
    State(state): State<AppState>,
    Path(task_id): Path<i32>,
    Json(body): Json<UpdateIsCompletedRequest>,
) -> Result<StatusCode, AppError> {
    validate_id(task_id, "taskId")?;
    validate_id(body.user_id, "userId")?;

    let updated =
        tasks::update_is_completed(&state.pool, task_id, body.user_id, body.is_completed).await?;
    if !updated {
        return Err(AppError::NotFound("task not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
