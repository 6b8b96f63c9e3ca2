use crate::types::{CreateTaskParams, TaskRow};
use sqlx::PgPool;

/// Fetch a single task by id, scoped to the owning user.
pub async fn get_by_id(
    pool: &PgPool,
    task_id: i32,
    user_id: i32,
) -> Result<Option<TaskRow>, sqlx::Error> {
    sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT t.id, t.name, t.is_completed, t.row_version
        FROM tasks t
        JOIN todo_lists l ON l.id = t.todo_list_id
        WHERE t.id = $1 AND l.user_id = $2
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Fetch a page of tasks for one to-do list.
///
/// `skip` is a 1-based page number, so page 1 with limit 50 reads the first
/// 50 rows.
pub async fn get_page(
    pool: &PgPool,
    user_id: i32,
    todo_id: i32,
    skip: i32,
    limit: i32,
) -> Result<Vec<TaskRow>, sqlx::Error> {
    sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT t.id, t.name, t.is_completed, t.row_version
        FROM tasks t
        JOIN todo_lists l ON l.id = t.todo_list_id
        WHERE l.id = $1 AND l.user_id = $2
        ORDER BY t.id
        OFFSET ($3 - 1) * $4
        LIMIT $4
        "#,
    )
    .bind(todo_id)
    .bind(user_id)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Insert a task into one of the user's lists, returning the new task id.
/// `None` means the list already holds a task with that name (or the list
/// is not the user's), which the API surfaces as a conflict.
pub async fn insert(
    pool: &PgPool,
    user_id: i32,
    p: &CreateTaskParams,
) -> Result<Option<i32>, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as(
        r#"
        INSERT INTO tasks (todo_list_id, name, is_completed)
        SELECT l.id, $3, FALSE
        FROM todo_lists l
        WHERE l.id = $1 AND l.user_id = $2
        ON CONFLICT (todo_list_id, name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(p.todo_id)
    .bind(user_id)
    .bind(&p.name)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| r.0))
}

/// Insert a batch of tasks into one list, returning how many rows landed.
/// Zero means every name collided (or the list is not the user's).
pub async fn insert_many(
    pool: &PgPool,
    user_id: i32,
    todo_id: i32,
    names: &[String],
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO tasks (todo_list_id, name, is_completed)
        SELECT l.id, n.name, FALSE
        FROM todo_lists l
        CROSS JOIN UNNEST($3::text[]) AS n(name)
        WHERE l.id = $1 AND l.user_id = $2
        ON CONFLICT (todo_list_id, name) DO NOTHING
        "#,
    )
    .bind(todo_id)
    .bind(user_id)
    .bind(names)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Rename a task, scoped to the owning user. Returns whether a row changed.
pub async fn update_name(
    pool: &PgPool,
    task_id: i32,
    user_id: i32,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE tasks t
        SET name = $3
        FROM todo_lists l
        WHERE t.id = $1 AND t.todo_list_id = l.id AND l.user_id = $2
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .bind(name)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Flip a task's completion flag, scoped to the owning user.
pub async fn update_is_completed(
    pool: &PgPool,
    task_id: i32,
    user_id: i32,
    is_completed: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE tasks t
        SET is_completed = $3
        FROM todo_lists l
        WHERE t.id = $1 AND t.todo_list_id = l.id AND l.user_id = $2
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .bind(is_completed)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
