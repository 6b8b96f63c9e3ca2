use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// Task row returned from SELECT queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TaskRow {
    pub id: i32,
    pub name: String,
    pub is_completed: bool,
    /// Storage-level concurrency stamp, rewritten by the database on every
    /// mutation. Drives conditional reads; never exposed to clients.
    #[serde(skip)]
    #[ts(skip)]
    pub row_version: Vec<u8>,
}

/// Parameters for inserting a single task.
#[derive(Debug, Clone)]
pub struct CreateTaskParams {
    pub todo_id: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_row_serialization_is_camel_case_without_version() {
        let row = TaskRow {
            id: 2548,
            name: "Dragon Ball Z".to_string(),
            is_completed: false,
            row_version: vec![4, 2],
        };

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"isCompleted\":false"));
        assert!(json.contains("Dragon Ball Z"));
        assert!(!json.contains("rowVersion"));
        assert!(!json.contains("row_version"));
    }
}
