use crate::models::common::pagination::PaginationQuery;
use crate::models::tasks::entities::TaskType;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 创建任务请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct CreateTaskRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub task_type: Option<TaskType>,
    pub max_points: Option<f64>,
    pub publish_at: DateTime<Utc>, // ISO 8601 格式，如 "2026-03-24T12:00:00Z"
    pub due_at: DateTime<Utc>,
}

/// 更新任务请求
///
/// course_id 变更会触发成绩占位行的先删后建同步。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct UpdateTaskRequest {
    pub course_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub task_type: Option<TaskType>,
    pub max_points: Option<f64>,
    pub publish_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
}

/// 任务列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct TaskListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct TaskListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub search: Option<String>,
}

impl From<TaskListParams> for TaskListQuery {
    fn from(params: TaskListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            course_id: params.course_id,
            search: params.search,
        }
    }
}
