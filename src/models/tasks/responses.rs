use crate::models::common::pagination::PaginationInfo;
use crate::models::tasks::entities::{Task, TaskStatus};
use serde::Serialize;
use ts_rs::TS;

/// 任务响应，虚拟状态在序列化前由当前时间计算
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct TaskResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub task: Task,
    pub status: TaskStatus,
}

impl TaskResponse {
    pub fn with_status(task: Task) -> Self {
        let status = task.virtual_status(chrono::Utc::now());
        Self { task, status }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct TaskListResponse {
    pub items: Vec<TaskResponse>,
    pub pagination: PaginationInfo,
}
