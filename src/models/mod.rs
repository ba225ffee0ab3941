//! 数据模型定义
//!
//! 按领域划分子模块，每个领域内分 entities / requests / responses。

pub mod common;

pub mod batches;
pub mod courses;
pub mod grades;
pub mod students;
pub mod submissions;
pub mod tasks;

pub use common::actor::{ActorKind, ActorRef};
pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
