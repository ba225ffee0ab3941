use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

/// 创建课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub faculty_ids: Option<Vec<i64>>,
    /// 创建时直接挂接的批次
    pub batch_ids: Option<Vec<i64>>,
}

/// 更新课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}

/// 课程批次变更请求（挂接/摘除都走这一个入口）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseBatchChangeRequest {
    #[serde(default)]
    pub added_batch_ids: Vec<i64>,
    #[serde(default)]
    pub removed_batch_ids: Vec<i64>,
}

/// 课程教师变更请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseFacultyChangeRequest {
    #[serde(default)]
    pub added_faculty_ids: Vec<i64>,
    #[serde(default)]
    pub removed_faculty_ids: Vec<i64>,
}

/// 课程列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub faculty_id: Option<i64>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub faculty_id: Option<i64>,
}

impl From<CourseListParams> for CourseListQuery {
    fn from(params: CourseListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            faculty_id: params.faculty_id,
        }
    }
}
