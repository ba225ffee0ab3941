use crate::models::common::actor::ActorRef;
use crate::models::common::pagination::PaginationQuery;
use crate::models::grades::entities::GradeStatus;
use serde::Deserialize;
use ts_rs::TS;

/// 批量评分的单项
///
/// grade 为 null 表示撤销评分，行回到 Pending 并清空 graded_at。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkGradeEntry {
    pub grade_id: i64,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
}

/// 批量评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkApplyGradesRequest {
    pub grader: ActorRef,
    pub entries: Vec<BulkGradeEntry>,
}

/// 成绩列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub task_id: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<GradeStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub task_id: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<GradeStatus>,
}

impl From<GradeListParams> for GradeListQuery {
    fn from(params: GradeListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            task_id: params.task_id,
            student_id: params.student_id,
            course_id: params.course_id,
            status: params.status,
        }
    }
}
