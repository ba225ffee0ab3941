use crate::models::common::pagination::PaginationInfo;
use crate::models::grades::entities::Grade;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
    pub pagination: PaginationInfo,
}

/// 批量评分的单项结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkApplyOutcome {
    pub grade_id: i64,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 批量评分结果：各项独立落库，部分失败不回滚已生效项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkApplyGradesResponse {
    pub applied: usize,
    pub failed: usize,
    pub outcomes: Vec<BulkApplyOutcome>,
}
