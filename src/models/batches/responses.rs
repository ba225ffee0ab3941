use crate::models::batches::entities::Batch;
use crate::models::common::pagination::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct BatchListResponse {
    pub items: Vec<Batch>,
    pub pagination: PaginationInfo,
}

/// 批次详情，附带成员与挂接的课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct BatchDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub batch: Batch,
    pub student_ids: Vec<i64>,
    pub course_ids: Vec<i64>,
}
