use crate::models::common::pagination::PaginationInfo;
use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

/// 学生详情，附带所属批次
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub batch_ids: Vec<i64>,
}
