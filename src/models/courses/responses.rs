use crate::models::common::pagination::PaginationInfo;
use crate::models::courses::entities::Course;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

/// 课程详情，附带批次与教师引用
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub batch_ids: Vec<i64>,
    pub faculty_ids: Vec<i64>,
}

/// 课程名册：当前有效注册学生（各批次学生集合的去重并集，查询时派生）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseRosterResponse {
    pub course_id: i64,
    pub student_ids: Vec<i64>,
}
