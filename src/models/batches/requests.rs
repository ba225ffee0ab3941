use crate::models::common::actor::ActorRef;
use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

/// 创建批次请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct CreateBatchRequest {
    pub name: String,
    pub academic_year: String,
    pub department: String,
    pub creator: ActorRef,
    /// 创建时直接纳入的学生
    pub student_ids: Option<Vec<i64>>,
}

/// 更新批次请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct UpdateBatchRequest {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub department: Option<String>,
}

/// 批次成员变更请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct BatchMemberRequest {
    pub student_id: i64,
}

/// 批次列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct BatchListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub academic_year: Option<String>,
    pub department: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct BatchListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub academic_year: Option<String>,
    pub department: Option<String>,
}

impl From<BatchListParams> for BatchListQuery {
    fn from(params: BatchListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            academic_year: params.academic_year,
            department: params.department,
        }
    }
}
