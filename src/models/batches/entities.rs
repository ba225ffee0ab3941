use crate::models::common::actor::ActorRef;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct Batch {
    // 批次ID
    pub id: i64,
    // 批次名称
    pub name: String,
    // 学年，如 "2025-2026"
    pub academic_year: String,
    // 院系
    pub department: String,
    // 创建者（管理员或教师）
    pub creator: ActorRef,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
