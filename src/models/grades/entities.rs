use crate::models::common::actor::ActorRef;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分状态
//
// 不变式：status == Graded 当且仅当 grade 非空；graded_at 非空当且仅当已评分。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum GradeStatus {
    Pending, // 占位，等待评分
    Graded,  // 已评分
}

impl GradeStatus {
    pub const PENDING: &'static str = "pending";
    pub const GRADED: &'static str = "graded";

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeStatus::Pending => Self::PENDING,
            GradeStatus::Graded => Self::GRADED,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            Self::PENDING => Some(GradeStatus::Pending),
            Self::GRADED => Some(GradeStatus::Graded),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for GradeStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        GradeStatus::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("无效的评分状态: '{s}'. 支持: pending, graded"))
        })
    }
}

impl std::fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 成绩占位行：(task, student) 的派生联结实体
///
/// 不变式：行存在当且仅当该学生此刻经由某个批次注册在任务所属课程中。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub task_id: i64,
    pub student_id: i64,
    // 冗余自任务所属课程，查询/按课程级联时直接命中
    pub course_id: i64,
    // 得分，null 表示尚未评分
    pub grade: Option<f64>,
    pub status: GradeStatus,
    pub feedback: Option<String>,
    // 指向该 (task, student) 的提交，可能尚无提交
    pub submission_id: Option<i64>,
    pub graded_by: Option<ActorRef>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
