use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 任务类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub enum TaskType {
    Assignment, // 作业
    Quiz,       // 测验
    Project,    // 项目
    Exam,       // 考试
}

impl TaskType {
    pub const ASSIGNMENT: &'static str = "assignment";
    pub const QUIZ: &'static str = "quiz";
    pub const PROJECT: &'static str = "project";
    pub const EXAM: &'static str = "exam";

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Assignment => Self::ASSIGNMENT,
            TaskType::Quiz => Self::QUIZ,
            TaskType::Project => Self::PROJECT,
            TaskType::Exam => Self::EXAM,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            Self::ASSIGNMENT => Some(TaskType::Assignment),
            Self::QUIZ => Some(TaskType::Quiz),
            Self::PROJECT => Some(TaskType::Project),
            Self::EXAM => Some(TaskType::Exam),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for TaskType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TaskType::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "无效的任务类型: '{s}'. 支持: assignment, quiz, project, exam"
            ))
        })
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// 任务虚拟状态，永不落库
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub enum TaskStatus {
    Upcoming,  // 未发布
    Active,    // 进行中
    Completed, // 已截止
}

impl TaskStatus {
    /// 由 (当前时间, 发布时间, 截止时间) 派生的纯函数，查询时计算避免过期状态
    pub fn derive(now: DateTime<Utc>, publish_at: DateTime<Utc>, due_at: DateTime<Utc>) -> Self {
        if now < publish_at {
            TaskStatus::Upcoming
        } else if now <= due_at {
            TaskStatus::Active
        } else {
            TaskStatus::Completed
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct Task {
    // 任务ID
    pub id: i64,
    // 所属课程 ID，任务的受众永远是该课程的实时注册集合
    pub course_id: i64,
    // 标题
    pub title: String,
    // 描述
    pub description: Option<String>,
    // 任务类型
    pub task_type: TaskType,
    // 满分
    pub max_points: f64,
    // 发布时间
    pub publish_at: chrono::DateTime<chrono::Utc>,
    // 截止时间（不变式：due_at >= publish_at）
    pub due_at: chrono::DateTime<chrono::Utc>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Task {
    pub fn virtual_status(&self, now: DateTime<Utc>) -> TaskStatus {
        TaskStatus::derive(now, self.publish_at, self.due_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_status_upcoming_before_publish() {
        assert_eq!(
            TaskStatus::derive(ts(100), ts(200), ts(300)),
            TaskStatus::Upcoming
        );
    }

    #[test]
    fn test_status_active_between_publish_and_due() {
        assert_eq!(
            TaskStatus::derive(ts(250), ts(200), ts(300)),
            TaskStatus::Active
        );
        // 边界：正好发布、正好截止都算进行中
        assert_eq!(
            TaskStatus::derive(ts(200), ts(200), ts(300)),
            TaskStatus::Active
        );
        assert_eq!(
            TaskStatus::derive(ts(300), ts(200), ts(300)),
            TaskStatus::Active
        );
    }

    #[test]
    fn test_status_completed_after_due() {
        assert_eq!(
            TaskStatus::derive(ts(301), ts(200), ts(300)),
            TaskStatus::Completed
        );
    }

    #[test]
    fn test_task_type_roundtrip() {
        for t in [
            TaskType::Assignment,
            TaskType::Quiz,
            TaskType::Project,
            TaskType::Exam,
        ] {
            assert_eq!(TaskType::parse(t.as_str()), Some(t));
        }
        assert_eq!(TaskType::parse("lab"), None);
    }
}
