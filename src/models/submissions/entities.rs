use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 迟交分类，创建时相对截止时间固定，之后不随截止时间变动重算
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum Lateness {
    OnTime,
    Late,
}

impl Lateness {
    pub const ON_TIME: &'static str = "on_time";
    pub const LATE: &'static str = "late";

    pub fn as_str(&self) -> &'static str {
        match self {
            Lateness::OnTime => Self::ON_TIME,
            Lateness::Late => Self::LATE,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            Self::ON_TIME => Some(Lateness::OnTime),
            Self::LATE => Some(Lateness::Late),
            _ => None,
        }
    }

    /// 按提交时刻与截止时刻分类
    pub fn classify(submitted_at: DateTime<Utc>, due_at: DateTime<Utc>) -> Self {
        if submitted_at <= due_at {
            Lateness::OnTime
        } else {
            Lateness::Late
        }
    }
}

impl<'de> Deserialize<'de> for Lateness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Lateness::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("无效的迟交分类: '{s}'. 支持: on_time, late"))
        })
    }
}

impl std::fmt::Display for Lateness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 提交实体，每个 (task, student) 至多一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub task_id: i64,
    pub student_id: i64,
    // 提交正文
    pub content: String,
    // 附件 token 列表
    pub attachments: Vec<String>,
    pub lateness: Lateness,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_classify_on_time() {
        assert_eq!(Lateness::classify(ts(100), ts(200)), Lateness::OnTime);
        // 正点提交算准时
        assert_eq!(Lateness::classify(ts(200), ts(200)), Lateness::OnTime);
    }

    #[test]
    fn test_classify_late() {
        assert_eq!(Lateness::classify(ts(201), ts(200)), Lateness::Late);
    }
}
