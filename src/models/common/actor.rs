use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 操作者类型
///
/// 原始数据模型中创建者/评分者是"集合名 + id"的多态引用，
/// 这里固化为带标签的枚举，按 kind 派发，不再做动态集合查找。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub enum ActorKind {
    Admin,
    Faculty,
    Student,
}

impl ActorKind {
    pub const ADMIN: &'static str = "admin";
    pub const FACULTY: &'static str = "faculty";
    pub const STUDENT: &'static str = "student";

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Admin => Self::ADMIN,
            ActorKind::Faculty => Self::FACULTY,
            ActorKind::Student => Self::STUDENT,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            Self::ADMIN => Some(ActorKind::Admin),
            Self::FACULTY => Some(ActorKind::Faculty),
            Self::STUDENT => Some(ActorKind::Student),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ActorKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ActorKind::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "无效的操作者类型: '{s}'. 支持: admin, faculty, student"
            ))
        })
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 带标签的操作者引用
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub struct ActorRef {
    pub kind: ActorKind,
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_kind_roundtrip() {
        for kind in [ActorKind::Admin, ActorKind::Faculty, ActorKind::Student] {
            assert_eq!(ActorKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ActorKind::parse("registrar"), None);
    }
}
