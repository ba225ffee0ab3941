//! 成绩占位实体
//!
//! (task_id, student_id) 唯一索引是并发增长路径的唯一正确性保障。
//! course_id 为冗余列，来自任务所属课程，按课程级联删除时直接命中。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub task_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<f64>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub submission_id: Option<i64>,
    pub graded_by_kind: Option<String>,
    pub graded_by_id: Option<i64>,
    pub graded_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::Id"
    )]
    Task,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use crate::models::common::actor::{ActorKind, ActorRef};
        use crate::models::grades::entities::{Grade, GradeStatus};
        use chrono::{DateTime, Utc};

        let graded_by = match (self.graded_by_kind.as_deref(), self.graded_by_id) {
            (Some(kind), Some(id)) => ActorKind::parse(kind).map(|kind| ActorRef { kind, id }),
            _ => None,
        };

        Grade {
            id: self.id,
            task_id: self.task_id,
            student_id: self.student_id,
            course_id: self.course_id,
            grade: self.grade,
            status: GradeStatus::parse(&self.status).unwrap_or(GradeStatus::Pending),
            feedback: self.feedback,
            submission_id: self.submission_id,
            graded_by,
            graded_at: self
                .graded_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
