//! 批次实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub academic_year: String,
    pub department: String,
    pub creator_kind: String,
    pub creator_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::batch_students::Entity")]
    BatchStudents,
    #[sea_orm(has_many = "super::course_batches::Entity")]
    CourseBatches,
}

impl Related<super::batch_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchStudents.def()
    }
}

impl Related<super::course_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseBatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_batch(self) -> crate::models::batches::entities::Batch {
        use crate::models::batches::entities::Batch;
        use crate::models::common::actor::{ActorKind, ActorRef};
        use chrono::{DateTime, Utc};

        Batch {
            id: self.id,
            name: self.name,
            academic_year: self.academic_year,
            department: self.department,
            creator: ActorRef {
                kind: ActorKind::parse(&self.creator_kind).unwrap_or(ActorKind::Admin),
                id: self.creator_id,
            },
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
