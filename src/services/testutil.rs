//! 引擎测试共用的内存库种子工具

use crate::models::common::actor::{ActorKind, ActorRef};
use crate::models::tasks::entities::Task;
use crate::models::{
    batches::requests::CreateBatchRequest, courses::requests::CreateCourseRequest,
    students::requests::CreateStudentRequest, tasks::requests::CreateTaskRequest,
};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;
use chrono::{Duration, Utc};

pub(crate) fn admin() -> ActorRef {
    ActorRef {
        kind: ActorKind::Admin,
        id: 1,
    }
}

pub(crate) fn faculty(id: i64) -> ActorRef {
    ActorRef {
        kind: ActorKind::Faculty,
        id,
    }
}

pub(crate) async fn seed_student(storage: &SeaOrmStorage, name: &str) -> i64 {
    storage
        .create_student(CreateStudentRequest {
            name: name.to_string(),
            email: format!("{name}@example.edu"),
            department: Some("CS".to_string()),
            batch_ids: None,
        })
        .await
        .unwrap()
        .id
}

pub(crate) async fn seed_batch(storage: &SeaOrmStorage, name: &str) -> i64 {
    storage
        .create_batch(CreateBatchRequest {
            name: name.to_string(),
            academic_year: "2026".to_string(),
            department: "CS".to_string(),
            creator: admin(),
            student_ids: None,
        })
        .await
        .unwrap()
        .id
}

pub(crate) async fn seed_course(storage: &SeaOrmStorage, code: &str) -> i64 {
    storage
        .create_course(CreateCourseRequest {
            title: format!("Course {code}"),
            code: code.to_string(),
            description: None,
            faculty_ids: None,
            batch_ids: None,
        })
        .await
        .unwrap()
        .id
}

/// 创建一个当前进行中的任务（已发布、一小时后截止）
pub(crate) async fn seed_task(storage: &SeaOrmStorage, course_id: i64, title: &str) -> Task {
    let now = Utc::now();
    storage
        .create_task(CreateTaskRequest {
            course_id,
            title: title.to_string(),
            description: None,
            task_type: None,
            max_points: Some(100.0),
            publish_at: now - Duration::hours(1),
            due_at: now + Duration::hours(1),
        })
        .await
        .unwrap()
}

/// 创建一个已截止的任务
pub(crate) async fn seed_expired_task(
    storage: &SeaOrmStorage,
    course_id: i64,
    title: &str,
) -> Task {
    let now = Utc::now();
    storage
        .create_task(CreateTaskRequest {
            course_id,
            title: title.to_string(),
            description: None,
            task_type: None,
            max_points: Some(100.0),
            publish_at: now - Duration::hours(2),
            due_at: now - Duration::hours(1),
        })
        .await
        .unwrap()
}
