//! 提交生命周期
//!
//! 状态机：无 → 已提交（首交，迟交分类此刻固定）；
//! 已提交 → 已提交（截止前且未评分可替换内容）；
//! 成绩一旦 Graded 即锁定；截止后既不能新建也不能编辑。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::error;

use super::SubmissionService;
use crate::errors::{Result, TaskHubError};
use crate::models::{
    ApiResponse, ErrorCode,
    grades::entities::GradeStatus,
    submissions::{
        entities::{Lateness, Submission},
        requests::SubmitRequest,
    },
};
use crate::services::enrollment;
use crate::storage::Storage;

/// 提交/重交核心
///
/// 截止检查在评分锁之前：过了截止时间一律拒绝，无论评分状态。
pub async fn submit_or_update(
    storage: &dyn Storage,
    task_id: i64,
    student_id: i64,
    content: String,
    attachments: &[String],
    now: DateTime<Utc>,
) -> Result<Submission> {
    let task = storage
        .get_task_by_id(task_id)
        .await?
        .ok_or_else(|| TaskHubError::not_found(format!("Task {task_id} not found")))?;

    if !enrollment::is_student_enrolled(storage, student_id, task.course_id).await? {
        return Err(TaskHubError::validation(format!(
            "Student {student_id} is not enrolled in course {}",
            task.course_id
        )));
    }

    if now > task.due_at {
        return Err(TaskHubError::deadline_exceeded(format!(
            "Task {task_id} deadline has passed"
        )));
    }

    if let Some(existing) = storage
        .get_submission_by_task_and_student(task_id, student_id)
        .await?
    {
        // 评分锁
        if let Some(grade) = storage
            .get_grade_by_task_and_student(task_id, student_id)
            .await?
            && grade.status == GradeStatus::Graded
        {
            return Err(TaskHubError::locked_for_grading(format!(
                "Submission for task {task_id} is locked: grade already applied"
            )));
        }

        let updated = storage
            .update_submission_content(existing.id, content, attachments)
            .await?
            .ok_or_else(|| {
                TaskHubError::not_found(format!("Submission {} vanished mid-update", existing.id))
            })?;
        return Ok(updated);
    }

    // 首交，迟交分类此刻固定
    let lateness = Lateness::classify(now, task.due_at);
    let submission = match storage
        .create_submission(task_id, student_id, content.clone(), attachments, lateness)
        .await
    {
        Ok(submission) => submission,
        // 并发首交撞上唯一索引，落败方转入更新路径
        Err(e) if e.is_duplicate_key() => {
            let existing = storage
                .get_submission_by_task_and_student(task_id, student_id)
                .await?
                .ok_or(e)?;
            storage
                .update_submission_content(existing.id, content, attachments)
                .await?
                .ok_or_else(|| {
                    TaskHubError::not_found(format!(
                        "Submission {} vanished mid-update",
                        existing.id
                    ))
                })?
        }
        Err(e) => return Err(e),
    };

    // 写通成绩行的提交引用
    storage
        .link_submission(task_id, student_id, Some(submission.id))
        .await?;

    Ok(submission)
}

pub async fn submit(
    service: &SubmissionService,
    task_id: i64,
    student_id: i64,
    data: SubmitRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let attachments = data.attachments.unwrap_or_default();

    match submit_or_update(
        storage.as_ref(),
        task_id,
        student_id,
        data.content,
        &attachments,
        Utc::now(),
    )
    .await
    {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交成功"))),
        Err(TaskHubError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::TaskNotFound, msg))),
        Err(TaskHubError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))),
        Err(TaskHubError::DeadlineExceeded(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::DeadlineExceeded, msg))),
        Err(TaskHubError::LockedForGrading(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::LockedForGrading, msg))),
        Err(e) => {
            error!(
                "Submission for task {} by student {} failed: {}",
                task_id, student_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Submission failed: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::actor::{ActorKind, ActorRef};
    use crate::services::testutil::{
        seed_batch, seed_course, seed_expired_task, seed_student, seed_task,
    };
    use crate::services::{cascade, sync};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn seed_enrolled(storage: &SeaOrmStorage) -> (i64, i64) {
        let student = seed_student(storage, "alice").await;
        let batch = seed_batch(storage, "b1").await;
        let course = seed_course(storage, "CS401").await;
        storage.attach_batch_to_course(course, batch).await.unwrap();
        cascade::enroll_student(storage, batch, student).await.unwrap();
        (course, student)
    }

    #[tokio::test]
    async fn test_first_submit_links_grade_row() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (course, student) = seed_enrolled(&storage).await;
        let task = seed_task(&storage, course, "hw1").await;
        sync::sync_grades_for_task_creation(&storage, &task).await.unwrap();

        let submission = submit_or_update(
            &storage,
            task.id,
            student,
            "answer".to_string(),
            &[],
            Utc::now(),
        )
        .await
        .unwrap();

        assert_eq!(submission.lateness, Lateness::OnTime);

        let grade = storage
            .get_grade_by_task_and_student(task.id, student)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(grade.submission_id, Some(submission.id));
    }

    #[tokio::test]
    async fn test_resubmit_replaces_content() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (course, student) = seed_enrolled(&storage).await;
        let task = seed_task(&storage, course, "hw1").await;
        sync::sync_grades_for_task_creation(&storage, &task).await.unwrap();

        let first = submit_or_update(
            &storage,
            task.id,
            student,
            "draft".to_string(),
            &[],
            Utc::now(),
        )
        .await
        .unwrap();

        let second = submit_or_update(
            &storage,
            task.id,
            student,
            "final".to_string(),
            &["report.pdf".to_string()],
            Utc::now(),
        )
        .await
        .unwrap();

        // 同一行被替换，不产生第二条提交
        assert_eq!(first.id, second.id);
        assert_eq!(second.content, "final");
        assert_eq!(second.attachments, vec!["report.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_rejected_when_not_enrolled() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let course = seed_course(&storage, "CS402").await;
        let outsider = seed_student(&storage, "mallory").await;
        let task = seed_task(&storage, course, "hw1").await;

        let err = submit_or_update(
            &storage,
            task.id,
            outsider,
            "answer".to_string(),
            &[],
            Utc::now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TaskHubError::Validation(_)));
    }

    #[tokio::test]
    async fn test_submit_after_deadline_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (course, student) = seed_enrolled(&storage).await;
        let task = seed_expired_task(&storage, course, "hw1").await;
        sync::sync_grades_for_task_creation(&storage, &task).await.unwrap();

        let err = submit_or_update(
            &storage,
            task.id,
            student,
            "too late".to_string(),
            &[],
            Utc::now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TaskHubError::DeadlineExceeded(_)));
    }

    #[tokio::test]
    async fn test_edit_after_deadline_rejected_even_if_ungraded() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (course, student) = seed_enrolled(&storage).await;
        let task = seed_task(&storage, course, "hw1").await;
        sync::sync_grades_for_task_creation(&storage, &task).await.unwrap();

        submit_or_update(&storage, task.id, student, "v1".to_string(), &[], Utc::now())
            .await
            .unwrap();

        // 截止之后再编辑
        let after_due = task.due_at + chrono::Duration::seconds(1);
        let err = submit_or_update(&storage, task.id, student, "v2".to_string(), &[], after_due)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskHubError::DeadlineExceeded(_)));
    }

    #[tokio::test]
    async fn test_graded_submission_is_locked() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (course, student) = seed_enrolled(&storage).await;
        let task = seed_task(&storage, course, "hw1").await;
        sync::sync_grades_for_task_creation(&storage, &task).await.unwrap();

        submit_or_update(&storage, task.id, student, "v1".to_string(), &[], Utc::now())
            .await
            .unwrap();

        // 教师评分后锁定
        let grade = storage
            .get_grade_by_task_and_student(task.id, student)
            .await
            .unwrap()
            .unwrap();
        storage
            .apply_grade_update(
                grade.id,
                Some(90.0),
                None,
                ActorRef {
                    kind: ActorKind::Faculty,
                    id: 7,
                },
            )
            .await
            .unwrap();

        let err = submit_or_update(&storage, task.id, student, "v2".to_string(), &[], Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, TaskHubError::LockedForGrading(_)));
    }
}
