//! 批量评分写路径
//!
//! 各项独立应用，跨项不原子：部分失败不回滚已生效项。
//! status/graded_at/评分人都由 grade 是否为空派生。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::GradeService;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        requests::BulkApplyGradesRequest,
        responses::{BulkApplyGradesResponse, BulkApplyOutcome},
    },
};
use crate::storage::Storage;

/// 批量评分核心：逐项应用，不中断
pub async fn bulk_apply_grades(
    storage: &dyn Storage,
    request_data: BulkApplyGradesRequest,
) -> Result<BulkApplyGradesResponse> {
    let mut outcomes = Vec::with_capacity(request_data.entries.len());
    let mut applied = 0usize;
    let mut failed = 0usize;

    for entry in request_data.entries {
        let outcome = match storage
            .apply_grade_update(
                entry.grade_id,
                entry.grade,
                entry.feedback,
                request_data.grader.clone(),
            )
            .await
        {
            Ok(Some(_)) => {
                applied += 1;
                BulkApplyOutcome {
                    grade_id: entry.grade_id,
                    applied: true,
                    error: None,
                }
            }
            Ok(None) => {
                failed += 1;
                BulkApplyOutcome {
                    grade_id: entry.grade_id,
                    applied: false,
                    error: Some("Grade not found".to_string()),
                }
            }
            Err(e) => {
                failed += 1;
                warn!("Bulk grading entry {} failed: {}", entry.grade_id, e);
                BulkApplyOutcome {
                    grade_id: entry.grade_id,
                    applied: false,
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(BulkApplyGradesResponse {
        applied,
        failed,
        outcomes,
    })
}

pub async fn bulk_apply(
    service: &GradeService,
    data: BulkApplyGradesRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if data.entries.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Grading entries must not be empty",
        )));
    }

    let storage = service.get_storage(request);

    match bulk_apply_grades(storage.as_ref(), data).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "批量评分完成"))),
        Err(e) => {
            error!("Bulk grading failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Bulk grading failed: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::GradeStatus;
    use crate::models::grades::requests::BulkGradeEntry;
    use crate::services::testutil::{faculty, seed_batch, seed_course, seed_student, seed_task};
    use crate::services::{cascade, sync};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn seed_graded_setup(storage: &SeaOrmStorage) -> (i64, i64, i64) {
        let student = seed_student(storage, "alice").await;
        let batch = seed_batch(storage, "b1").await;
        let course = seed_course(storage, "CS501").await;
        storage.attach_batch_to_course(course, batch).await.unwrap();
        cascade::enroll_student(storage, batch, student).await.unwrap();
        let task = seed_task(storage, course, "hw1").await;
        sync::sync_grades_for_task_creation(storage, &task).await.unwrap();
        let grade = storage
            .get_grade_by_task_and_student(task.id, student)
            .await
            .unwrap()
            .unwrap();
        (task.id, student, grade.id)
    }

    #[tokio::test]
    async fn test_apply_derives_status_from_grade() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (_, _, grade_id) = seed_graded_setup(&storage).await;

        let response = bulk_apply_grades(
            &storage,
            BulkApplyGradesRequest {
                grader: faculty(7),
                entries: vec![BulkGradeEntry {
                    grade_id,
                    grade: Some(88.5),
                    feedback: Some("good".to_string()),
                }],
            },
        )
        .await
        .unwrap();

        assert_eq!(response.applied, 1);
        assert_eq!(response.failed, 0);

        let grade = storage.get_grade_by_id(grade_id).await.unwrap().unwrap();
        assert_eq!(grade.status, GradeStatus::Graded);
        assert_eq!(grade.grade, Some(88.5));
        assert!(grade.graded_at.is_some());
        assert_eq!(grade.graded_by.unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_null_grade_reverts_to_pending() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (_, _, grade_id) = seed_graded_setup(&storage).await;

        bulk_apply_grades(
            &storage,
            BulkApplyGradesRequest {
                grader: faculty(7),
                entries: vec![BulkGradeEntry {
                    grade_id,
                    grade: Some(70.0),
                    feedback: None,
                }],
            },
        )
        .await
        .unwrap();

        // 撤销评分：回到 Pending，评分信息清空
        bulk_apply_grades(
            &storage,
            BulkApplyGradesRequest {
                grader: faculty(7),
                entries: vec![BulkGradeEntry {
                    grade_id,
                    grade: None,
                    feedback: None,
                }],
            },
        )
        .await
        .unwrap();

        let grade = storage.get_grade_by_id(grade_id).await.unwrap().unwrap();
        assert_eq!(grade.status, GradeStatus::Pending);
        assert!(grade.grade.is_none());
        assert!(grade.graded_at.is_none());
        assert!(grade.graded_by.is_none());
    }

    #[tokio::test]
    async fn test_partial_failure_does_not_abort_batch() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (_, _, grade_id) = seed_graded_setup(&storage).await;

        let response = bulk_apply_grades(
            &storage,
            BulkApplyGradesRequest {
                grader: faculty(7),
                entries: vec![
                    BulkGradeEntry {
                        grade_id: 99999, // 不存在
                        grade: Some(50.0),
                        feedback: None,
                    },
                    BulkGradeEntry {
                        grade_id,
                        grade: Some(95.0),
                        feedback: None,
                    },
                ],
            },
        )
        .await
        .unwrap();

        assert_eq!(response.applied, 1);
        assert_eq!(response.failed, 1);
        assert!(!response.outcomes[0].applied);
        assert!(response.outcomes[1].applied);

        // 第一项失败不影响第二项生效
        let grade = storage.get_grade_by_id(grade_id).await.unwrap().unwrap();
        assert_eq!(grade.grade, Some(95.0));
    }
}
