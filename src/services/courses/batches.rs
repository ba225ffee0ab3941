use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CourseBatchChangeRequest};
use crate::services::{cascade, enrollment};

/// 课程批次挂接/摘除
///
/// 变更落库后按新的注册集合全量对账，经由其他仍挂接批次
/// 保持注册的学生不受影响。
pub async fn change_batches(
    service: &CourseService,
    course_id: i64,
    change: CourseBatchChangeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load course: {e}"),
                )),
            );
        }
    }

    // 待挂接批次必须存在；摘除不存在的批次是无害的空操作
    for &batch_id in &change.added_batch_ids {
        match storage.get_batch_by_id(batch_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::BatchNotFound,
                    format!("Batch {batch_id} not found"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to load batch: {e}"),
                    )),
                );
            }
        }
    }

    match cascade::change_course_batches(
        storage.as_ref(),
        course_id,
        &change.added_batch_ids,
        &change.removed_batch_ids,
    )
    .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("课程批次变更成功"))),
        Err(e) => {
            error!("Failed to change batches of course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to change course batches: {e}"),
                )),
            )
        }
    }
}

/// 课程的有效注册集合（实时解析，不落库）
pub async fn get_enrollment(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load course: {e}"),
                )),
            );
        }
    }

    match enrollment::resolve_enrollment(storage.as_ref(), course_id).await {
        Ok(student_ids) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(student_ids, "课程注册集合解析成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to resolve enrollment: {e}"),
            )),
        ),
    }
}
