use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::BatchService;
use crate::models::{ApiResponse, ErrorCode, batches::requests::BatchMemberRequest};
use crate::services::cascade;

/// 批次成员列表
pub async fn list_members(
    service: &BatchService,
    batch_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Ok(None) | Err(_) = storage.get_batch_by_id(batch_id).await {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BatchNotFound,
            "Batch not found",
        )));
    }

    match storage.list_student_ids_of_batch(batch_id).await {
        Ok(student_ids) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(student_ids, "批次成员获取成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list batch members: {e}"),
            )),
        ),
    }
}

/// 学生加入批次，占位行随注册增长
pub async fn add_member(
    service: &BatchService,
    batch_id: i64,
    member: BatchMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先确认两端都存在，未动任何数据前拒绝
    match storage.get_batch_by_id(batch_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BatchNotFound,
                "Batch not found",
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

    match storage.get_student_by_id(member.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load student: {e}"),
                )),
            );
        }
    }

    match cascade::enroll_student(storage.as_ref(), batch_id, member.student_id).await {
        Ok(true) => Ok(HttpResponse::Created().json(ApiResponse::success_empty("学生加入批次成功"))),
        Ok(false) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学生已在批次中"))),
        Err(e) => {
            error!(
                "Failed to enroll student {} into batch {}: {}",
                member.student_id, batch_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to enroll student: {e}"),
                )),
            )
        }
    }
}

/// 学生移出批次，失去注册资格的成绩与提交随之收缩
pub async fn remove_member(
    service: &BatchService,
    batch_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match cascade::unenroll_student(storage.as_ref(), batch_id, student_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学生移出批次成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Student is not a member of this batch",
        ))),
        Err(e) => {
            error!(
                "Failed to unenroll student {} from batch {}: {}",
                student_id, batch_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to unenroll student: {e}"),
                )),
            )
        }
    }
}
