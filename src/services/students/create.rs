use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::services::cascade;
use crate::utils::validate::validate_email;

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证邮箱
    if let Err(msg) = validate_email(&student_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);
    let batch_ids = student_data.batch_ids.clone().unwrap_or_default();

    let student = match storage.create_student(student_data).await {
        Ok(student) => student,
        Err(e) if e.is_duplicate_key() => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentEmailTaken,
                "Email already registered",
            )));
        }
        Err(e) => {
            error!("Student creation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Student creation failed: {e}"),
                )),
            );
        }
    };

    // 建档时顺带加入批次，占位行随注册增长
    for batch_id in batch_ids {
        if let Err(e) = cascade::enroll_student(storage.as_ref(), batch_id, student.id).await {
            error!(
                "Enrolling student {} into batch {} failed: {}",
                student.id, batch_id, e
            );
        }
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(student, "学生创建成功")))
}
