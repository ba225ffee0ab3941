use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::BatchService;
use crate::models::{ApiResponse, ErrorCode, batches::requests::CreateBatchRequest};
use crate::services::cascade;

pub async fn create_batch(
    service: &BatchService,
    batch_data: CreateBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if batch_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Batch name must not be empty",
        )));
    }

    let storage = service.get_storage(request);
    let student_ids = batch_data.student_ids.clone().unwrap_or_default();

    let batch = match storage.create_batch(batch_data).await {
        Ok(batch) => batch,
        // (名称, 学年, 院系) 唯一索引
        Err(e) if e.is_duplicate_key() => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::BatchAlreadyExists,
                "Batch with same name, academic year and department already exists",
            )));
        }
        Err(e) => {
            error!("Batch creation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Batch creation failed: {e}"),
                )),
            );
        }
    };

    for student_id in student_ids {
        if let Err(e) = cascade::enroll_student(storage.as_ref(), batch.id, student_id).await {
            error!(
                "Enrolling student {} into batch {} failed: {}",
                student_id, batch.id, e
            );
        }
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(batch, "批次创建成功")))
}
