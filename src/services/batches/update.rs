use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::BatchService;
use crate::models::{ApiResponse, ErrorCode, batches::requests::UpdateBatchRequest};

pub async fn update_batch(
    service: &BatchService,
    batch_id: i64,
    update_data: UpdateBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_batch(batch_id, update_data).await {
        Ok(Some(batch)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(batch, "批次信息更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BatchNotFound,
            "Batch not found",
        ))),
        Err(e) if e.is_duplicate_key() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::BatchAlreadyExists,
                "Batch with same name, academic year and department already exists",
            ),
        )),
        Err(e) => {
            error!("Failed to update batch {}: {}", batch_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update batch: {e}"),
                )),
            )
        }
    }
}
